pub mod plotters_backend;
pub mod progress;

pub use plotters_backend::{OutputFormat, render_plot};
pub use progress::{ProgressCallback, ProgressInfo};
use tracing::warn;

/// Configuration for plot rendering
///
/// This struct allows applications to inject their own progress reporting
/// logic without the library depending on specific frameworks.
#[derive(Default)]
pub struct RenderConfig {
    /// Optional progress callback, called once per finished panel
    pub progress: Option<ProgressCallback>,
}

impl RenderConfig {
    /// Create a new RenderConfig with no callbacks
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a RenderConfig that reports progress to `callback`
    pub fn with_progress(callback: ProgressCallback) -> Self {
        Self {
            progress: Some(callback),
        }
    }

    /// Call the progress callback if present
    pub fn report_progress(&mut self, info: ProgressInfo) {
        if let Some(ref mut callback) = self.progress {
            if let Err(e) = callback(info) {
                warn!("Failed to report progress: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::error::Error;
    use std::rc::Rc;

    type CallbackResult = Result<(), Box<dyn Error + Send + Sync>>;

    #[test]
    fn test_report_progress_calls_back() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut config = RenderConfig::with_progress(Box::new(move |info: ProgressInfo| -> CallbackResult {
            sink.borrow_mut().push(info.percent());
            Ok(())
        }));

        for completed in 1..=4 {
            config.report_progress(ProgressInfo {
                panel: format!("panel {completed}"),
                completed,
                total: 4,
            });
        }
        assert_eq!(*seen.borrow(), vec![25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn test_callback_errors_are_swallowed() {
        let mut config =
            RenderConfig::with_progress(Box::new(|_info: ProgressInfo| -> CallbackResult {
            Err("closed".into())
        }));
        config.report_progress(ProgressInfo {
            panel: "a".to_string(),
            completed: 1,
            total: 1,
        });

        let mut silent = RenderConfig::new();
        silent.report_progress(ProgressInfo {
            panel: "a".to_string(),
            completed: 0,
            total: 0,
        });
    }
}
