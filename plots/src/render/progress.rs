/// Information about figure rendering progress
#[derive(Clone, Debug)]
pub struct ProgressInfo {
    /// Title of the panel that just finished drawing
    pub panel: String,
    /// Number of panels drawn so far
    pub completed: usize,
    /// Total number of panels in the figure
    pub total: usize,
}

impl ProgressInfo {
    /// Progress percentage (0.0 to 100.0)
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            100.0
        } else {
            self.completed as f32 / self.total as f32 * 100.0
        }
    }
}

/// Callback function type for reporting plot rendering progress
///
/// The callback receives progress information and returns a result.
/// Errors from the callback are logged but do not stop rendering.
pub type ProgressCallback =
    Box<dyn FnMut(ProgressInfo) -> Result<(), Box<dyn std::error::Error + Send + Sync>>>;
