use crate::PlotBytes;
use crate::options::PlotOptions;
use crate::render::{OutputFormat, RenderConfig, render_plot};
use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::{DrawingArea, DrawingBackend};

/// Trait for plot types
///
/// This trait defines the interface that all plot types must implement.
/// Each plot type specifies its own options type and data type, and draws
/// itself onto any Plotters drawing area. Drawing onto an area rather than
/// a whole canvas lets plots be composed into grids.
///
/// # Example
///
/// ```rust,no_run
/// use hashbench_plots::plots::traits::Plot;
/// use hashbench_plots::options::{PlotOptions, BasePlotOptions};
/// use hashbench_plots::render::RenderConfig;
/// use anyhow::Result;
/// use plotters::coord::Shift;
/// use plotters::prelude::*;
///
/// struct MyPlotOptions {
///     base: BasePlotOptions,
/// }
///
/// impl PlotOptions for MyPlotOptions {
///     fn base(&self) -> &BasePlotOptions { &self.base }
/// }
///
/// struct MyPlot;
///
/// impl Plot for MyPlot {
///     type Options = MyPlotOptions;
///     type Data = Vec<(f64, f64)>;
///
///     fn draw<DB: DrawingBackend>(
///         &self,
///         area: &DrawingArea<DB, Shift>,
///         data: &Self::Data,
///         options: &Self::Options,
///         render_config: &mut RenderConfig,
///     ) -> Result<()> {
///         // ... your drawing logic
///         Ok(())
///     }
/// }
/// ```
pub trait Plot {
    /// The options type for this plot
    type Options: PlotOptions;

    /// The data type this plot accepts
    type Data;

    /// Draw the plot into `area`
    ///
    /// # Arguments
    ///
    /// * `area` - Target area; the whole canvas or one cell of a grid
    /// * `data` - The data to plot
    /// * `options` - Plot-specific options
    /// * `render_config` - Rendering configuration (progress callbacks, etc.)
    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        data: &Self::Data,
        options: &Self::Options,
        render_config: &mut RenderConfig,
    ) -> Result<()>;

    /// Render the plot on its own canvas sized by the base options
    ///
    /// # Returns
    ///
    /// Image bytes encoded as `format`
    fn render(
        &self,
        data: &Self::Data,
        options: &Self::Options,
        format: OutputFormat,
        render_config: &mut RenderConfig,
    ) -> Result<PlotBytes> {
        render_plot(self, data, options, format, render_config)
    }
}
