use crate::options::{AxisOptions, AxisScale, BasePlotOptions, PlotOptions};
use derive_builder::Builder;

/// Options for log-log line plots
#[derive(Builder, Clone, Debug)]
#[builder(setter(into, strip_option), default)]
pub struct LogLogPlotOptions {
    /// Base plot options (layout, dimensions, etc.)
    #[builder(default)]
    pub base: BasePlotOptions,

    /// X-axis configuration
    #[builder(default = "AxisOptions::labelled(\"Key Size\", AxisScale::PowerOfTwo)")]
    pub x_axis: AxisOptions,

    /// Y-axis configuration
    #[builder(default = "AxisOptions::labelled(\"Insertion Time\", AxisScale::Log10)")]
    pub y_axis: AxisOptions,

    /// Line width in pixels
    #[builder(default = "2")]
    pub line_width: u32,

    /// Radius of the point markers; 0 disables them
    #[builder(default = "3")]
    pub point_size: u32,

    /// Draw the series legend
    #[builder(default = "true")]
    pub legend: bool,
}

impl Default for LogLogPlotOptions {
    fn default() -> Self {
        Self {
            base: BasePlotOptions::default(),
            x_axis: AxisOptions::labelled("Key Size", AxisScale::PowerOfTwo),
            y_axis: AxisOptions::labelled("Insertion Time", AxisScale::Log10),
            line_width: 2,
            point_size: 3,
            legend: true,
        }
    }
}

impl PlotOptions for LogLogPlotOptions {
    fn base(&self) -> &BasePlotOptions {
        &self.base
    }
}

impl LogLogPlotOptions {
    /// Create a new builder for LogLogPlotOptions
    pub fn new() -> LogLogPlotOptionsBuilder {
        LogLogPlotOptionsBuilder::default()
    }
}
