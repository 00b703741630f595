pub mod axis;
pub mod base;
pub mod figure;
pub mod loglog;
pub mod surface;

pub use axis::{AxisOptions, AxisOptionsBuilder, AxisScale};
pub use base::{BasePlotOptions, BasePlotOptionsBuilder};
pub use figure::{FigureOptions, FigureOptionsBuilder, SurfaceMode};
pub use loglog::{LogLogPlotOptions, LogLogPlotOptionsBuilder};
pub use surface::{SurfacePlotOptions, SurfacePlotOptionsBuilder};

/// Trait for plot options types
///
/// All plot-specific options structs should implement this trait to provide
/// access to the base options.
pub trait PlotOptions {
    /// Get a reference to the base plot options
    fn base(&self) -> &BasePlotOptions;
}
