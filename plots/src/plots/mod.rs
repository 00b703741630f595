pub mod loglog;
pub mod surface;
pub mod traits;

pub use loglog::{LogLogPlot, NamedSeries};
pub use surface::SurfacePlot;
pub use traits::Plot;
