//! # hashbench-plots
//!
//! Charts comparing hashmap insertion benchmarks.
//!
//! ## Overview
//!
//! The crate draws two kinds of chart and combines them into one report figure:
//!
//! - [`SurfacePlot`]: a shaded 3D surface of insertion time over two benchmark dimensions
//! - [`LogLogPlot`]: insertion time against key size, one line per hashmap
//! - [`ReportFigure`]: a 2x2 grid with a surface per hashmap on top and two
//!   log-log comparisons below
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use hashbench_plots::{FigureData, FigureOptions, FigurePanels, Plot, ReportFigure};
//! use hashbench_plots::render::{OutputFormat, RenderConfig};
//! use hashbench_results::{BenchmarkReport, MalformedPolicy, samples_with_prefix};
//!
//! # fn main() -> anyhow::Result<()> {
//! let report = BenchmarkReport::open("benchmarks.json")?;
//! let data = FigureData {
//!     library: samples_with_prefix(&report, "BM_HashmapInsert", MalformedPolicy::Fail)?,
//!     reference: samples_with_prefix(&report, "BM_StdUnorderedMap", MalformedPolicy::Fail)?,
//! };
//! let options = FigureOptions::new().value_size(256u64).build()?;
//! let panels = FigurePanels::build(&data, &options)?;
//! let mut render_config = RenderConfig::default();
//! let bytes = ReportFigure.render(&panels, &options, OutputFormat::Png, &mut render_config)?;
//! std::fs::write("benchmarks.png", bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `options`: Plot configuration types using the builder pattern
//! - `plots`: Plot implementations behind the [`Plot`] trait
//! - `figure`: Panel selection and the 2x2 report layout
//! - `render`: Output encoding and progress reporting
//! - `surface_calc`: Grid triangulation for surfaces
//! - `colormap`: Color maps for surface shading
//! - `helpers`: Per-panel option construction

pub mod colormap;
pub mod figure;
pub mod helpers;
pub mod options;
pub mod plots;
pub mod render;
pub mod surface_calc;

// Re-export commonly used types
pub use colormap::ColorMaps;
pub use figure::{FigureData, FigurePanels, LinePanel, ReportFigure, SurfacePanel};
pub use options::{
    AxisOptions, AxisScale, BasePlotOptions, FigureOptions, LogLogPlotOptions, PlotOptions,
    SurfaceMode, SurfacePlotOptions,
};
pub use plots::{LogLogPlot, NamedSeries, Plot, SurfacePlot};
pub use render::{OutputFormat, ProgressCallback, ProgressInfo, RenderConfig};

// Type aliases
pub type PlotBytes = Vec<u8>;
pub type PlotRange = std::ops::Range<f64>;

use std::f64::consts::LOG10_2;

/// Axis bounds for a coordinate that is already a logarithm
///
/// Rounds outward to whole exponents so ticks fall on decades (log10) or
/// powers of two (log2). A single value is widened by one step each side.
pub fn exponent_bounds(min: f64, max: f64) -> PlotRange {
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0; // Fallback for invalid ranges
    }
    // log10(4) / log10(2) lands a hair off 2.0; don't let that widen the axis
    let snap = |v: f64| if (v - v.round()).abs() < 1e-9 { v.round() } else { v };
    let (lo, hi) = (snap(min.min(max)).floor(), snap(min.max(max)).ceil());
    if lo == hi { (lo - 1.0)..(hi + 1.0) } else { lo..hi }
}

/// Axis bounds in plotting coordinates for an axis of the given scale
pub fn axis_bounds(scale: AxisScale, min: f64, max: f64) -> PlotRange {
    match scale {
        AxisScale::Log10 | AxisScale::PowerOfTwo => exponent_bounds(min, max),
        AxisScale::Linear => {
            let (nice_min, nice_max) = nice_bounds(min, max);
            nice_min..nice_max
        }
    }
}

/// Bounds in raw data units for a plotters log axis
///
/// Both ends snap outward to a power of two (`PowerOfTwo`) or of ten
/// otherwise. Non-positive input has no logarithm and falls back to `1..10`.
pub fn log_axis_bounds(scale: AxisScale, min: f64, max: f64) -> PlotRange {
    if !(min > 0.0 && max > 0.0) || !min.is_finite() || !max.is_finite() {
        return 1.0..10.0;
    }
    match scale {
        AxisScale::PowerOfTwo => {
            let exponents = exponent_bounds(min.log2(), max.log2());
            2f64.powf(exponents.start)..2f64.powf(exponents.end)
        }
        AxisScale::Log10 | AxisScale::Linear => {
            let exponents = exponent_bounds(min.log10(), max.log10());
            10f64.powf(exponents.start)..10f64.powf(exponents.end)
        }
    }
}

/// Number of tick labels to request for an axis range
///
/// Power-of-two axes get one label per integral exponent (capped) so every
/// label lands on a real power of two.
pub fn label_count(scale: AxisScale, range: &PlotRange) -> usize {
    match scale {
        AxisScale::PowerOfTwo => ((range.end - range.start).round() as usize + 1).clamp(2, 12),
        AxisScale::Log10 | AxisScale::Linear => 6,
    }
}

/// Convert log10 to log2
pub fn log10_to_log2(value: f64) -> f64 {
    value / LOG10_2
}

fn nice_bounds(min: f64, max: f64) -> (f64, f64) {
    if min.is_infinite() || max.is_infinite() || min.is_nan() || max.is_nan() {
        return (0.0, 1.0); // Fallback for invalid ranges
    }

    let range = max - min;
    if range == 0.0 {
        return (min - 0.5, min + 0.5); // Handle single-point case
    }

    // Find nice step size
    let step_size = 10_f64.powf(range.log10().floor());
    let nice_min = (min / step_size).floor() * step_size;
    let nice_max = (max / step_size).ceil() * step_size;

    (nice_min, nice_max)
}
