use crate::colormap::ColorMaps;
use crate::options::{AxisOptions, AxisScale, BasePlotOptions, PlotOptions};
use derive_builder::Builder;

/// Options for 3D surface (trisurf) plots
///
/// Axis names follow the data: `x_axis` and `y_axis` span the ground plane,
/// `z_axis` is the height. The view angles are passed to the plotters 3D
/// projection.
///
/// # Example
///
/// ```rust,no_run
/// use hashbench_plots::options::SurfacePlotOptions;
/// use hashbench_plots::colormap::ColorMaps;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = SurfacePlotOptions::new()
///     .colormap(ColorMaps::Plasma)
///     .yaw(0.7)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Clone, Debug)]
#[builder(setter(into, strip_option), default)]
pub struct SurfacePlotOptions {
    /// Base plot options (layout, dimensions, etc.)
    #[builder(default)]
    pub base: BasePlotOptions,

    /// Ground plane axis drawn left to right
    #[builder(default = "AxisOptions::labelled(\"Key Size\", AxisScale::PowerOfTwo)")]
    pub x_axis: AxisOptions,

    /// Ground plane axis drawn front to back
    #[builder(default = "AxisOptions::labelled(\"Insertions\", AxisScale::PowerOfTwo)")]
    pub y_axis: AxisOptions,

    /// Height axis
    #[builder(default = "AxisOptions::labelled(\"Insertion time\", AxisScale::Log10)")]
    pub z_axis: AxisOptions,

    /// Color map used to shade triangles by height
    #[builder(default = "ColorMaps::Viridis")]
    pub colormap: ColorMaps,

    /// Rotation around the vertical axis, radians
    #[builder(default = "0.6")]
    pub yaw: f64,

    /// Elevation of the camera, radians
    #[builder(default = "0.45")]
    pub pitch: f64,

    /// Projection zoom
    #[builder(default = "0.75")]
    pub scale: f64,

    /// Outline every triangle
    #[builder(default = "true")]
    pub wireframe: bool,
}

impl Default for SurfacePlotOptions {
    fn default() -> Self {
        Self {
            base: BasePlotOptions::default(),
            x_axis: AxisOptions::labelled("Key Size", AxisScale::PowerOfTwo),
            y_axis: AxisOptions::labelled("Insertions", AxisScale::PowerOfTwo),
            z_axis: AxisOptions::labelled("Insertion time", AxisScale::Log10),
            colormap: ColorMaps::Viridis,
            yaw: 0.6,
            pitch: 0.45,
            scale: 0.75,
            wireframe: true,
        }
    }
}

impl PlotOptions for SurfacePlotOptions {
    fn base(&self) -> &BasePlotOptions {
        &self.base
    }
}

impl SurfacePlotOptions {
    /// Create a new builder for SurfacePlotOptions
    pub fn new() -> SurfacePlotOptionsBuilder {
        SurfacePlotOptionsBuilder::default()
    }
}
