use crate::options::{AxisOptions, SurfacePlotOptions};
use crate::plots::traits::Plot;
use crate::render::RenderConfig;
use crate::surface_calc::{SurfaceGrid, Triangle};
use crate::{PlotRange, axis_bounds, label_count};
use anyhow::{Result, anyhow, bail};
use hashbench_results::Series3;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

/// Shaded 3D surface (trisurf) plot
///
/// Data is a [`Series3`] of log10 values as produced by the `*_3d` filters:
/// `x` and `y` span the ground plane and `z` is the height. Each axis maps
/// the log10 values into its own plotting coordinates (see
/// [`crate::options::AxisScale`]), so power-of-two dimensions get ticks on
/// integral exponents.
///
/// Plotters' 3D coordinate system is (x, vertical, depth), so the data's
/// `y` is drawn along the depth axis and its `z` along the vertical one.
///
/// # Example
///
/// ```rust,no_run
/// use hashbench_plots::{Plot, SurfacePlot};
/// use hashbench_plots::options::SurfacePlotOptions;
/// use hashbench_plots::render::{OutputFormat, RenderConfig};
/// use hashbench_results::Series3;
/// use ndarray::array;
///
/// # fn main() -> anyhow::Result<()> {
/// let data = Series3 {
///     x: array![0.6, 1.2, 0.6, 1.2],
///     y: array![0.0, 0.0, 2.4, 2.4],
///     z: array![1.0, 1.3, 2.1, 2.6],
/// };
/// let options = SurfacePlotOptions::new().build()?;
/// let bytes = SurfacePlot.render(&data, &options, OutputFormat::Png, &mut RenderConfig::default())?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfacePlot;

impl SurfacePlot {
    pub fn new() -> Self {
        Self
    }
}

fn axis_title(axis: &AxisOptions) -> String {
    axis.label.clone().unwrap_or_default()
}

fn span(range: &PlotRange) -> f64 {
    range.end - range.start
}

/// Share of a ground axis' span added at each end
///
/// Without it the last tick of one ground axis and the first tick of the
/// other meet at the shared corner and their labels overprint.
const GROUND_PADDING: f64 = 0.05;

fn pad(range: PlotRange, fraction: f64) -> PlotRange {
    let margin = span(&range) * fraction;
    (range.start - margin)..(range.end + margin)
}

/// Chart positions (x, vertical, depth) of the x, depth and height axis titles
///
/// Each title sits outside the box, beyond the far end of the axis it names
/// is measured along, so none of them lands on the surface.
fn title_positions(
    x_range: &PlotRange,
    height_range: &PlotRange,
    depth_range: &PlotRange,
) -> [(f64, f64, f64); 3] {
    let x_mid = x_range.start + span(x_range) / 2.0;
    let depth_mid = depth_range.start + span(depth_range) / 2.0;
    [
        (
            x_mid,
            height_range.start,
            depth_range.end + 0.25 * span(depth_range),
        ),
        (
            x_range.end + 0.2 * span(x_range),
            height_range.start,
            depth_mid,
        ),
        (
            x_range.start,
            height_range.end + 0.08 * span(height_range),
            depth_range.end,
        ),
    ]
}

/// Swap data (x, y, height) into plotters (x, vertical, depth)
fn to_chart(vertex: (f64, f64, f64)) -> (f64, f64, f64) {
    let (x, y, height) = vertex;
    (x, height, y)
}

fn outline(triangle: &Triangle) -> Vec<(f64, f64, f64)> {
    let mut points: Vec<_> = triangle.vertices.iter().copied().map(to_chart).collect();
    points.push(to_chart(triangle.vertices[0]));
    points
}

impl Plot for SurfacePlot {
    type Options = SurfacePlotOptions;
    type Data = Series3;

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        data: &Self::Data,
        options: &Self::Options,
        _render_config: &mut RenderConfig,
    ) -> Result<()> {
        let x_scale = options.x_axis.scale;
        let y_scale = options.y_axis.scale;
        let z_scale = options.z_axis.scale;
        let title = &options.base.title;

        let grid = SurfaceGrid::from_points(data.points().map(|(x, y, z)| {
            (
                x_scale.from_log10(x),
                y_scale.from_log10(y),
                z_scale.from_log10(z),
            )
        }))
        .map_err(|e| anyhow!("surface '{title}': {e}"))?;

        let triangles = grid.triangles();
        if triangles.is_empty() {
            bail!("surface '{title}' needs three measured points that are not collinear");
        }
        let (z_min, z_max) = grid
            .z_range()
            .ok_or_else(|| anyhow!("surface '{title}' has no finite heights"))?;
        debug!(
            "Surface '{}': {} of {} grid points filled, {} triangles",
            title,
            grid.filled(),
            grid.z.len(),
            triangles.len()
        );

        // from_points guarantees at least two values per axis
        let x_range = pad(
            axis_bounds(x_scale, grid.xs[0], grid.xs[grid.xs.len() - 1]),
            GROUND_PADDING,
        );
        let depth_range = pad(
            axis_bounds(y_scale, grid.ys[0], grid.ys[grid.ys.len() - 1]),
            GROUND_PADDING,
        );
        let height_range = axis_bounds(z_scale, z_min, z_max);

        let mut builder = ChartBuilder::on(area);
        builder.margin(options.base.margin);
        if !title.is_empty() {
            builder.caption(title, ("sans-serif", 20));
        }
        let mut chart = builder
            .build_cartesian_3d(x_range.clone(), height_range.clone(), depth_range.clone())
            .map_err(|e| anyhow!("failed to build surface chart: {e}"))?;

        chart.with_projection(|mut pb| {
            pb.yaw = options.yaw;
            pb.pitch = options.pitch;
            pb.scale = options.scale;
            pb.into_matrix()
        });

        let format_x = move |v: &f64| x_scale.format_coord(*v);
        let format_height = move |v: &f64| z_scale.format_coord(*v);
        let format_depth = move |v: &f64| y_scale.format_coord(*v);

        chart
            .configure_axes()
            .light_grid_style(BLACK.mix(0.1))
            .max_light_lines(3)
            .x_labels(label_count(x_scale, &x_range))
            .y_labels(label_count(z_scale, &height_range))
            .z_labels(label_count(y_scale, &depth_range))
            .x_formatter(&format_x)
            .y_formatter(&format_height)
            .z_formatter(&format_depth)
            .draw()
            .map_err(|e| anyhow!("failed to draw surface axes: {e}"))?;

        let colormap = options.colormap;
        chart
            .draw_series(triangles.iter().map(|triangle| {
                let color = colormap.map_range(triangle.mean_height(), z_min, z_max);
                Polygon::new(
                    triangle.vertices.iter().copied().map(to_chart).collect::<Vec<_>>(),
                    color.mix(0.9).filled(),
                )
            }))
            .map_err(|e| anyhow!("failed to draw surface: {e}"))?;

        if options.wireframe {
            chart
                .draw_series(
                    triangles
                        .iter()
                        .map(|triangle| PathElement::new(outline(triangle), BLACK.mix(0.3))),
                )
                .map_err(|e| anyhow!("failed to draw surface wireframe: {e}"))?;
        }

        let label_style = ("sans-serif", 14);
        let titles = [
            axis_title(&options.x_axis),
            axis_title(&options.y_axis),
            axis_title(&options.z_axis),
        ]
        .into_iter()
        .zip(title_positions(&x_range, &height_range, &depth_range));
        chart
            .draw_series(
                titles
                    .filter(|(text, _)| !text.is_empty())
                    .map(|(text, position)| Text::new(text, position, label_style)),
            )
            .map_err(|e| anyhow!("failed to draw surface axis titles: {e}"))?;

        Ok(())
    }
}
