use crate::{axis_bounds, label_count, log_axis_bounds};
use crate::options::LogLogPlotOptions;
use crate::plots::traits::Plot;
use crate::render::RenderConfig;
use anyhow::{Result, anyhow, bail};
use hashbench_results::Series2;
use itertools::{Itertools, MinMaxResult};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;

/// Line colors, cycled by series index
const SERIES_COLORS: [RGBColor; 4] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
];

pub fn series_color(index: usize) -> RGBColor {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// One legend entry and its points
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NamedSeries {
    pub label: String,
    pub series: Series2,
}

impl NamedSeries {
    pub fn new(label: impl Into<String>, series: Series2) -> Self {
        Self {
            label: label.into(),
            series,
        }
    }

    /// Points a log axis can show; zero, negative and non-finite values are dropped
    pub fn positive_points(&self) -> Vec<(f64, f64)> {
        self.series
            .points()
            .filter(|(x, y)| x.is_finite() && y.is_finite() && *x > 0.0 && *y > 0.0)
            .collect()
    }
}

fn value_bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    match values.minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v, v)),
        MinMaxResult::MinMax(lo, hi) => Some((lo, hi)),
    }
}

/// Line plot with logarithmic x and y axes, one line per series
///
/// The x axis follows its [`crate::options::AxisScale`]: a power-of-two
/// axis gets one tick per doubling, labelled `4`, `8`, `16`...
#[derive(Clone, Copy, Debug, Default)]
pub struct LogLogPlot;

impl LogLogPlot {
    pub fn new() -> Self {
        Self
    }
}

impl Plot for LogLogPlot {
    type Options = LogLogPlotOptions;
    type Data = Vec<NamedSeries>;

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        data: &Self::Data,
        options: &Self::Options,
        _render_config: &mut RenderConfig,
    ) -> Result<()> {
        let base = &options.base;
        let lines: Vec<(&NamedSeries, Vec<(f64, f64)>)> = data
            .iter()
            .map(|named| (named, named.positive_points()))
            .collect();

        let all_points = || lines.iter().flat_map(|(_, points)| points.iter().copied());
        let (Some((x_min, x_max)), Some((y_min, y_max))) = (
            value_bounds(all_points().map(|p| p.0)),
            value_bounds(all_points().map(|p| p.1)),
        ) else {
            bail!("log-log plot '{}' has no positive values to draw", base.title);
        };

        // x is drawn in its scale's coordinates so power-of-two ticks land on
        // integral exponents; y stays on a plotters log axis in raw units
        let x_scale = options.x_axis.scale;
        let y_scale = options.y_axis.scale;
        let x_range = axis_bounds(x_scale, x_scale.to_coord(x_min), x_scale.to_coord(x_max));
        let y_range = log_axis_bounds(y_scale, y_min, y_max);
        let lines: Vec<(&NamedSeries, Vec<(f64, f64)>)> = lines
            .into_iter()
            .map(|(named, points)| {
                let points = points
                    .into_iter()
                    .map(|(x, y)| (x_scale.to_coord(x), y))
                    .collect();
                (named, points)
            })
            .collect();

        let mut builder = ChartBuilder::on(area);
        builder
            .margin(base.margin)
            .x_label_area_size(base.x_label_area_size)
            .y_label_area_size(base.y_label_area_size);
        if !base.title.is_empty() {
            builder.caption(&base.title, ("sans-serif", 20));
        }
        let mut chart = builder
            .build_cartesian_2d(x_range.clone(), y_range.log_scale())
            .map_err(|e| anyhow!("failed to build log-log chart: {e}"))?;

        let format_x = move |v: &f64| x_scale.format_coord(*v);
        let format_y = move |v: &f64| y_scale.format_value(*v);

        let mut mesh = chart.configure_mesh();
        mesh.x_labels(label_count(x_scale, &x_range))
            .x_label_formatter(&format_x)
            .y_label_formatter(&format_y)
            .light_line_style(BLACK.mix(0.05));
        if let Some(label) = &options.x_axis.label {
            mesh.x_desc(label.as_str());
        }
        if let Some(label) = &options.y_axis.label {
            mesh.y_desc(label.as_str());
        }
        mesh.draw()
            .map_err(|e| anyhow!("failed to draw log-log mesh: {e}"))?;

        for (index, (named, points)) in lines.iter().enumerate() {
            let color = series_color(index);
            chart
                .draw_series(LineSeries::new(
                    points.iter().copied(),
                    color.stroke_width(options.line_width),
                ))
                .map_err(|e| anyhow!("failed to draw series '{}': {e}", named.label))?
                .label(named.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });

            if options.point_size > 0 {
                let radius = options.point_size as i32;
                chart
                    .draw_series(
                        points
                            .iter()
                            .map(|&point| Circle::new(point, radius, color.filled())),
                    )
                    .map_err(|e| anyhow!("failed to draw markers for '{}': {e}", named.label))?;
            }
        }

        if options.legend {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(|e| anyhow!("failed to draw legend: {e}"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_positive_points_drop_invalid_values() {
        let named = NamedSeries::new(
            "hashmap_t",
            Series2 {
                x: array![4.0, 0.0, 16.0, 64.0],
                y: array![10.0, 5.0, -1.0, f64::NAN],
            },
        );
        assert_eq!(named.positive_points(), vec![(4.0, 10.0)]);
    }

    #[test]
    fn test_value_bounds() {
        assert_eq!(value_bounds([3.0, 1.0, 2.0].into_iter()), Some((1.0, 3.0)));
        assert_eq!(value_bounds([5.0].into_iter()), Some((5.0, 5.0)));
        assert_eq!(value_bounds(std::iter::empty()), None);
    }

    #[test]
    fn test_series_colors_cycle() {
        assert_eq!(series_color(0), series_color(SERIES_COLORS.len()));
        assert_ne!(series_color(0), series_color(1));
    }
}
