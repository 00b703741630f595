use crate::figure::{LinePanel, SurfacePanel};
use crate::options::{
    AxisOptions, AxisScale, BasePlotOptions, FigureOptions, LogLogPlotOptionsBuilder,
    SurfacePlotOptionsBuilder,
};
use anyhow::Result;

/// Create a SurfacePlotOptions builder for one surface panel of the figure
///
/// Both ground axes are power-of-two benchmark dimensions; the height axis
/// is time on a log10 scale. The panel title and labels come from the
/// selection, the color map from the figure. The returned builder can be
/// customized further.
///
/// # Example
///
/// ```rust,ignore
/// use hashbench_plots::helpers::surface_options;
///
/// let options = surface_options(&panel, &figure_options)?
///     .yaw(0.9)
///     .build()?;
/// ```
pub fn surface_options(
    panel: &SurfacePanel,
    figure: &FigureOptions,
) -> Result<SurfacePlotOptionsBuilder> {
    let base = BasePlotOptions::new()
        .title(panel.title.as_str())
        .margin(figure.base.margin)
        .build()?;

    let mut builder = SurfacePlotOptionsBuilder::default();
    builder
        .base(base)
        .x_axis(AxisOptions::labelled(&panel.x_label, AxisScale::PowerOfTwo))
        .y_axis(AxisOptions::labelled(&panel.y_label, AxisScale::PowerOfTwo))
        .z_axis(AxisOptions::labelled(&panel.z_label, AxisScale::Log10))
        .colormap(figure.colormap);
    Ok(builder)
}

/// Create a LogLogPlotOptions builder for one line panel of the figure
pub fn line_options(panel: &LinePanel) -> Result<LogLogPlotOptionsBuilder> {
    let base = BasePlotOptions::new().title(panel.title.as_str()).build()?;

    let mut builder = LogLogPlotOptionsBuilder::default();
    builder
        .base(base)
        .x_axis(AxisOptions::labelled(&panel.x_label, AxisScale::PowerOfTwo))
        .y_axis(AxisOptions::labelled(&panel.y_label, AxisScale::Log10));
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plots::NamedSeries;
    use hashbench_results::{Series2, Series3};
    use ndarray::array;

    #[test]
    fn test_panel_options_take_title_and_margin() {
        let figure = FigureOptions::new()
            .base(BasePlotOptions::new().margin(24u32).build().unwrap())
            .build()
            .unwrap();
        let surface = SurfacePanel {
            title: "hashmap_t".to_string(),
            x_label: "Key Size".to_string(),
            y_label: "Insertions".to_string(),
            z_label: "Insertion time (ns)".to_string(),
            series: Series3 {
                x: array![0.6],
                y: array![0.0],
                z: array![1.0],
            },
        };
        let options = surface_options(&surface, &figure).unwrap().build().unwrap();
        assert_eq!(options.base.title, "hashmap_t");
        assert_eq!(options.base.margin, 24);
        assert_eq!(options.y_axis.label.as_deref(), Some("Insertions"));
        assert_eq!(options.colormap, figure.colormap);

        let line = LinePanel {
            title: "Insertions: 256".to_string(),
            insertions: 256,
            x_label: "Key Size".to_string(),
            y_label: "Insertion time (ns)".to_string(),
            series: vec![NamedSeries::new(
                "hashmap_t",
                Series2 {
                    x: array![4.0],
                    y: array![10.0],
                },
            )],
        };
        let options = line_options(&line).unwrap().build().unwrap();
        assert_eq!(options.base.title, "Insertions: 256");
        assert_eq!(options.x_axis.scale, AxisScale::PowerOfTwo);
        assert_eq!(options.base.x_label_area_size, BasePlotOptions::default().x_label_area_size);
    }
}
