//! The 2x2 report figure.
//!
//! The top row holds one surface per hashmap, the bottom row compares both
//! maps on log-log axes at a low and a high insertion count. Panel data is
//! selected up front by [`FigurePanels::build`] so the same selection can be
//! rendered and exported.

use crate::helpers::{line_options, surface_options};
use crate::options::{FigureOptions, SurfaceMode};
use crate::plots::{LogLogPlot, NamedSeries, Plot, SurfacePlot};
use crate::render::{ProgressInfo, RenderConfig};
use anyhow::{Context, Result, anyhow};
use hashbench_results::filter::{
    filter_insertions_3d, filter_value_size_3d, filter_value_size_insertions,
};
use hashbench_results::{Sample, Series3};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

/// Samples of the two maps being compared
#[derive(Clone, Debug, Default)]
pub struct FigureData {
    pub library: Vec<Sample>,
    pub reference: Vec<Sample>,
}

/// A surface panel: log10 (key size, second dimension, time)
#[derive(Clone, Debug, Serialize)]
pub struct SurfacePanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub z_label: String,
    pub series: Series3,
}

/// A log-log panel: (key size, time) for each map at one insertion count
#[derive(Clone, Debug, Serialize)]
pub struct LinePanel {
    pub title: String,
    pub insertions: u64,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<NamedSeries>,
}

/// Selected data for every panel of the figure
#[derive(Clone, Debug, Serialize)]
pub struct FigurePanels {
    pub surfaces: Vec<SurfacePanel>,
    pub lines: Vec<LinePanel>,
}

impl FigurePanels {
    /// Select the data for all four panels
    ///
    /// Fails when any selection is empty, naming the map and the selection.
    pub fn build(data: &FigureData, options: &FigureOptions) -> Result<Self> {
        let maps = [
            (options.library_label.as_str(), data.library.as_slice()),
            (options.reference_label.as_str(), data.reference.as_slice()),
        ];
        let time_label = options.time_label("Insertion time");

        let mut surfaces = Vec::with_capacity(maps.len());
        for (label, samples) in maps {
            let (series, y_label) = match options.surface_mode {
                SurfaceMode::Insertions => (
                    filter_value_size_3d(samples, options.value_size),
                    "Insertions",
                ),
                SurfaceMode::ValueSize => (
                    filter_insertions_3d(samples, options.surface_insertions),
                    "Value Size",
                ),
            };
            let series = series.with_context(|| format!("no surface data for {label}"))?;
            debug!("Surface panel '{}': {} points", label, series.len());
            surfaces.push(SurfacePanel {
                title: label.to_string(),
                x_label: "Key Size".to_string(),
                y_label: y_label.to_string(),
                z_label: time_label.clone(),
                series,
            });
        }

        let mut lines = Vec::with_capacity(2);
        for insertions in [options.low_insertions, options.high_insertions] {
            let mut series = Vec::with_capacity(maps.len());
            for (label, samples) in maps {
                let selected = filter_value_size_insertions(samples, options.value_size, insertions)
                    .with_context(|| format!("no line data for {label}"))?;
                series.push(NamedSeries::new(label, selected));
            }
            lines.push(LinePanel {
                title: format!(
                    "value size {}, {} insertion{}",
                    options.value_size,
                    insertions,
                    if insertions == 1 { "" } else { "s" }
                ),
                insertions,
                x_label: "Key Size".to_string(),
                y_label: time_label.clone(),
                series,
            });
        }

        Ok(Self { surfaces, lines })
    }

    pub fn panel_count(&self) -> usize {
        self.surfaces.len() + self.lines.len()
    }
}

/// The 2x2 comparison figure
#[derive(Clone, Copy, Debug, Default)]
pub struct ReportFigure;

impl Plot for ReportFigure {
    type Options = FigureOptions;
    type Data = FigurePanels;

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        data: &Self::Data,
        options: &Self::Options,
        render_config: &mut RenderConfig,
    ) -> Result<()> {
        let cells = if options.base.title.is_empty() {
            area.split_evenly((2, 2))
        } else {
            area.titled(&options.base.title, ("sans-serif", 28))
                .map_err(|e| anyhow!("failed to draw figure title: {e}"))?
                .split_evenly((2, 2))
        };

        let total = data.panel_count();
        let mut completed = 0;
        let mut cells = cells.iter();

        for panel in &data.surfaces {
            let cell = cells
                .next()
                .ok_or_else(|| anyhow!("figure has more panels than grid cells"))?;
            let panel_options = surface_options(panel, options)?.build()?;
            SurfacePlot.draw(cell, &panel.series, &panel_options, render_config)?;
            completed += 1;
            render_config.report_progress(ProgressInfo {
                panel: panel.title.clone(),
                completed,
                total,
            });
        }

        for panel in &data.lines {
            let cell = cells
                .next()
                .ok_or_else(|| anyhow!("figure has more panels than grid cells"))?;
            let panel_options = line_options(panel)?.build()?;
            LogLogPlot.draw(cell, &panel.series, &panel_options, render_config)?;
            completed += 1;
            render_config.report_progress(ProgressInfo {
                panel: panel.title.clone(),
                completed,
                total,
            });
        }

        info!("Drew {} figure panels", completed);
        Ok(())
    }
}
