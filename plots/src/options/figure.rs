use crate::colormap::ColorMaps;
use crate::options::{BasePlotOptions, PlotOptions};
use derive_builder::Builder;
use strum_macros::{Display, EnumString};

/// Which selection the two surface panels show
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum SurfaceMode {
    /// Key size × insertions at the figure's fixed value size
    #[default]
    Insertions,
    /// Key size × value size at a fixed insertion count
    ValueSize,
}

/// Options for the 2x2 comparison figure
///
/// The two top panels are surfaces for the library and the reference map.
/// The bottom panels compare both maps on log-log axes at `low_insertions`
/// and `high_insertions`.
///
/// # Example
///
/// ```rust,no_run
/// use hashbench_plots::options::{FigureOptions, SurfaceMode};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = FigureOptions::new()
///     .value_size(256u64)
///     .high_insertions(1024u64)
///     .surface_mode(SurfaceMode::ValueSize)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Clone, Debug)]
#[builder(setter(into, strip_option), default)]
pub struct FigureOptions {
    /// Overall figure size and title
    #[builder(default = "FigureOptions::default_base()")]
    pub base: BasePlotOptions,

    /// Legend and title label of the map under test
    #[builder(default = "\"hashmap_t\".to_string()")]
    pub library_label: String,

    /// Legend and title label of the map it is compared to
    #[builder(default = "\"std::unordered_map\".to_string()")]
    pub reference_label: String,

    /// Value size held fixed by the surfaces (insertions mode) and both line panels
    #[builder(default = "256")]
    pub value_size: u64,

    /// Insertion count of the bottom-left panel
    #[builder(default = "1")]
    pub low_insertions: u64,

    /// Insertion count of the bottom-right panel
    #[builder(default = "256")]
    pub high_insertions: u64,

    /// Selection shown by the surface panels
    #[builder(default)]
    pub surface_mode: SurfaceMode,

    /// Insertion count held fixed by the surfaces in value-size mode
    #[builder(default = "16")]
    pub surface_insertions: u64,

    /// Color map for surface shading
    #[builder(default)]
    pub colormap: ColorMaps,

    /// Time unit appended to the time axis labels, e.g. `ns`
    pub time_unit: Option<String>,
}

impl FigureOptions {
    /// Create a new builder for FigureOptions
    pub fn new() -> FigureOptionsBuilder {
        FigureOptionsBuilder::default()
    }

    fn default_base() -> BasePlotOptions {
        BasePlotOptions {
            width: 1600,
            height: 1200,
            ..BasePlotOptions::default()
        }
    }

    /// Label for time axes, with the unit when known
    pub fn time_label(&self, label: &str) -> String {
        match &self.time_unit {
            Some(unit) => format!("{label} ({unit})"),
            None => label.to_string(),
        }
    }
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            base: Self::default_base(),
            library_label: "hashmap_t".to_string(),
            reference_label: "std::unordered_map".to_string(),
            value_size: 256,
            low_insertions: 1,
            high_insertions: 256,
            surface_mode: SurfaceMode::default(),
            surface_insertions: 16,
            colormap: ColorMaps::default(),
            time_unit: None,
        }
    }
}

impl PlotOptions for FigureOptions {
    fn base(&self) -> &BasePlotOptions {
        &self.base
    }
}
