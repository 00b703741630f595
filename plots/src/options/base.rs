use derive_builder::Builder;

/// Canvas size, margin and title shared by the surface, log-log and report charts
///
/// `width` and `height` size the output image when a chart is rendered on
/// its own. Inside the report figure each panel draws into its quarter of the
/// figure canvas, so a panel only uses `title`, `margin` and the label areas;
/// the figure's own `base` sets the image size and the overall title.
///
/// # Example
///
/// ```rust,no_run
/// use hashbench_plots::options::BasePlotOptions;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let base = BasePlotOptions::new()
///     .width(800u32)
///     .height(600u32)
///     .title("hashmap_t")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Clone, Debug)]
#[builder(setter(into, strip_option), default)]
pub struct BasePlotOptions {
    /// Plot width in pixels
    #[builder(default = "640")]
    pub width: u32,

    /// Plot height in pixels
    #[builder(default = "480")]
    pub height: u32,

    /// Margin around the plot area in pixels
    #[builder(default = "10")]
    pub margin: u32,

    /// Room below a log-log panel for key size ticks and the axis title
    #[builder(default = "50")]
    pub x_label_area_size: u32,

    /// Room left of a log-log panel for time ticks and the axis title
    #[builder(default = "60")]
    pub y_label_area_size: u32,

    /// Chart caption; empty draws none
    #[builder(default = "String::new()")]
    pub title: String,
}

impl Default for BasePlotOptions {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            margin: 10,
            x_label_area_size: 50,
            y_label_area_size: 60,
            title: String::new(),
        }
    }
}

impl BasePlotOptions {
    /// Create a new builder; unset fields take the standalone chart defaults
    pub fn new() -> BasePlotOptionsBuilder {
        BasePlotOptionsBuilder::default()
    }
}
