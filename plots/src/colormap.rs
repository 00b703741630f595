use colorgrad::Gradient;
use plotters::style::RGBColor;
use strum_macros::{Display, EnumString};

/// Color map options for surface shading
///
/// All variants are perceptually uniform sequential maps from `colorgrad`,
/// so height differences on a surface read the same across the range.
///
/// - **Default choice**: `Viridis` - perceptually uniform, colorblind-friendly
/// - **High contrast**: `Plasma`, `Inferno`, `Magma`
/// - **Print-friendly**: `Cividis`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ColorMaps {
    /// Viridis - perceptually uniform, colorblind-friendly (default)
    #[default]
    Viridis,
    /// Plasma - perceptually uniform, high contrast
    Plasma,
    /// Inferno - perceptually uniform, dark background friendly
    Inferno,
    /// Magma - perceptually uniform, dark to bright
    Magma,
    /// Turbo - vibrant, wide hue range
    Turbo,
    /// Cividis - colorblind-friendly, optimized for printing
    Cividis,
}

impl ColorMaps {
    /// Map a normalized value to a color
    ///
    /// # Arguments
    /// * `value` - Normalized height between 0.0 and 1.0 (clamped)
    ///
    /// # Returns
    /// An RGB color as `RGBColor(r, g, b)` where each component is 0-255
    pub fn map(&self, value: f32) -> RGBColor {
        let clamped_value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };

        // colorgrad Color has r, g, b, a as f32 in range [0.0, 1.0]
        let color = match self {
            ColorMaps::Viridis => colorgrad::preset::viridis().at(clamped_value),
            ColorMaps::Plasma => colorgrad::preset::plasma().at(clamped_value),
            ColorMaps::Inferno => colorgrad::preset::inferno().at(clamped_value),
            ColorMaps::Magma => colorgrad::preset::magma().at(clamped_value),
            ColorMaps::Turbo => colorgrad::preset::turbo().at(clamped_value),
            ColorMaps::Cividis => colorgrad::preset::cividis().at(clamped_value),
        };

        RGBColor(
            (color.r * 255.0).round() as u8,
            (color.g * 255.0).round() as u8,
            (color.b * 255.0).round() as u8,
        )
    }

    /// Map `value` within `[min, max]` to a color
    pub fn map_range(&self, value: f64, min: f64, max: f64) -> RGBColor {
        let span = max - min;
        let t = if span > 0.0 { (value - min) / span } else { 0.5 };
        self.map(t as f32)
    }
}
