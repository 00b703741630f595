use derive_builder::Builder;
use std::f64::consts::LOG10_2;

/// How an axis maps data onto plotting coordinates and back into tick labels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AxisScale {
    /// Plain numbers
    Linear,
    /// Decades; ticks are labelled with the original value in compact notation
    #[default]
    Log10,
    /// Powers of two; ticks land on integral exponents and are labelled `4`, `16`, `256`...
    PowerOfTwo,
}

impl AxisScale {
    /// Convert a log10 value (as returned by the `*_3d` filters) into this axis' plotting coordinate
    pub fn from_log10(&self, value: f64) -> f64 {
        match self {
            AxisScale::Linear => 10f64.powf(value),
            AxisScale::Log10 => value,
            AxisScale::PowerOfTwo => value / LOG10_2,
        }
    }

    /// Convert a raw data value into this axis' plotting coordinate
    pub fn to_coord(&self, value: f64) -> f64 {
        match self {
            AxisScale::Linear => value,
            AxisScale::Log10 => value.log10(),
            AxisScale::PowerOfTwo => value.log2(),
        }
    }

    /// Tick label for a plotting coordinate produced by [`AxisScale::from_log10`] or [`AxisScale::to_coord`]
    pub fn format_coord(&self, coord: f64) -> String {
        match self {
            AxisScale::Linear => format_compact(coord),
            AxisScale::Log10 => format_compact(10f64.powf(coord)),
            AxisScale::PowerOfTwo => power_of_two_label(coord),
        }
    }

    /// Tick label for a raw data value on a plotters log axis
    pub fn format_value(&self, value: f64) -> String {
        match self {
            AxisScale::PowerOfTwo if value > 0.0 => power_of_two_label(value.log2()),
            AxisScale::PowerOfTwo => String::new(),
            AxisScale::Linear | AxisScale::Log10 => format_compact(value),
        }
    }
}

/// Label `2^exponent` as an integer when the exponent is integral, otherwise nothing
///
/// Surface axes are drawn in log2 space, so only integral positions are real
/// powers of two; blank labels keep the in-between ticks quiet.
pub fn power_of_two_label(exponent: f64) -> String {
    let rounded = exponent.round();
    if !exponent.is_finite() || (exponent - rounded).abs() > 1e-6 {
        return String::new();
    }
    if (0.0..64.0).contains(&rounded) {
        (1u64 << rounded as u32).to_string()
    } else {
        format_compact(2f64.powf(rounded))
    }
}

/// Short human-readable number: `12`, `3.5`, `0.25`, `1.5e6`
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let abs = value.abs();
    if abs == 0.0 {
        return "0".to_string();
    }
    if (1e-2..1e5).contains(&abs) {
        let fixed = format!("{:.2}", value);
        fixed
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        format!("{:.1e}", value)
    }
}

/// Options for configuring a plot axis
///
/// Controls the scale and label for a single axis.
///
/// # Example
///
/// ```rust,no_run
/// use hashbench_plots::options::{AxisOptions, AxisScale};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let axis = AxisOptions::new()
///     .scale(AxisScale::PowerOfTwo)
///     .label("Key Size")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Clone, Debug, Default)]
#[builder(setter(into, strip_option), default)]
pub struct AxisOptions {
    /// Scale used for coordinates and tick labels
    pub scale: AxisScale,

    /// Optional axis label
    pub label: Option<String>,
}

impl AxisOptions {
    /// Create a new builder for AxisOptions
    pub fn new() -> AxisOptionsBuilder {
        AxisOptionsBuilder::default()
    }

    /// Shorthand for an axis with a label and scale
    pub fn labelled(label: impl Into<String>, scale: AxisScale) -> Self {
        Self {
            scale,
            label: Some(label.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_power_of_two_labels() {
        assert_eq!(power_of_two_label(0.0), "1");
        assert_eq!(power_of_two_label(2.0), "4");
        assert_eq!(power_of_two_label(8.0), "256");
        assert_eq!(power_of_two_label(16.0), "65536");
        assert_eq!(power_of_two_label(2.5), "");
        assert_eq!(power_of_two_label(f64::NAN), "");
        assert_eq!(power_of_two_label(-1.0), "0.5");
    }

    #[test]
    fn test_power_of_two_tolerates_float_noise() {
        // log10(256) / log10(2) is not exactly 8.0 in floating point
        let coord = AxisScale::PowerOfTwo.from_log10(256f64.log10());
        assert_relative_eq!(coord, 8.0, epsilon = 1e-9);
        assert_eq!(AxisScale::PowerOfTwo.format_coord(coord), "256");
    }

    #[test]
    fn test_format_value_on_log_axes() {
        assert_eq!(AxisScale::PowerOfTwo.format_value(1024.0), "1024");
        assert_eq!(AxisScale::PowerOfTwo.format_value(1000.0), "");
        assert_eq!(AxisScale::PowerOfTwo.format_value(0.0), "");
        assert_eq!(AxisScale::Log10.format_value(1000.0), "1000");
    }

    #[test]
    fn test_to_coord_round_trips_through_labels() {
        assert_relative_eq!(AxisScale::PowerOfTwo.to_coord(256.0), 8.0);
        assert_relative_eq!(AxisScale::Log10.to_coord(1000.0), 3.0, epsilon = 1e-12);
        assert_relative_eq!(AxisScale::Linear.to_coord(12.5), 12.5);
        for key_size in [4.0, 16.0, 64.0, 256.0] {
            let coord = AxisScale::PowerOfTwo.to_coord(key_size);
            assert_eq!(AxisScale::PowerOfTwo.format_coord(coord), format!("{key_size}"));
        }
    }

    #[test]
    fn test_log10_axis_labels_original_values() {
        assert_eq!(AxisScale::Log10.format_coord(3.0), "1000");
        assert_eq!(AxisScale::Log10.format_coord(6.0), "1.0e6");
        assert_relative_eq!(AxisScale::Log10.from_log10(2.5), 2.5);
        assert_relative_eq!(AxisScale::Linear.from_log10(2.0), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(0.0), "0");
        assert_eq!(format_compact(12.0), "12");
        assert_eq!(format_compact(3.5), "3.5");
        assert_eq!(format_compact(0.25), "0.25");
        assert_eq!(format_compact(1_500_000.0), "1.5e6");
        assert_eq!(format_compact(0.001), "1.0e-3");
        assert_eq!(format_compact(f64::INFINITY), "");
    }

    #[test]
    fn test_axis_builder() {
        let axis = AxisOptions::new()
            .scale(AxisScale::PowerOfTwo)
            .label("Insertions")
            .build()
            .unwrap();
        assert_eq!(axis.scale, AxisScale::PowerOfTwo);
        assert_eq!(axis.label.as_deref(), Some("Insertions"));

        let default_axis = AxisOptions::default();
        assert_eq!(default_axis.scale, AxisScale::Log10);
        assert!(default_axis.label.is_none());
    }
}
