//! Display formatting for sensor readings.

use alloc::format;
use alloc::string::{String, ToString};

use crate::{parse_reading, MetricField, Sample};

/// Text shown for a reading that is absent or not a number.
pub const PLACEHOLDER: &str = "--";

/// Format a raw reading for display.
///
/// The value is rounded to two decimals and suffixed with the unit of the
/// field named by `id`. Unrecognized identifiers get no unit.
///
/// ```rust
/// use envwatch_types::format_metric;
///
/// assert_eq!(format_metric("temperature", Some("23.456")), "23.46 °C");
/// assert_eq!(format_metric("temperature", None), "--");
/// assert_eq!(format_metric("unknownField", Some("5")), "5.00");
/// ```
pub fn format_metric(id: &str, raw: Option<&str>) -> String {
    let value = parse_reading(raw);
    match MetricField::from_id(id) {
        Some(field) => field.format(value),
        None => format_value(value, None),
    }
}

impl MetricField {
    /// Format an already parsed value of this field.
    pub fn format(self, value: Option<f64>) -> String {
        format_value(value, Some(self.unit()))
    }
}

fn format_value(value: Option<f64>, unit: Option<&str>) -> String {
    match (value.map(round_ties_away), unit) {
        (None, _) => PLACEHOLDER.to_string(),
        (Some(v), Some(unit)) => format!("{:.2} {}", v, unit),
        (Some(v), None) => format!("{:.2}", v),
    }
}

/// Resolve exact two-decimal ties away from zero before `{:.2}`, which
/// would otherwise round them to even.
///
/// A value lies exactly halfway between two hundredths only when it is an
/// odd multiple of 1/8 (`x.125`, `x.375`, `x.625`, `x.875`).
fn round_ties_away(v: f64) -> f64 {
    let eighths = (v * 8.0) % 2.0;
    if eighths != 1.0 && eighths != -1.0 {
        return v;
    }
    // Exact: the scaled tie is an integer plus one half
    let scaled = v * 100.0;
    let away = if v < 0.0 { scaled - 0.5 } else { scaled + 0.5 };
    away / 100.0
}

/// A reading ready for display.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FormattedMetric {
    /// Which reading this is.
    pub field: MetricField,
    /// Formatted value with unit, or [`PLACEHOLDER`].
    pub text: String,
}

impl FormattedMetric {
    /// Check if the reading was unknown.
    pub fn is_placeholder(&self) -> bool {
        self.text == PLACEHOLDER
    }
}

/// Format all six readings of a sample, in display order.
pub fn format_sample(sample: &Sample) -> [FormattedMetric; 6] {
    MetricField::ALL.map(|field| FormattedMetric {
        field,
        text: field.format(sample.get(field)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals_with_unit() {
        assert_eq!(format_metric("temperature", Some("23.456")), "23.46 °C");
        assert_eq!(format_metric("humidity", Some("80")), "80.00 %");
        assert_eq!(format_metric("waterLevel", Some("7.1")), "7.10 cm");
        assert_eq!(format_metric("soilMoisture", Some("19.999")), "20.00 %");
        assert_eq!(format_metric("pressure", Some("1013.2")), "1013.20 hPa");
        assert_eq!(format_metric("totalrain", Some("0")), "0.00 mm");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(format_metric("temperature", Some("0.125")), "0.13 °C");
        assert_eq!(format_metric("temperature", Some("-0.125")), "-0.13 °C");
        assert_eq!(format_metric("humidity", Some("2.375")), "2.38 %");
        assert_eq!(format_metric("pressure", Some("1012.625")), "1012.63 hPa");
        assert_eq!(format_metric("unknownField", Some("0.875")), "0.88");
    }

    #[test]
    fn near_ties_follow_the_stored_value() {
        // 1.005 is stored just below the tie, 0.135 just above it
        assert_eq!(format_metric("totalrain", Some("1.005")), "1.00 mm");
        assert_eq!(format_metric("totalrain", Some("0.135")), "0.14 mm");
        assert_eq!(format_metric("waterLevel", Some("2.5")), "2.50 cm");
    }

    #[test]
    fn missing_or_garbage_shows_placeholder() {
        assert_eq!(format_metric("temperature", None), "--");
        assert_eq!(format_metric("temperature", Some("")), "--");
        assert_eq!(format_metric("pressure", Some("offline")), "--");
        assert_eq!(format_metric("unknownField", None), "--");
    }

    #[test]
    fn unknown_field_has_no_unit() {
        assert_eq!(format_metric("unknownField", Some("5")), "5.00");
        assert_eq!(format_metric("rain", Some("2.5")), "2.50");
    }

    #[test]
    fn format_sample_keeps_display_order() {
        let sample = Sample::builder().temperature(21.0).rain(3.333).build();
        let metrics = format_sample(&sample);

        let ids: alloc::vec::Vec<&str> = metrics.iter().map(|m| m.field.id()).collect();
        assert_eq!(
            ids,
            ["temperature", "humidity", "waterLevel", "soilMoisture", "pressure", "totalrain"]
        );
        assert_eq!(metrics[0].text, "21.00 °C");
        assert!(metrics[1].is_placeholder());
        assert_eq!(metrics[5].text, "3.33 mm");
    }
}
