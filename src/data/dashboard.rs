//! Dashboard view model built from one feed entry.

use chrono::{DateTime, Local, TimeZone};

use envwatch_adapters::FeedEntry;
use envwatch_types::{format_sample, FieldMaps, FormattedMetric, RiskEngine, RiskReport, Sample};

/// Everything the dashboard shows for one record.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Readings formatted for display, in display order.
    pub metrics: [FormattedMetric; 6],
    /// Readings the risk rules were evaluated on.
    pub rule_inputs: Sample,
    /// Outcome of the four risk rules.
    pub risks: RiskReport,
    /// `Last updated: …` line derived from the record timestamp.
    pub updated: Option<String>,
}

impl Dashboard {
    /// Parse, format and evaluate one entry.
    ///
    /// The displayed readings and the rule inputs are read through separate
    /// maps, so the same entry can yield different values for each.
    pub fn from_entry(entry: &FeedEntry, maps: &FieldMaps, engine: &RiskEngine) -> Self {
        let record = entry.to_record();
        let shown = Sample::from_record(&record, &maps.display);
        let rule_inputs = Sample::from_record(&record, &maps.rules);
        Self {
            metrics: format_sample(&shown),
            risks: engine.evaluate(&rule_inputs),
            rule_inputs,
            updated: entry
                .created_at
                .as_deref()
                .map(|raw| last_updated_line(raw, &Local)),
        }
    }
}

/// Render the record timestamp in the given zone.
///
/// Timestamps that are not RFC 3339 are shown as received.
pub fn last_updated_line<Tz>(raw: &str, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => format!(
            "Last updated: {}",
            ts.with_timezone(zone).format("%Y-%m-%d %H:%M:%S")
        ),
        Err(_) => format!("Last updated: {}", raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use envwatch_types::{RiskCategory, RiskLevel};

    fn storm_entry() -> FeedEntry {
        FeedEntry {
            created_at: Some("2025-06-01T10:00:00Z".to_string()),
            entry_id: Some(42),
            field1: Some("32".to_string()),
            field2: Some("85".to_string()),
            field3: Some("40".to_string()),
            field5: Some("995".to_string()),
            field6: Some("12".to_string()),
            field7: Some("1012".to_string()),
            ..Default::default()
        }
    }

    fn dashboard(entry: &FeedEntry) -> Dashboard {
        Dashboard::from_entry(entry, &FieldMaps::default(), &RiskEngine::default())
    }

    #[test]
    fn test_from_entry_formats_and_evaluates() {
        let dashboard = dashboard(&storm_entry());

        assert_eq!(dashboard.metrics[0].text, "32.00 °C");
        assert_eq!(dashboard.metrics[2].text, "12.00 cm");
        assert_eq!(dashboard.metrics[4].text, "1012.00 hPa");
        assert_eq!(dashboard.metrics[5].text, "12.00 mm");
        assert_eq!(dashboard.rule_inputs.pressure, Some(995.0));
        assert_eq!(
            dashboard.risks.get(RiskCategory::Thunderstorm).level,
            RiskLevel::Critical
        );
        assert_eq!(dashboard.risks.get(RiskCategory::Cyclone).level, RiskLevel::Low);
        assert!(dashboard.updated.is_some());
    }

    #[test]
    fn test_rules_read_pressure_from_field5() {
        let entry = FeedEntry {
            field5: Some("985".to_string()),
            field7: Some("1010".to_string()),
            ..Default::default()
        };
        let dashboard = dashboard(&entry);

        assert_eq!(dashboard.risks.get(RiskCategory::Cyclone).level, RiskLevel::High);
        assert_eq!(dashboard.metrics[4].text, "1010.00 hPa");
    }

    #[test]
    fn test_rules_read_water_level_from_field3() {
        let entry = FeedEntry {
            field3: Some("90".to_string()),
            field6: Some("10".to_string()),
            ..Default::default()
        };
        let dashboard = dashboard(&entry);

        assert_eq!(dashboard.risks.get(RiskCategory::Flood).level, RiskLevel::High);
        // Displayed water level still comes from field6
        assert_eq!(dashboard.metrics[2].text, "10.00 cm");
        assert_eq!(dashboard.metrics[3].text, "90.00 %");
    }

    #[test]
    fn test_rules_read_soil_moisture_from_field4() {
        let entry = FeedEntry {
            field2: Some("25".to_string()),
            field3: Some("60".to_string()),
            field4: Some("15".to_string()),
            ..Default::default()
        };
        let dashboard = dashboard(&entry);

        assert_eq!(dashboard.risks.get(RiskCategory::Drought).level, RiskLevel::High);
    }

    #[test]
    fn test_empty_entry_is_all_placeholders() {
        let dashboard = dashboard(&FeedEntry::default());

        assert!(dashboard.metrics.iter().all(|m| m.is_placeholder()));
        assert!(dashboard.rule_inputs.is_empty());
        assert_eq!(dashboard.risks.worst(), RiskLevel::Low);
        assert!(dashboard.updated.is_none());
    }

    #[test]
    fn test_last_updated_line_converts_zone() {
        assert_eq!(
            last_updated_line("2025-06-01T10:00:00Z", &Utc),
            "Last updated: 2025-06-01 10:00:00"
        );

        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(
            last_updated_line("2025-06-01T10:00:00Z", &ist),
            "Last updated: 2025-06-01 15:30:00"
        );
    }

    #[test]
    fn test_last_updated_line_keeps_unparsed_text() {
        assert_eq!(last_updated_line("yesterday", &Utc), "Last updated: yesterday");
    }
}
