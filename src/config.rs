//! Layered runtime configuration.
//!
//! Values resolve in this order, later layers winning:
//! built-in defaults, an optional TOML file, `ENVWATCH_*` environment
//! variables (`__` separates sections, e.g. `ENVWATCH_FEED__CHANNEL_ID`),
//! then command-line overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use envwatch_types::{FieldMap, FieldMaps, MetricField};

/// Fully resolved settings. Read-only once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub feed: FeedSettings,
    pub poll: PollSettings,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Upstream fields shown on the dashboard.
    pub fields: FieldsSettings,
    /// Upstream fields the risk rules evaluate.
    pub risk_fields: FieldsSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedSettings {
    pub endpoint: String,
    pub channel_id: u64,
    #[serde(default)]
    pub read_api_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollSettings {
    pub interval_secs: u64,
}

/// Upstream field names for each logical reading.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldsSettings {
    pub temperature: String,
    pub humidity: String,
    pub water_level: String,
    pub soil_moisture: String,
    pub pressure: String,
    pub rain: String,
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub channel_id: Option<u64>,
    pub read_api_key: Option<String>,
    pub endpoint: Option<String>,
    pub interval_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

const ENV_PREFIX: &str = "ENVWATCH";

impl Settings {
    /// Load settings from defaults, an optional file, the environment and
    /// command-line overrides.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("feed.endpoint", envwatch_adapters::thingspeak::DEFAULT_ENDPOINT)?
            .set_default("feed.channel_id", 3035795_i64)?
            .set_default("feed.read_api_key", "5FOKR9WU2CNC3VWU")?
            .set_default("feed.timeout_secs", 10_i64)?
            .set_default("poll.interval_secs", 30_i64)?;

        for field in MetricField::ALL {
            builder = builder
                .set_default(field_key("fields", field), field.default_source())?
                .set_default(field_key("risk_fields", field), field.default_rule_source())?;
        }

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder
            .set_override_option("feed.channel_id", overrides.channel_id)?
            .set_override_option("feed.read_api_key", overrides.read_api_key.clone())?
            .set_override_option("feed.endpoint", overrides.endpoint.clone())?
            .set_override_option("poll.interval_secs", overrides.interval_secs)?
            .set_override_option(
                "log_file",
                overrides
                    .log_file
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.poll.interval_secs == 0 {
            anyhow::bail!("poll.interval_secs must be at least 1");
        }
        if self.feed.timeout_secs == 0 {
            anyhow::bail!("feed.timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// Interval between poll cycles.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll.interval_secs)
    }

    /// Timeout for a single fetch.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.feed.timeout_secs)
    }

    /// Display and rule field maps.
    pub fn field_maps(&self) -> FieldMaps {
        FieldMaps {
            display: self.fields.to_map(),
            rules: self.risk_fields.to_map(),
        }
    }
}

impl FieldsSettings {
    fn to_map(&self) -> FieldMap {
        FieldMap::builder()
            .source(MetricField::Temperature, &self.temperature)
            .source(MetricField::Humidity, &self.humidity)
            .source(MetricField::WaterLevel, &self.water_level)
            .source(MetricField::SoilMoisture, &self.soil_moisture)
            .source(MetricField::Pressure, &self.pressure)
            .source(MetricField::Rain, &self.rain)
            .build()
    }
}

fn field_key(section: &str, field: MetricField) -> String {
    let key = match field {
        MetricField::Temperature => "temperature",
        MetricField::Humidity => "humidity",
        MetricField::WaterLevel => "water_level",
        MetricField::SoilMoisture => "soil_moisture",
        MetricField::Pressure => "pressure",
        MetricField::Rain => "rain",
    };
    format!("{}.{}", section, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None, &Overrides::default()).unwrap();

        assert_eq!(settings.feed.endpoint, "https://api.thingspeak.com");
        assert_eq!(settings.feed.channel_id, 3035795);
        assert_eq!(settings.poll_interval(), Duration::from_secs(30));
        assert_eq!(settings.fetch_timeout(), Duration::from_secs(10));
        assert!(settings.log_file.is_none());

        let maps = settings.field_maps();
        assert_eq!(maps.display.source(MetricField::Temperature), "field1");
        assert_eq!(maps.display.source(MetricField::Rain), "field6");
        assert_eq!(maps.rules.source(MetricField::WaterLevel), "field3");
        assert_eq!(maps.rules.source(MetricField::SoilMoisture), "field4");
    }

    #[test]
    fn test_environment_layer() {
        // Only this test touches the pressure mapping.
        std::env::set_var("ENVWATCH_FIELDS__PRESSURE", "field8");
        let settings = Settings::load(None, &Overrides::default()).unwrap();
        std::env::remove_var("ENVWATCH_FIELDS__PRESSURE");

        let maps = settings.field_maps();
        assert_eq!(maps.display.source(MetricField::Pressure), "field8");
        assert_eq!(maps.rules.source(MetricField::Pressure), "field5");
    }

    #[test]
    fn test_file_layer_and_cli_overrides() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
log_file = "/tmp/envwatch.log"

[feed]
channel_id = 12
read_api_key = "FROMFILE"

[poll]
interval_secs = 60

[fields]
rain = "field5"

[risk_fields]
pressure = "field7"
"#
        )
        .unwrap();

        let overrides = Overrides {
            channel_id: Some(99),
            ..Default::default()
        };
        let settings = Settings::load(Some(file.path()), &overrides).unwrap();

        assert_eq!(settings.feed.channel_id, 99);
        assert_eq!(settings.feed.read_api_key, "FROMFILE");
        assert_eq!(settings.poll.interval_secs, 60);
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/envwatch.log")));

        let maps = settings.field_maps();
        assert_eq!(maps.display.source(MetricField::Rain), "field5");
        assert_eq!(maps.display.source(MetricField::WaterLevel), "field6");
        assert_eq!(maps.rules.source(MetricField::Pressure), "field7");
        assert_eq!(maps.rules.source(MetricField::Rain), "field6");
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let overrides = Overrides {
            interval_secs: Some(0),
            ..Default::default()
        };
        let err = Settings::load(None, &overrides).unwrap_err();
        assert!(err.to_string().contains("interval_secs"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Settings::load(
            Some(Path::new("/nonexistent/envwatch.toml")),
            &Overrides::default(),
        );
        assert!(result.is_err());
    }
}
