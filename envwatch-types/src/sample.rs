//! Typed observations built from raw feed records.

use crate::{FieldMap, MetricField, RawRecord};

/// Coerce a raw reading into a number.
///
/// Returns `None` when the value is absent, not a number, or not finite.
/// Surrounding whitespace is ignored. No rounding happens here.
pub fn parse_reading(raw: Option<&str>) -> Option<f64> {
    let value: f64 = raw?.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// One normalized observation.
///
/// A field is `None` when the upstream omitted it or sent something that
/// is not a number. Unknown fields never satisfy a risk threshold.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Air temperature in °C.
    pub temperature: Option<f64>,
    /// Relative humidity in %.
    pub humidity: Option<f64>,
    /// Water level in cm.
    pub water_level: Option<f64>,
    /// Soil moisture in %.
    pub soil_moisture: Option<f64>,
    /// Barometric pressure in hPa.
    pub pressure: Option<f64>,
    /// Accumulated rain in mm.
    pub rain: Option<f64>,
}

impl Sample {
    /// Create a sample with every field unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for a sample.
    pub fn builder() -> SampleBuilder {
        SampleBuilder::new()
    }

    /// Parse the six fields of a raw record through the given field map.
    pub fn from_record(record: &RawRecord, map: &FieldMap) -> Self {
        let read = |field| parse_reading(map.lookup(field, record));
        Self {
            temperature: read(MetricField::Temperature),
            humidity: read(MetricField::Humidity),
            water_level: read(MetricField::WaterLevel),
            soil_moisture: read(MetricField::SoilMoisture),
            pressure: read(MetricField::Pressure),
            rain: read(MetricField::Rain),
        }
    }

    /// Value of a logical field.
    pub fn get(&self, field: MetricField) -> Option<f64> {
        match field {
            MetricField::Temperature => self.temperature,
            MetricField::Humidity => self.humidity,
            MetricField::WaterLevel => self.water_level,
            MetricField::SoilMoisture => self.soil_moisture,
            MetricField::Pressure => self.pressure,
            MetricField::Rain => self.rain,
        }
    }

    /// Check if no field carries a value.
    pub fn is_empty(&self) -> bool {
        MetricField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

/// Builder for `Sample`.
#[derive(Debug, Default)]
pub struct SampleBuilder {
    sample: Sample,
}

impl SampleBuilder {
    /// Create a new builder with every field unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the temperature (°C).
    pub fn temperature(mut self, value: f64) -> Self {
        self.sample.temperature = Some(value);
        self
    }

    /// Set the humidity (%).
    pub fn humidity(mut self, value: f64) -> Self {
        self.sample.humidity = Some(value);
        self
    }

    /// Set the water level (cm).
    pub fn water_level(mut self, value: f64) -> Self {
        self.sample.water_level = Some(value);
        self
    }

    /// Set the soil moisture (%).
    pub fn soil_moisture(mut self, value: f64) -> Self {
        self.sample.soil_moisture = Some(value);
        self
    }

    /// Set the pressure (hPa).
    pub fn pressure(mut self, value: f64) -> Self {
        self.sample.pressure = Some(value);
        self
    }

    /// Set the rain (mm).
    pub fn rain(mut self, value: f64) -> Self {
        self.sample.rain = Some(value);
        self
    }

    /// Build the sample.
    pub fn build(self) -> Sample {
        self.sample
    }
}
