//! Logical sensor fields and their mapping onto upstream feed fields.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// A raw feed record: upstream field name (`"field1"`…) to its textual value.
///
/// Values are `None` when the upstream sent `null` for the field.
pub type RawRecord = BTreeMap<String, Option<String>>;

/// One of the six readings carried by a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MetricField {
    Temperature,
    Humidity,
    WaterLevel,
    SoilMoisture,
    Pressure,
    Rain,
}

impl MetricField {
    /// All fields, in dashboard display order.
    pub const ALL: [MetricField; 6] = [
        MetricField::Temperature,
        MetricField::Humidity,
        MetricField::WaterLevel,
        MetricField::SoilMoisture,
        MetricField::Pressure,
        MetricField::Rain,
    ];

    /// Display identifier used by the formatter and in JSON output.
    ///
    /// Rain is published as `totalrain`.
    pub const fn id(self) -> &'static str {
        match self {
            MetricField::Temperature => "temperature",
            MetricField::Humidity => "humidity",
            MetricField::WaterLevel => "waterLevel",
            MetricField::SoilMoisture => "soilMoisture",
            MetricField::Pressure => "pressure",
            MetricField::Rain => "totalrain",
        }
    }

    /// Look up a field by its display identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }

    /// Unit suffix appended to formatted values.
    pub const fn unit(self) -> &'static str {
        match self {
            MetricField::Temperature => "°C",
            MetricField::Humidity | MetricField::SoilMoisture => "%",
            MetricField::WaterLevel => "cm",
            MetricField::Pressure => "hPa",
            MetricField::Rain => "mm",
        }
    }

    /// Human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            MetricField::Temperature => "Temperature",
            MetricField::Humidity => "Humidity",
            MetricField::WaterLevel => "Water Level",
            MetricField::SoilMoisture => "Soil Moisture",
            MetricField::Pressure => "Pressure",
            MetricField::Rain => "Total Rain",
        }
    }

    /// Upstream field the dashboard displays for this reading.
    ///
    /// Water level and rain share `field6`.
    pub const fn default_source(self) -> &'static str {
        match self {
            MetricField::Temperature => "field1",
            MetricField::Humidity => "field2",
            MetricField::SoilMoisture => "field3",
            MetricField::WaterLevel => "field6",
            MetricField::Pressure => "field7",
            MetricField::Rain => "field6",
        }
    }

    /// Upstream field the risk rules read for this reading.
    ///
    /// This numbering differs from [`default_source`](Self::default_source)
    /// for water level, soil moisture and pressure.
    pub const fn default_rule_source(self) -> &'static str {
        match self {
            MetricField::Temperature => "field1",
            MetricField::Humidity => "field2",
            MetricField::WaterLevel => "field3",
            MetricField::SoilMoisture => "field4",
            MetricField::Pressure => "field5",
            MetricField::Rain => "field6",
        }
    }

    const fn index(self) -> usize {
        match self {
            MetricField::Temperature => 0,
            MetricField::Humidity => 1,
            MetricField::WaterLevel => 2,
            MetricField::SoilMoisture => 3,
            MetricField::Pressure => 4,
            MetricField::Rain => 5,
        }
    }
}

impl core::fmt::Display for MetricField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps each logical field to the upstream field that carries it.
///
/// The mapping is fixed once built. The default is the display mapping;
/// [`FieldMap::rule_inputs`] gives the mapping the risk rules read.
///
/// # Example
///
/// ```rust
/// use envwatch_types::{FieldMap, MetricField};
///
/// let map = FieldMap::builder()
///     .source(MetricField::WaterLevel, "field3")
///     .build();
///
/// assert_eq!(map.source(MetricField::WaterLevel), "field3");
/// assert_eq!(map.source(MetricField::Rain), "field6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    sources: [String; 6],
}

impl FieldMap {
    /// Create a builder starting from the default mapping.
    pub fn builder() -> FieldMapBuilder {
        FieldMapBuilder::new()
    }

    /// Default mapping read by the risk rules.
    pub fn rule_inputs() -> Self {
        Self {
            sources: MetricField::ALL.map(|f| f.default_rule_source().to_string()),
        }
    }

    /// Upstream field name for a logical field.
    pub fn source(&self, field: MetricField) -> &str {
        &self.sources[field.index()]
    }

    /// Raw value of a logical field in a record, if present and non-null.
    pub fn lookup<'a>(&self, field: MetricField, record: &'a RawRecord) -> Option<&'a str> {
        record.get(self.source(field))?.as_deref()
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            sources: MetricField::ALL.map(|f| f.default_source().to_string()),
        }
    }
}

/// The two mappings applied to every record: one for the displayed
/// readings, one for the readings the risk rules evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMaps {
    pub display: FieldMap,
    pub rules: FieldMap,
}

impl Default for FieldMaps {
    fn default() -> Self {
        Self {
            display: FieldMap::default(),
            rules: FieldMap::rule_inputs(),
        }
    }
}

/// Builder for `FieldMap`.
#[derive(Debug, Default)]
pub struct FieldMapBuilder {
    map: FieldMap,
}

impl FieldMapBuilder {
    /// Create a new builder with the default mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the upstream field for one logical field.
    pub fn source(mut self, field: MetricField, upstream: impl Into<String>) -> Self {
        self.map.sources[field.index()] = upstream.into();
        self
    }

    /// Build the field map.
    pub fn build(self) -> FieldMap {
        self.map
    }
}
