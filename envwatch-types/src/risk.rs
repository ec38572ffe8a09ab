//! Hazard risk rules.
//!
//! Four independent threshold rules map a [`Sample`] to a [`RiskReport`].
//! Every comparison is strict and an unknown reading never satisfies it,
//! so missing data always lands on the baseline branch.

use crate::Sample;

/// Hazard category evaluated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RiskCategory {
    Thunderstorm,
    Drought,
    Flood,
    Cyclone,
}

impl RiskCategory {
    /// All categories, in report order.
    pub const ALL: [RiskCategory; 4] = [
        RiskCategory::Thunderstorm,
        RiskCategory::Drought,
        RiskCategory::Flood,
        RiskCategory::Cyclone,
    ];

    /// Human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            RiskCategory::Thunderstorm => "Thunderstorm",
            RiskCategory::Drought => "Drought",
            RiskCategory::Flood => "Flood",
            RiskCategory::Cyclone => "Cyclone",
        }
    }

    const fn index(self) -> usize {
        match self {
            RiskCategory::Thunderstorm => 0,
            RiskCategory::Drought => 1,
            RiskCategory::Flood => 2,
            RiskCategory::Cyclone => 3,
        }
    }
}

impl core::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk level, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskLevel {
    Low,
    High,
    Critical,
}

impl RiskLevel {
    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl core::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one rule for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RiskAssessment {
    pub category: RiskCategory,
    pub level: RiskLevel,
    pub description: &'static str,
    pub suggestion: &'static str,
}

impl RiskAssessment {
    /// Check if the rule took its elevated branch.
    pub fn is_elevated(&self) -> bool {
        self.level > RiskLevel::Low
    }
}

/// The four assessments produced for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RiskReport {
    assessments: [RiskAssessment; 4],
}

impl RiskReport {
    /// Assessment for a category.
    pub fn get(&self, category: RiskCategory) -> &RiskAssessment {
        &self.assessments[category.index()]
    }

    /// Iterate over the assessments in report order.
    pub fn iter(&self) -> core::slice::Iter<'_, RiskAssessment> {
        self.assessments.iter()
    }

    /// The most severe level in the report.
    pub fn worst(&self) -> RiskLevel {
        self.iter().map(|a| a.level).max().unwrap_or(RiskLevel::Low)
    }

    /// Number of rules on their elevated branch.
    pub fn elevated_count(&self) -> usize {
        self.iter().filter(|a| a.is_elevated()).count()
    }
}

impl<'a> IntoIterator for &'a RiskReport {
    type Item = &'a RiskAssessment;
    type IntoIter = core::slice::Iter<'a, RiskAssessment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Threshold constants for the four rules.
///
/// The values are fixed; [`Default`] holds the reference thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    /// Thunderstorm: humidity must exceed this (%).
    pub storm_humidity_above: f64,
    /// Thunderstorm: temperature must exceed this (°C).
    pub storm_temperature_above: f64,
    /// Thunderstorm: pressure must be below this (hPa).
    pub storm_pressure_below: f64,
    /// Drought: soil moisture must be below this (%).
    pub drought_soil_moisture_below: f64,
    /// Drought: humidity must be below this (%).
    pub drought_humidity_below: f64,
    /// Flood: water level above this (cm) is enough.
    pub flood_water_level_above: f64,
    /// Flood: rain above this (mm) is enough.
    pub flood_rain_above: f64,
    /// Cyclone: pressure must be below this (hPa).
    pub cyclone_pressure_below: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            storm_humidity_above: 80.0,
            storm_temperature_above: 30.0,
            storm_pressure_below: 1000.0,
            drought_soil_moisture_below: 20.0,
            drought_humidity_below: 30.0,
            flood_water_level_above: 80.0,
            flood_rain_above: 50.0,
            cyclone_pressure_below: 990.0,
        }
    }
}

struct BranchText {
    description: &'static str,
    suggestion: &'static str,
}

const STORM_ELEVATED: BranchText = BranchText {
    description: "Dangerous thunderstorm conditions detected.",
    suggestion: "Stay indoors, unplug electronics, and avoid trees.",
};
const STORM_BASELINE: BranchText = BranchText {
    description: "No major thunderstorm risk.",
    suggestion: "Normal activities can continue.",
};
const DROUGHT_ELEVATED: BranchText = BranchText {
    description: "Soil moisture and humidity are very low, drought risk increasing.",
    suggestion: "Implement water-saving practices, ration supplies, use drought-resistant crops.",
};
const DROUGHT_BASELINE: BranchText = BranchText {
    description: "Short dry spell, water supply stable.",
    suggestion: "No major drought threat.",
};
const FLOOD_ELEVATED: BranchText = BranchText {
    description: "Severe flooding risk detected due to water/rain levels.",
    suggestion: "Evacuate if advised, avoid driving through water, keep valuables safe, follow official warnings.",
};
const FLOOD_BASELINE: BranchText = BranchText {
    description: "Minor waterlogging, low impact.",
    suggestion: "No major flood threat.",
};
const CYCLONE_ELEVATED: BranchText = BranchText {
    description: "Very low pressure indicates cyclone risk!",
    suggestion: "Evacuate if instructed, stock emergency supplies, stay indoors, follow government advisories.",
};
const CYCLONE_BASELINE: BranchText = BranchText {
    description: "Weak storm, light rain, slight winds.",
    suggestion: "No major cyclone threat.",
};

fn above(value: Option<f64>, limit: f64) -> bool {
    matches!(value, Some(v) if v > limit)
}

fn below(value: Option<f64>, limit: f64) -> bool {
    matches!(value, Some(v) if v < limit)
}

/// Evaluates the hazard rules against samples.
///
/// The engine holds no state besides its thresholds, so evaluating the same
/// sample twice yields the same report.
///
/// # Example
///
/// ```rust
/// use envwatch_types::{RiskCategory, RiskEngine, RiskLevel, Sample};
///
/// let engine = RiskEngine::default();
/// let report = engine.evaluate(&Sample::builder().pressure(985.0).build());
///
/// assert_eq!(report.get(RiskCategory::Cyclone).level, RiskLevel::High);
/// assert_eq!(report.get(RiskCategory::Thunderstorm).level, RiskLevel::Low);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    thresholds: RiskThresholds,
}

impl RiskEngine {
    /// Create an engine with the given thresholds.
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    /// Evaluate all four rules.
    pub fn evaluate(&self, sample: &Sample) -> RiskReport {
        RiskReport {
            assessments: [
                self.thunderstorm(sample),
                self.drought(sample),
                self.flood(sample),
                self.cyclone(sample),
            ],
        }
    }

    /// Humid, hot and low pressure all at once.
    pub fn thunderstorm(&self, sample: &Sample) -> RiskAssessment {
        let t = &self.thresholds;
        let elevated = above(sample.humidity, t.storm_humidity_above)
            && above(sample.temperature, t.storm_temperature_above)
            && below(sample.pressure, t.storm_pressure_below);

        if elevated {
            assess(RiskCategory::Thunderstorm, RiskLevel::Critical, STORM_ELEVATED)
        } else {
            assess(RiskCategory::Thunderstorm, RiskLevel::Low, STORM_BASELINE)
        }
    }

    /// Dry soil and dry air.
    pub fn drought(&self, sample: &Sample) -> RiskAssessment {
        let t = &self.thresholds;
        let elevated = below(sample.soil_moisture, t.drought_soil_moisture_below)
            && below(sample.humidity, t.drought_humidity_below);

        if elevated {
            assess(RiskCategory::Drought, RiskLevel::High, DROUGHT_ELEVATED)
        } else {
            assess(RiskCategory::Drought, RiskLevel::Low, DROUGHT_BASELINE)
        }
    }

    /// High water or heavy rain.
    pub fn flood(&self, sample: &Sample) -> RiskAssessment {
        let t = &self.thresholds;
        let elevated = above(sample.water_level, t.flood_water_level_above)
            || above(sample.rain, t.flood_rain_above);

        if elevated {
            assess(RiskCategory::Flood, RiskLevel::High, FLOOD_ELEVATED)
        } else {
            assess(RiskCategory::Flood, RiskLevel::Low, FLOOD_BASELINE)
        }
    }

    /// Very low pressure.
    pub fn cyclone(&self, sample: &Sample) -> RiskAssessment {
        if below(sample.pressure, self.thresholds.cyclone_pressure_below) {
            assess(RiskCategory::Cyclone, RiskLevel::High, CYCLONE_ELEVATED)
        } else {
            assess(RiskCategory::Cyclone, RiskLevel::Low, CYCLONE_BASELINE)
        }
    }
}

fn assess(category: RiskCategory, level: RiskLevel, text: BranchText) -> RiskAssessment {
    RiskAssessment {
        category,
        level,
        description: text.description,
        suggestion: text.suggestion,
    }
}
