use crate::utils::error::AdvisorError;
use crate::utils::format::to_fixed;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Placeholder shown in every field when no rule covers the input.
pub const NO_RECOMMENDATION: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Process {
    #[serde(rename = "MIG")]
    Mig,
    #[serde(rename = "TIG")]
    Tig,
    Stick,
}

impl Process {
    pub const ALL: [Process; 3] = [Process::Mig, Process::Tig, Process::Stick];

    pub fn as_str(&self) -> &'static str {
        match self {
            Process::Mig => "MIG",
            Process::Tig => "TIG",
            Process::Stick => "Stick",
        }
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Process {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Process::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| AdvisorError::UnknownProcess {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for Process {
    type Error = AdvisorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Material {
    Steel,
    Aluminum,
    Stainless,
}

impl Material {
    pub const ALL: [Material; 3] = [Material::Steel, Material::Aluminum, Material::Stainless];

    pub fn as_str(&self) -> &'static str {
        match self {
            Material::Steel => "Steel",
            Material::Aluminum => "Aluminum",
            Material::Stainless => "Stainless",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Material {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Material::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| AdvisorError::UnknownMaterial {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for Material {
    type Error = AdvisorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Workpiece thickness in inches.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Thickness(f64);

fn numeric_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap()
    })
}

impl Thickness {
    pub fn new(inches: f64) -> Self {
        Self(inches)
    }

    pub fn inches(&self) -> f64 {
        self.0
    }

    /// Parses the leading number of `text` (`"0.125 in"` -> 0.125).
    ///
    /// Returns `None` when no finite number can be read.
    pub fn parse(text: &str) -> Option<Self> {
        let prefix = numeric_prefix().find(text.trim_start())?;
        let value: f64 = prefix.as_str().parse().ok()?;
        if value.is_finite() {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Like [`Thickness::parse`], but anything unreadable becomes zero.
    pub fn parse_lenient(text: &str) -> Self {
        match Self::parse(text) {
            // -0 收斂成 0
            Some(t) if t.0 == 0.0 => Self(0.0),
            Some(t) => t,
            None => Self(0.0),
        }
    }
}

impl From<f64> for Thickness {
    fn from(inches: f64) -> Self {
        Self(inches)
    }
}

impl fmt::Display for Thickness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in", self.0)
    }
}

/// Numeric output of a matched rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeldSettings {
    /// Volts
    pub voltage: f64,
    /// Amps
    pub amperage: f64,
    /// Inches per minute
    pub wire_speed: f64,
    pub gas: String,
}

/// The four display fields handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedSettings {
    pub voltage: String,
    pub amperage: String,
    #[serde(rename = "wireSpeed")]
    pub wire_speed: String,
    pub gas: String,
}

impl RecommendedSettings {
    pub fn unavailable() -> Self {
        Self {
            voltage: NO_RECOMMENDATION.to_string(),
            amperage: NO_RECOMMENDATION.to_string(),
            wire_speed: NO_RECOMMENDATION.to_string(),
            gas: NO_RECOMMENDATION.to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        *self != Self::unavailable()
    }
}

impl From<&WeldSettings> for RecommendedSettings {
    fn from(settings: &WeldSettings) -> Self {
        Self {
            voltage: to_fixed(settings.voltage, 1),
            amperage: to_fixed(settings.amperage, 0),
            wire_speed: to_fixed(settings.wire_speed, 1),
            gas: settings.gas.clone(),
        }
    }
}

impl From<Option<WeldSettings>> for RecommendedSettings {
    fn from(settings: Option<WeldSettings>) -> Self {
        settings
            .as_ref()
            .map(RecommendedSettings::from)
            .unwrap_or_else(RecommendedSettings::unavailable)
    }
}

/// A linear rule as written in configuration: each output is
/// `coefficient * thickness`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub process: Process,
    pub material: Material,
    pub volts_per_inch: f64,
    pub amps_per_inch: f64,
    pub wire_speed_per_inch: f64,
    pub gas: String,
}

/// Thickness band considered typical; values outside only raise warnings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThicknessLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ThicknessLimits {
    // 約 0.5 mm .. 100 mm
    fn default() -> Self {
        Self { min: 0.02, max: 4.0 }
    }
}

/// Thickness sweep used to build a settings chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThicknessRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for ThicknessRange {
    fn default() -> Self {
        Self {
            start: 0.0625,
            end: 0.5,
            step: 0.0625,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartInput {
    pub process: Process,
    pub material: Material,
    pub thickness: Thickness,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub process: Process,
    pub material: Material,
    pub thickness: Thickness,
    pub settings: RecommendedSettings,
}

#[derive(Debug, Clone)]
pub struct ChartResult {
    pub rows: Vec<ChartRow>,
    pub csv_output: String,
    pub json_output: String,
}
