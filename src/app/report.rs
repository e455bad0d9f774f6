use crate::domain::model::RecommendedSettings;
use crate::utils::error::Result;
use crate::utils::format::with_unit;
use serde::{Deserialize, Serialize};

pub const VOLTAGE_UNIT: &str = "V";
pub const AMPERAGE_UNIT: &str = "A";
pub const WIRE_SPEED_UNIT: &str = "in/min";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Four labelled lines; units are appended even to the `-` placeholder.
pub fn render_text(settings: &RecommendedSettings) -> String {
    [
        format!("Voltage: {}", with_unit(&settings.voltage, VOLTAGE_UNIT)),
        format!("Amperage: {}", with_unit(&settings.amperage, AMPERAGE_UNIT)),
        format!("Wire Speed: {}", with_unit(&settings.wire_speed, WIRE_SPEED_UNIT)),
        format!("Gas: {}", settings.gas),
    ]
    .join("\n")
}

pub fn render_json(settings: &RecommendedSettings) -> Result<String> {
    Ok(serde_json::to_string_pretty(settings)?)
}

pub fn render(settings: &RecommendedSettings, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(settings)),
        OutputFormat::Json => render_json(settings),
    }
}
