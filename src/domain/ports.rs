use crate::domain::model::{
    ChartInput, ChartResult, RuleDefinition, Thickness, ThicknessLimits, ThicknessRange,
    WeldSettings,
};
use crate::utils::error::Result;

/// A closed-form mapping from thickness to machine settings for one
/// `(process, material)` pair.
pub trait SettingsRule: Send + Sync + std::fmt::Debug {
    fn derive(&self, thickness: Thickness) -> WeldSettings;
}

pub trait Storage: Send + Sync {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn rules(&self) -> &[RuleDefinition];
    fn thickness_limits(&self) -> ThicknessLimits;
    fn thickness_range(&self) -> ThicknessRange;
    fn include_unmapped(&self) -> bool;
    fn output_formats(&self) -> &[String];
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<ChartInput>>;
    fn transform(&self, inputs: Vec<ChartInput>) -> Result<ChartResult>;
    fn load(&self, result: ChartResult) -> Result<Vec<String>>;
}
