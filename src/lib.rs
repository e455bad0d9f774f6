pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::chart_pipeline::ChartPipeline;
pub use app::report::{render, OutputFormat};
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{
    advisor::{recommend, SettingsAdvisor},
    engine::ChartEngine,
    rules::{builtin_rule, LinearRule, RuleTable},
};
pub use domain::model::{
    Material, Process, RecommendedSettings, RuleDefinition, Thickness, ThicknessLimits,
    WeldSettings,
};
pub use utils::error::{AdvisorError, Result};
