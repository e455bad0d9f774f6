pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::app::report::OutputFormat;
#[cfg(feature = "cli")]
use crate::domain::model::{Material, Process};
#[cfg(feature = "cli")]
use crate::utils::{error::Result, validation::Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "weld-advisor")]
#[command(about = "Recommend welding machine settings for a process, material and thickness")]
pub struct CliConfig {
    /// Welding process: MIG, TIG or Stick
    #[arg(short, long, default_value = "MIG")]
    pub process: Process,

    /// Base material: Steel, Aluminum or Stainless
    #[arg(short, long, default_value = "Steel")]
    pub material: Material,

    /// Material thickness in inches; unreadable text counts as 0
    #[arg(short, long, default_value = "0.125", allow_hyphen_values = true)]
    pub thickness: String,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with extra rules and thickness limits
    #[arg(long)]
    pub rules: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.rules {
            crate::utils::validation::validate_path("rules", path)?;
        }
        Ok(())
    }
}
