pub mod advisor;
pub mod engine;
pub mod rules;

pub use crate::domain::model::{ChartInput, ChartResult, ChartRow};
pub use crate::domain::ports::{ConfigProvider, Pipeline, SettingsRule, Storage};
pub use crate::utils::error::Result;
