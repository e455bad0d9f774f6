use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown welding process '{value}' (expected MIG, TIG or Stick)")]
    UnknownProcess { value: String },

    #[error("Unknown base material '{value}' (expected Steel, Aluminum or Stainless)")]
    UnknownMaterial { value: String },

    #[error("Chart processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Io,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AdvisorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdvisorError::ConfigError { .. }
            | AdvisorError::ConfigValidationError { .. }
            | AdvisorError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AdvisorError::UnknownProcess { .. } | AdvisorError::UnknownMaterial { .. } => {
                ErrorCategory::Input
            }
            AdvisorError::IoError(_) => ErrorCategory::Io,
            AdvisorError::CsvError(_)
            | AdvisorError::SerializationError(_)
            | AdvisorError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AdvisorError::IoError(_) => {
                "Check that the file exists and that the output directory is writable".to_string()
            }
            AdvisorError::CsvError(_) | AdvisorError::SerializationError(_) => {
                "Check the chart settings; the generated rows could not be encoded".to_string()
            }
            AdvisorError::ConfigError { .. } | AdvisorError::ConfigValidationError { .. } => {
                "Make sure the configuration file is valid TOML and matches the documented layout"
                    .to_string()
            }
            AdvisorError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' in the configuration", field)
            }
            AdvisorError::UnknownProcess { .. } => "Use one of: MIG, TIG, Stick".to_string(),
            AdvisorError::UnknownMaterial { .. } => {
                "Use one of: Steel, Aluminum, Stainless".to_string()
            }
            AdvisorError::ProcessingError { .. } => {
                "Re-run with --verbose to see which chart row failed".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Io => format!("File access failed: {}", self),
            ErrorCategory::Processing => format!("Could not build the settings chart: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
