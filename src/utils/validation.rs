use crate::domain::model::{Thickness, ThicknessLimits};
use crate::utils::error::{AdvisorError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value <= 0.0 {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be greater than 0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_output_formats(
    field_name: &str,
    formats: &[String],
    allowed_formats: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_formats.iter().copied().collect();

    if formats.is_empty() {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "[]".to_string(),
            reason: "At least one output format is required".to_string(),
        });
    }

    for format in formats {
        if !allowed_set.contains(format.as_str()) {
            return Err(AdvisorError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    allowed_formats.join(", ")
                ),
            });
        }
    }

    Ok(())
}

/// Warnings about a thickness the advisor will still accept.
pub fn assess_thickness(thickness: Thickness, limits: &ThicknessLimits) -> Vec<String> {
    let t = thickness.inches();
    let mut warnings = Vec::new();

    if t < 0.0 {
        warnings.push(format!(
            "Thickness {} in is negative; settings are extrapolated and not usable",
            t
        ));
    } else if t == 0.0 {
        warnings.push(
            "Thickness is 0 in; check the input, unreadable text is treated as zero".to_string(),
        );
    } else if t < limits.min {
        warnings.push(format!(
            "Thickness {} in is below the typical minimum of {} in",
            t, limits.min
        ));
    } else if t > limits.max {
        warnings.push(format!(
            "Thickness {} in is above the typical maximum of {} in",
            t, limits.max
        ));
    }

    warnings
}
