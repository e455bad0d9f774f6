use crate::core::ConfigProvider;
use crate::domain::model::{RuleDefinition, ThicknessLimits, ThicknessRange};
use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const SUPPORTED_FORMATS: [&str; 2] = ["csv", "json"];
pub const MAX_CHART_POINTS: usize = 10_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub advisor: Option<AdvisorInfo>,
    pub limits: Option<LimitsConfig>,
    pub chart: Option<ChartConfig>,
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub min_thickness: Option<f64>,
    pub max_thickness: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub output_path: Option<String>,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub step: Option<f64>,
    pub include_unmapped: Option<bool>,
    pub output_formats: Option<Vec<String>>,
}

fn default_formats() -> &'static [String] {
    static FORMATS: std::sync::OnceLock<Vec<String>> = std::sync::OnceLock::new();
    FORMATS.get_or_init(|| vec!["csv".to_string()])
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdvisorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AdvisorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        result.to_string()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("chart.output_path", self.output_path())?;

        // 驗證厚度範圍
        let limits = self.thickness_limits();
        validation::validate_finite("limits.min_thickness", limits.min)?;
        validation::validate_finite("limits.max_thickness", limits.max)?;
        if limits.min > limits.max {
            return Err(AdvisorError::InvalidConfigValueError {
                field: "limits.min_thickness".to_string(),
                value: limits.min.to_string(),
                reason: format!("Must not exceed limits.max_thickness ({})", limits.max),
            });
        }

        let range = self.thickness_range();
        validation::validate_finite("chart.start", range.start)?;
        validation::validate_finite("chart.end", range.end)?;
        validation::validate_positive("chart.step", range.step)?;
        if range.start > range.end {
            return Err(AdvisorError::InvalidConfigValueError {
                field: "chart.start".to_string(),
                value: range.start.to_string(),
                reason: format!("Must not exceed chart.end ({})", range.end),
            });
        }
        let points = ((range.end - range.start) / range.step).floor() + 1.0;
        validation::validate_range("chart.step", points, 1.0, MAX_CHART_POINTS as f64)?;

        validation::validate_output_formats(
            "chart.output_formats",
            self.output_formats(),
            &SUPPORTED_FORMATS,
        )?;

        // 驗證規則
        let mut seen = HashSet::new();
        for (i, rule) in self.rules.iter().enumerate() {
            let prefix = format!("rules[{}]", i);
            validation::validate_finite(&format!("{}.volts_per_inch", prefix), rule.volts_per_inch)?;
            validation::validate_finite(&format!("{}.amps_per_inch", prefix), rule.amps_per_inch)?;
            validation::validate_finite(
                &format!("{}.wire_speed_per_inch", prefix),
                rule.wire_speed_per_inch,
            )?;
            validation::validate_non_empty_string(&format!("{}.gas", prefix), &rule.gas)?;

            if !seen.insert((rule.process, rule.material)) {
                return Err(AdvisorError::InvalidConfigValueError {
                    field: prefix,
                    value: format!("{}/{}", rule.process, rule.material),
                    reason: "Duplicate rule for this process and material".to_string(),
                });
            }
        }

        Ok(())
    }

    /// 取得配置名稱
    pub fn name(&self) -> Option<&str> {
        self.advisor.as_ref().map(|a| a.name.as_str())
    }

    /// 覆寫輸出路徑
    pub fn set_output_path(&mut self, path: String) {
        match self.chart.as_mut() {
            Some(chart) => chart.output_path = Some(path),
            None => {
                self.chart = Some(ChartConfig {
                    output_path: Some(path),
                    start: None,
                    end: None,
                    step: None,
                    include_unmapped: None,
                    output_formats: None,
                })
            }
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn output_path(&self) -> &str {
        self.chart
            .as_ref()
            .and_then(|c| c.output_path.as_deref())
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn rules(&self) -> &[RuleDefinition] {
        &self.rules
    }

    fn thickness_limits(&self) -> ThicknessLimits {
        let defaults = ThicknessLimits::default();
        match &self.limits {
            Some(limits) => ThicknessLimits {
                min: limits.min_thickness.unwrap_or(defaults.min),
                max: limits.max_thickness.unwrap_or(defaults.max),
            },
            None => defaults,
        }
    }

    fn thickness_range(&self) -> ThicknessRange {
        let defaults = ThicknessRange::default();
        match &self.chart {
            Some(chart) => ThicknessRange {
                start: chart.start.unwrap_or(defaults.start),
                end: chart.end.unwrap_or(defaults.end),
                step: chart.step.unwrap_or(defaults.step),
            },
            None => defaults,
        }
    }

    fn include_unmapped(&self) -> bool {
        self.chart
            .as_ref()
            .and_then(|c| c.include_unmapped)
            .unwrap_or(false)
    }

    fn output_formats(&self) -> &[String] {
        self.chart
            .as_ref()
            .and_then(|c| c.output_formats.as_deref())
            .unwrap_or(default_formats())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Material, Process};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[advisor]
name = "shop floor"

[limits]
min_thickness = 0.03
max_thickness = 1.0

[chart]
output_path = "./charts"
start = 0.125
end = 0.25
step = 0.0625
include_unmapped = true
output_formats = ["csv", "json"]

[[rules]]
process = "MIG"
material = "Aluminum"
volts_per_inch = 3.5
amps_per_inch = 25.0
wire_speed_per_inch = 2.5
gas = "100% Argon"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.name(), Some("shop floor"));
        assert_eq!(config.output_path(), "./charts");
        assert_eq!(config.thickness_limits().min, 0.03);
        assert_eq!(config.thickness_range().step, 0.0625);
        assert!(config.include_unmapped());
        assert_eq!(config.output_formats().len(), 2);
        assert_eq!(config.rules.len(), 1);
        assert_eq!(config.rules[0].process, Process::Mig);
        assert_eq!(config.rules[0].material, Material::Aluminum);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
        assert_eq!(config.thickness_limits(), ThicknessLimits::default());
        assert_eq!(config.thickness_range(), ThicknessRange::default());
        assert!(!config.include_unmapped());
        assert_eq!(config.output_formats(), &["csv".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_formats_borrow_from_chart_section() {
        let config = TomlConfig::from_toml_str(
            r#"
[chart]
output_formats = ["json"]
"#,
        )
        .unwrap();
        assert_eq!(config.output_formats(), &["json".to_string()]);

        let config = TomlConfig::from_toml_str("[chart]\nstep = 0.125\n").unwrap();
        assert_eq!(config.output_formats(), &["csv".to_string()]);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("WELD_ADVISOR_TEST_OUTPUT", "/tmp/weld-charts");

        let toml_content = r#"
[chart]
output_path = "${WELD_ADVISOR_TEST_OUTPUT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_path(), "/tmp/weld-charts");

        std::env::remove_var("WELD_ADVISOR_TEST_OUTPUT");
    }

    #[test]
    fn test_unset_env_var_is_left_untouched() {
        let toml_content = r#"
[advisor]
name = "${WELD_ADVISOR_SURELY_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.name(), Some("${WELD_ADVISOR_SURELY_UNSET_VAR}"));
    }

    #[test]
    fn test_rejects_non_positive_step() {
        let config = TomlConfig::from_toml_str("[chart]\nstep = 0.0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_range_and_limits() {
        let config = TomlConfig::from_toml_str("[chart]\nstart = 1.0\nend = 0.5\n").unwrap();
        assert!(config.validate().is_err());

        let config =
            TomlConfig::from_toml_str("[limits]\nmin_thickness = 2.0\nmax_thickness = 1.0\n")
                .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_too_many_points() {
        let config =
            TomlConfig::from_toml_str("[chart]\nstart = 0.0\nend = 100.0\nstep = 0.001\n")
                .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_duplicate_rules() {
        let toml_content = r#"
[[rules]]
process = "TIG"
material = "Steel"
volts_per_inch = 1.0
amps_per_inch = 1.0
wire_speed_per_inch = 0.0
gas = "100% Argon"

[[rules]]
process = "tig"
material = "steel"
volts_per_inch = 2.0
amps_per_inch = 2.0
wire_speed_per_inch = 0.0
gas = "100% Argon"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate rule"));
    }

    #[test]
    fn test_rejects_unknown_format_and_empty_gas() {
        let config =
            TomlConfig::from_toml_str("[chart]\noutput_formats = [\"xlsx\"]\n").unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[[rules]]
process = "Stick"
material = "Steel"
volts_per_inch = 1.0
amps_per_inch = 1.0
wire_speed_per_inch = 0.0
gas = "  "
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_process_is_a_parse_error() {
        let toml_content = r#"
[[rules]]
process = "Laser"
material = "Steel"
volts_per_inch = 1.0
amps_per_inch = 1.0
wire_speed_per_inch = 0.0
gas = "-"
"#;
        assert!(TomlConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[advisor]
name = "file-test"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.name(), Some("file-test"));
    }

    #[test]
    fn test_set_output_path_creates_chart_section() {
        let mut config = TomlConfig::default();
        config.set_output_path("./elsewhere".to_string());
        assert_eq!(config.output_path(), "./elsewhere");
    }
}
