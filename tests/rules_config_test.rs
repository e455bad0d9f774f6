use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;
use weld_advisor::core::ConfigProvider;
use weld_advisor::utils::validation::{assess_thickness, Validate};
use weld_advisor::{Material, Process, RecommendedSettings, SettingsAdvisor, Thickness, TomlConfig};

fn write_config(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_configured_rule_extends_builtin_table() -> Result<()> {
    let file = write_config(
        r#"
[advisor]
name = "aluminum shop"

[[rules]]
process = "MIG"
material = "Aluminum"
volts_per_inch = 3.5
amps_per_inch = 25.0
wire_speed_per_inch = 2.5
gas = "100% Argon"
"#,
    )?;

    let config = TomlConfig::from_file(file.path())?;
    config.validate()?;
    let advisor = SettingsAdvisor::from_config(&config);

    assert_eq!(advisor.rules().len(), 2);

    let aluminum = advisor.recommend(Process::Mig, Material::Aluminum, Thickness::new(0.25));
    assert_eq!(aluminum.voltage, "0.9");
    assert_eq!(aluminum.amperage, "6");
    assert_eq!(aluminum.wire_speed, "0.6");
    assert_eq!(aluminum.gas, "100% Argon");

    // 內建規則不受影響
    let steel = advisor.recommend(Process::Mig, Material::Steel, Thickness::new(0.125));
    assert_eq!(steel.voltage, "0.5");

    let tig = advisor.recommend(Process::Tig, Material::Aluminum, Thickness::new(0.25));
    assert_eq!(tig, RecommendedSettings::unavailable());

    Ok(())
}

#[test]
fn test_configured_rule_replaces_builtin_pair() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[[rules]]
process = "MIG"
material = "Steel"
volts_per_inch = 60.0
amps_per_inch = 500.0
wire_speed_per_inch = 800.0
gas = "C25"
"#,
    )?;
    config.validate()?;

    let advisor = SettingsAdvisor::from_config(&config);
    assert_eq!(advisor.rules().len(), 1);

    let settings = advisor.recommend(Process::Mig, Material::Steel, Thickness::new(0.125));
    assert_eq!(settings.voltage, "7.5");
    assert_eq!(settings.amperage, "63");
    assert_eq!(settings.wire_speed, "100.0");
    assert_eq!(settings.gas, "C25");

    Ok(())
}

#[test]
fn test_rule_keys_are_case_insensitive() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[[rules]]
process = "Mig"
material = "ALUMINUM"
volts_per_inch = 3.5
amps_per_inch = 25.0
wire_speed_per_inch = 2.5
gas = "100% Argon"

[[rules]]
process = "stick"
material = "Stainless"
volts_per_inch = 90.0
amps_per_inch = 360.0
wire_speed_per_inch = 0.0
gas = "None (flux)"
"#,
    )?;
    config.validate()?;

    assert_eq!(config.rules[0].process, Process::Mig);
    assert_eq!(config.rules[0].material, Material::Aluminum);
    assert_eq!(config.rules[1].process, Process::Stick);

    let advisor = SettingsAdvisor::from_config(&config);
    assert!(advisor.rules().contains(Process::Stick, Material::Stainless));

    Ok(())
}

#[test]
fn test_configured_limits_drive_thickness_warnings() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[limits]
min_thickness = 0.0625
max_thickness = 0.5
"#,
    )?;
    config.validate()?;
    let limits = config.thickness_limits();

    assert!(assess_thickness(Thickness::new(0.25), &limits).is_empty());
    assert_eq!(assess_thickness(Thickness::new(0.03), &limits).len(), 1);
    assert_eq!(assess_thickness(Thickness::new(0.75), &limits).len(), 1);

    // 警告不改變輸出
    let advisor = SettingsAdvisor::from_config(&config);
    assert_eq!(
        advisor.recommend(Process::Mig, Material::Steel, Thickness::new(0.75)),
        weld_advisor::recommend(Process::Mig, Material::Steel, Thickness::new(0.75))
    );

    Ok(())
}

#[test]
fn test_missing_config_file_is_io_error() {
    let err = TomlConfig::from_file("/definitely/not/here/rules.toml").unwrap_err();
    assert!(matches!(err, weld_advisor::AdvisorError::IoError(_)));
}

#[test]
fn test_malformed_toml_is_rejected() {
    let err = TomlConfig::from_toml_str("[[rules]\nprocess = ").unwrap_err();
    assert!(err.to_string().contains("TOML parsing error"));
}
