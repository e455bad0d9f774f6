use anyhow::Result;
use tempfile::TempDir;
use weld_advisor::core::ConfigProvider;
use weld_advisor::utils::validation::Validate;
use weld_advisor::{ChartEngine, ChartPipeline, LocalStorage, TomlConfig};

#[test]
fn test_end_to_end_chart_export() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().replace('\\', "/");

    let config_content = format!(
        r#"
[chart]
output_path = "{}"
start = 0.125
end = 0.375
step = 0.125
output_formats = ["csv", "json"]

[[rules]]
process = "Stick"
material = "Steel"
volts_per_inch = 100.0
amps_per_inch = 400.0
wire_speed_per_inch = 0.0
gas = "None (flux)"
"#,
        output_path
    );

    let config = TomlConfig::from_toml_str(&config_content)?;
    config.validate()?;

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = ChartPipeline::new(storage, config);
    let written = ChartEngine::new(pipeline).run()?;

    assert_eq!(written.len(), 2);
    assert!(written[0].ends_with("settings_chart.csv"));
    assert!(written[1].ends_with("settings_chart.json"));

    let csv_content = std::fs::read_to_string(temp_dir.path().join("settings_chart.csv"))?;
    let lines: Vec<&str> = csv_content.lines().collect();

    // header + 3 MIG/Steel rows + 3 Stick/Steel rows
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[1], "MIG,Steel,0.125,0.5,4,0.3,75% Argon / 25% CO2");
    assert_eq!(lines[3], "MIG,Steel,0.375,1.5,11,0.8,75% Argon / 25% CO2");
    assert_eq!(lines[4], "Stick,Steel,0.125,12.5,50,0.0,None (flux)");

    let json_content = std::fs::read_to_string(temp_dir.path().join("settings_chart.json"))?;
    let rows: serde_json::Value = serde_json::from_str(&json_content)?;
    assert_eq!(rows.as_array().map(|r| r.len()), Some(6));
    assert_eq!(rows[5]["process"], "Stick");
    assert_eq!(rows[5]["settings"]["amperage"], "150");

    Ok(())
}

#[test]
fn test_chart_with_unmapped_rows() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().replace('\\', "/");

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[chart]
output_path = "{}"
start = 0.25
end = 0.25
step = 0.25
include_unmapped = true
"#,
        output_path
    ))?;
    config.validate()?;

    let pipeline = ChartPipeline::new(LocalStorage::new(output_path.clone()), config);
    ChartEngine::new(pipeline).run()?;

    let csv_content = std::fs::read_to_string(temp_dir.path().join("settings_chart.csv"))?;
    let lines: Vec<&str> = csv_content.lines().collect();

    assert_eq!(lines.len(), 10);
    assert!(lines.contains(&"TIG,Aluminum,0.25,-,-,-,-"));
    assert!(!temp_dir.path().join("settings_chart.json").exists());

    Ok(())
}
