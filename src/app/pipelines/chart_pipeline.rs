use crate::config::toml_config::MAX_CHART_POINTS;
use crate::core::advisor::SettingsAdvisor;
use crate::core::{ChartInput, ChartResult, ChartRow, ConfigProvider, Pipeline, Storage};
use crate::domain::model::{Material, Process, RecommendedSettings, Thickness};
use crate::utils::error::{AdvisorError, Result};
use serde::Serialize;

pub const CSV_FILENAME: &str = "settings_chart.csv";
pub const JSON_FILENAME: &str = "settings_chart.json";

const CSV_HEADERS: [&str; 7] = [
    "Process",
    "Material",
    "Thickness (in)",
    "Voltage (V)",
    "Amperage (A)",
    "Wire Speed (in/min)",
    "Gas",
];

// 容許浮點累積誤差，讓 end 本身也被包含
const RANGE_EPSILON: f64 = 1e-9;

#[derive(Serialize)]
struct CsvRecord<'a> {
    process: &'a str,
    material: &'a str,
    thickness: f64,
    voltage: &'a str,
    amperage: &'a str,
    wire_speed: &'a str,
    gas: &'a str,
}

pub struct ChartPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) advisor: SettingsAdvisor,
}

impl<S: Storage, C: ConfigProvider> ChartPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let advisor = SettingsAdvisor::from_config(&config);
        Self {
            storage,
            config,
            advisor,
        }
    }

    fn thickness_points(&self) -> Result<Vec<Thickness>> {
        let range = self.config.thickness_range();
        if range.step.is_nan() || range.step <= 0.0 {
            return Err(AdvisorError::ProcessingError {
                message: format!("Thickness step must be positive, got {}", range.step),
            });
        }

        let mut points = Vec::new();
        loop {
            let t = range.start + points.len() as f64 * range.step;
            if t > range.end + RANGE_EPSILON {
                break;
            }
            if points.len() >= MAX_CHART_POINTS {
                return Err(AdvisorError::ProcessingError {
                    message: format!("Chart would exceed {} thickness points", MAX_CHART_POINTS),
                });
            }
            points.push(Thickness::new(t));
        }

        Ok(points)
    }

    fn render_csv(rows: &[ChartRow]) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(CSV_HEADERS)?;

        for row in rows {
            writer.serialize(CsvRecord {
                process: row.process.as_str(),
                material: row.material.as_str(),
                thickness: row.thickness.inches(),
                voltage: &row.settings.voltage,
                amperage: &row.settings.amperage,
                wire_speed: &row.settings.wire_speed,
                gas: &row.settings.gas,
            })?;
        }

        let data = writer
            .into_inner()
            .map_err(|e| AdvisorError::ProcessingError {
                message: format!("Failed to flush CSV output: {}", e),
            })?;
        String::from_utf8(data).map_err(|e| AdvisorError::ProcessingError {
            message: format!("CSV output is not valid UTF-8: {}", e),
        })
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for ChartPipeline<S, C> {
    fn extract(&self) -> Result<Vec<ChartInput>> {
        let points = self.thickness_points()?;
        tracing::debug!("Sweeping {} thickness point(s)", points.len());

        let pairs = Process::ALL.len() * Material::ALL.len();
        let mut inputs = Vec::with_capacity(points.len() * pairs);
        for process in Process::ALL {
            for material in Material::ALL {
                for thickness in &points {
                    inputs.push(ChartInput {
                        process,
                        material,
                        thickness: *thickness,
                    });
                }
            }
        }

        Ok(inputs)
    }

    fn transform(&self, inputs: Vec<ChartInput>) -> Result<ChartResult> {
        let include_unmapped = self.config.include_unmapped();
        let mut rows = Vec::new();
        let mut skipped = 0usize;

        for input in inputs {
            let settings = self
                .advisor
                .derive(input.process, input.material, input.thickness);

            if settings.is_none() && !include_unmapped {
                skipped += 1;
                continue;
            }

            rows.push(ChartRow {
                process: input.process,
                material: input.material,
                thickness: input.thickness,
                settings: RecommendedSettings::from(settings),
            });
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} point(s) without a rule", skipped);
        }

        Ok(ChartResult {
            csv_output: Self::render_csv(&rows)?,
            json_output: serde_json::to_string_pretty(&rows)?,
            rows,
        })
    }

    fn load(&self, result: ChartResult) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            let (filename, content) = match format.as_str() {
                "csv" => (CSV_FILENAME, &result.csv_output),
                "json" => (JSON_FILENAME, &result.json_output),
                other => {
                    return Err(AdvisorError::ProcessingError {
                        message: format!("Unsupported chart format: {}", other),
                    })
                }
            };

            tracing::debug!("Writing {} ({} bytes)", filename, content.len());
            self.storage.write_file(filename, content.as_bytes())?;
            written.push(format!("{}/{}", self.config.output_path(), filename));
        }

        Ok(written)
    }
}
