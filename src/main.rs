use clap::Parser;
use weld_advisor::core::ConfigProvider;
use weld_advisor::utils::error::{AdvisorError, ErrorSeverity};
use weld_advisor::utils::{logger, validation::assess_thickness, validation::Validate};
use weld_advisor::{render, CliConfig, SettingsAdvisor, Thickness, ThicknessLimits, TomlConfig};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ Recommendation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn run(config: &CliConfig) -> Result<(), AdvisorError> {
    config.validate()?;

    // 載入額外規則
    let (advisor, limits) = match &config.rules {
        Some(path) => {
            tracing::info!("📁 Loading rules from: {}", path);
            let rules_config = TomlConfig::from_file(path)?;
            rules_config.validate()?;
            (
                SettingsAdvisor::from_config(&rules_config),
                rules_config.thickness_limits(),
            )
        }
        None => (SettingsAdvisor::builtin(), ThicknessLimits::default()),
    };

    let thickness = Thickness::parse_lenient(&config.thickness);
    if Thickness::parse(&config.thickness).is_none() {
        tracing::warn!(
            "Could not read a number from '{}', using 0 in",
            config.thickness
        );
    }
    for warning in assess_thickness(thickness, &limits) {
        tracing::warn!("{}", warning);
    }

    let settings = advisor.recommend(config.process, config.material, thickness);
    if !settings.is_available() {
        tracing::info!(
            "No recommendation available for {}/{}",
            config.process,
            config.material
        );
    }

    println!("{}", render(&settings, config.format)?);
    Ok(())
}
