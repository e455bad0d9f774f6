use clap::Parser;
use weld_advisor::core::ConfigProvider;
use weld_advisor::utils::{logger, validation::Validate};
use weld_advisor::{ChartEngine, ChartPipeline, LocalStorage, SettingsAdvisor, TomlConfig};

#[derive(Parser)]
#[command(name = "settings-chart")]
#[command(about = "Export a welding settings chart over a thickness range")]
struct Args {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<String>,

    /// Override the chart output directory from config
    #[arg(short, long)]
    output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Show what would be written without writing anything
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting settings chart export");

    // 載入 TOML 配置
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => TomlConfig::default(),
    };

    // 應用命令列覆蓋設定
    if let Some(output) = &args.output {
        config.set_output_path(output.clone());
        tracing::info!("🔧 Output path overridden to: {}", output);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = ChartPipeline::new(storage, config);
    let engine = ChartEngine::new(pipeline);

    let written = engine.run()?;
    println!("✅ Settings chart exported!");
    for path in written {
        println!("📁 {}", path);
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let range = config.thickness_range();
    let advisor = SettingsAdvisor::from_config(config);

    println!("📋 Configuration Summary:");
    if let Some(name) = config.name() {
        println!("  Name: {}", name);
    }
    println!(
        "  Thickness: {} .. {} in (step {})",
        range.start, range.end, range.step
    );
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    println!("  Include unmapped pairs: {}", config.include_unmapped());

    let covered: Vec<String> = advisor
        .rules()
        .keys()
        .iter()
        .map(|(p, m)| format!("{}/{}", p, m))
        .collect();
    println!("  Rules: {}", covered.join(", "));

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
