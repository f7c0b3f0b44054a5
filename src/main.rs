use clap::Parser;
use mdl_diff::config::toml_config::TomlConfig;
use mdl_diff::utils::{logger, validation::Validate};
use mdl_diff::{CliConfig, DiffEngine, DiffError, LocalStorage};
use std::path::Path;

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting mdl-diff");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli) {
        tracing::error!(
            "❌ Comparison failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &CliConfig) -> Result<(), DiffError> {
    let config = cli.load()?;

    // 驗證配置
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated");

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be compared or written");
        print_run_plan(&config, &cli.runs)?;
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_dir());
    let engine = DiffEngine::new(storage, config);

    for outcome in engine.run(&cli.runs)? {
        if outcome.mismatches.is_empty() {
            println!(
                "✅ {}: {} models, all binary equal -> {}",
                outcome.name,
                outcome.total_models,
                outcome.output_path.display()
            );
        } else {
            println!(
                "⚠️  {}: {} models, {} binary unequal -> {}",
                outcome.name,
                outcome.total_models,
                outcome.mismatches.len(),
                outcome.output_path.display()
            );
        }
    }

    Ok(())
}

fn print_run_plan(config: &TomlConfig, selected: &[String]) -> Result<(), DiffError> {
    let pattern = config.pattern()?;

    println!("📋 Run Plan:");
    println!("  Pattern: {}", pattern.as_str());
    println!("  Strategy: {:?}", config.strategy());
    println!("  Output directory: {}", config.output_dir());

    for run in config.select_runs(selected)? {
        println!();
        println!(
            "  Run '{}' -> {} (summary: {})",
            run.name,
            run.output,
            if run.summary() { "on" } else { "off" }
        );
        for variant in run.variants() {
            let status = if variant.directory.is_dir() {
                "found"
            } else {
                "missing, treated as empty"
            };
            println!(
                "    {:<12} {} ({})",
                variant.display_name(),
                variant.directory.display(),
                status
            );
        }
        println!(
            "    Report: {}",
            Path::new(config.output_dir()).join(&run.output).display()
        );
    }

    println!();
    println!("✅ Dry run complete.");
    Ok(())
}
