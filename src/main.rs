use clap::Parser;
use col_compare::adapters::output::{render, write_output};
use col_compare::utils::error::CompareError;
use col_compare::utils::{logger, validation::Validate};
use col_compare::{CliConfig, ComparisonEngine};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_format == "json" {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting col-compare");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ Comparison failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(config: &CliConfig) -> Result<(), CompareError> {
    let settings = config.resolve()?;

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e);
    }

    let source = settings.source()?;
    let engine = ComparisonEngine::load(&source, settings.engine()?)?;

    if config.list_countries {
        let countries = engine.countries().join("\n");
        return write_output(settings.output_path.as_deref(), &countries);
    }

    let comparison = engine.compare(&settings.reference)?;
    let content = render(&comparison, settings.output_format()?)?;
    write_output(settings.output_path.as_deref(), &content)
}
