use clap::Parser;
use index_filter::core::engine::exit_code;
use index_filter::core::ConfigProvider;
use index_filter::utils::error::FilterError;
use index_filter::utils::{logger, validation::Validate};
use index_filter::{CliConfig, FilterEngine, FilterSettings, LocalStorage};

fn report_failure(e: &FilterError) {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        report_failure(&e);
        std::process::exit(2);
    }

    let settings = match FilterSettings::resolve(&config) {
        Ok(settings) => settings,
        Err(e) => {
            report_failure(&e);
            std::process::exit(2);
        }
    };

    // a missing path is not special-cased; opening "" fails like any bad path
    let path = config.path.clone().unwrap_or_default();

    let engine = FilterEngine::from_config(LocalStorage::new(), &settings);

    let result = engine.run(&path).await;

    match &result {
        Ok(report) => {
            tracing::debug!(
                "Done: {} read, {} kept, {} dropped, {} bytes written",
                report.lines_read,
                report.lines_kept,
                report.lines_dropped(),
                report.bytes_written
            );
            if settings.dry_run() {
                println!(
                    "{}: {} of {} lines would be dropped",
                    path.display(),
                    report.lines_dropped(),
                    report.lines_read
                );
                for dropped in &report.dropped {
                    println!("  line {}: {}", dropped.line_number, dropped.key);
                }
            }
        }
        Err(e) => report_failure(e),
    }

    let code = exit_code(&result, settings.write_failure_policy());
    if code != 0 {
        std::process::exit(code);
    }
}
