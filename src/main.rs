use clap::Parser;
use cvn_buttons::core::ConfigProvider;
use cvn_buttons::domain::model::default_bindings;
use cvn_buttons::utils::error::ErrorSeverity;
use cvn_buttons::utils::{logger, validation::Validate};
use cvn_buttons::{CliConfig, HttpNotifier, RppalGpio, WatchEngine};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting cvn-buttons");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let bindings = default_bindings();
    let gpio = match RppalGpio::init(&bindings) {
        Ok(gpio) => Arc::new(gpio),
        Err(e) => {
            tracing::error!("❌ GPIO initialization failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(3);
        }
    };
    let notifier = Arc::new(HttpNotifier::new(config.server_url()));

    tracing::info!(
        "Reporting presses to {} ({:?} mode, poll every {:?})",
        config.server_url(),
        config.trigger_mode(),
        config.poll_interval()
    );

    let engine = WatchEngine::new(gpio, notifier, &config);
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    match engine.run(shutdown).await {
        Ok(reports) => {
            for report in &reports {
                tracing::info!(
                    "✅ {} (pin {}): {} presses, {} drained, {} abandoned",
                    report.binding.target,
                    report.binding.pin,
                    report.presses,
                    report.drained,
                    report.abandoned
                );
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Button watching failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
