use chrono::Utc;
use compliance_harness::app_config::AppConfig;
use compliance_harness::data_service::{DataService, HttpDataService, ServiceOutcome, new_client};
use compliance_harness::run_loader::load_test_runs_from;
use compliance_harness::runner::{execute, validation_results};
use compliance_harness::translation::error_message;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = Arc::new(AppConfig::load()?);
    info!("✅  Loaded configuration");

    let client = new_client(&config)?;
    let service = HttpDataService::new(client, config.clone());

    let bundle = match service.get_resource_bundle(config.core().locale()).await {
        ServiceOutcome::Success(bundle) => bundle,
        ServiceOutcome::Failed(errors) => {
            let message = error_message(&Default::default(), &errors, None, config.core().show_error_code());
            warn!("⚠️ {}: {}, messages will not be translated", message.title, message.message);
            Default::default()
        }
    };
    info!("✅  Loaded resource bundle for '{}'", config.core().locale());

    let runs = load_test_runs_from(config.runs().directory(), "json").await?;
    let mut passed = 0;

    for run in &runs {
        let report = match execute(run, &service, &bundle, &config, Utc::now()).await {
            Ok(report) => report,
            Err(e) => {
                warn!("⚠️ Unable to execute '{}': {}", run.test_case.test_id, e);
                continue;
            }
        };

        for outcome in [&report.request_validation, &report.response_validation] {
            match outcome {
                ServiceOutcome::Success(body) => {
                    for result in validation_results(body, &bundle) {
                        info!(test_id = %report.test_id, status = %result.status, "{}: {}", result.name, result.description);
                    }
                }
                ServiceOutcome::Failed(errors) => {
                    let message = error_message(&bundle, errors, None, config.core().show_error_code());
                    warn!(test_id = %report.test_id, "⚠️ {}: {}", message.title, message.message);
                }
            }
        }

        if report.is_success() {
            passed += 1;
        }
    }

    info!("🔥 Executed {} test run(s), {} validated", runs.len(), passed);

    Ok(())
}
