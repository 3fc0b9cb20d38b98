use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use pulse_cli::config::PulseConfig;
use pulse_cli::pipeline;
use pulse_service::LinearService;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = PulseConfig::parse();
    let api_key = match config.api_key() {
        Ok(key) => key.to_string(),
        Err(e) => {
            eprintln!("pulse: {e}");
            std::process::exit(1);
        }
    };

    info!("pulse starting");
    info!("api: {}", config.api_url);

    let service = LinearService::new(&config.api_url, api_key);
    match service.health_check().await {
        Ok(viewer) => info!("authenticated as {}", viewer.name),
        Err(e) => warn!("linear api check failed: {e}"),
    }

    let outcome = pipeline::run(&config, &service, Utc::now()).await;

    // Fetch and write failures are already logged; they never change the
    // exit status.
    if !outcome.is_complete() {
        warn!("report finished with errors");
    }
    Ok(())
}
