use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use anyhow::Context;
use chrono::Utc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use letterboxd_club_etl::config::Settings;
use letterboxd_club_etl::{run, ClientPool, Error, LetterboxdService};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env("LOGLEVEL").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::from(2);
        }
    };

    match extract(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{:#}", e);
            error!(error = %message, "Extraction failed");
            match e.downcast_ref::<Error>() {
                Some(err) if err.is_config() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

async fn extract(settings: Settings) -> anyhow::Result<()> {
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    info!(
        started_at = %timestamp,
        list_owner = %settings.list_owner,
        list_slug = %settings.list_slug,
        "Starting extraction"
    );

    let client_pool = Arc::new(ClientPool::new().context("failed to build HTTP clients")?);
    let service = LetterboxdService::new(client_pool, settings.scrape.clone());

    let start_time = Instant::now();
    run(&service, &settings)
        .await
        .with_context(|| format!("failed to build report for list {}/{}", settings.list_owner, settings.list_slug))?;

    info!(
        elapsed_secs = start_time.elapsed().as_secs_f64(),
        output = %settings.output_path.display(),
        "Extraction complete"
    );
    Ok(())
}
