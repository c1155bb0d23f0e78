//! # KeyAsio sync
//!
//! Reconstructs live osu! gameplay state from process memory and keeps it
//! published for hitsound playback. Runs against a simulated client session.

mod services;
mod settings;

use anyhow::Result;
use services::report::report_snapshots;
use services::SyncService;
use settings::AppSettings;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "keyasio_core=info,keyasio_memory=info,keyasio_app=debug".into()
            }),
        )
        .init();

    info!("Starting KeyAsio sync v{}", env!("CARGO_PKG_VERSION"));

    let (settings, path) = AppSettings::load()?;
    info!("Settings loaded from {}", path.display());

    let service = SyncService::simulated(settings.simulation.clone());
    service.start(settings.scan)?;

    let report = tokio::spawn(report_snapshots(
        service.snapshot(),
        settings.report_interval(),
    ));

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    report.abort();
    service.stop().await?;
    Ok(())
}
