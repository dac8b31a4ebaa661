//! Trendscan Worker
//!
//! Runs a scan pass on every tick of `SCAN_SCHEDULE` until interrupted.

use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use trendscan::config::{get_environment, ScreenerConfig};
use trendscan::core::scheduler::ScanScheduler;
use trendscan::logging;
use trendscan::scan::{ScanContext, Scanner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = ScreenerConfig::from_env();
    let schedule = config.schedule()?;

    info!("Starting Trendscan Worker");
    info!(environment = %get_environment(), "Environment");
    info!(
        schedule = config.scan_schedule.as_deref().unwrap_or_default(),
        "Scan schedule"
    );

    let scanner = Arc::new(Scanner::new(Arc::new(ScanContext::from_config(&config))));
    let scheduler = ScanScheduler::new(scanner, schedule);
    scheduler.start().await;

    info!("Worker started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    info!("Shutting down worker...");
    scheduler.stop().await;
    info!("Worker stopped");

    Ok(())
}
