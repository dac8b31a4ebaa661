//! Trendscan
//!
//! Runs a single scan pass for today's date and exits. Use the `worker`
//! binary for scheduled scans.

use chrono::Local;
use dotenvy::dotenv;
use std::sync::Arc;
use trendscan::config::{get_environment, ScreenerConfig};
use trendscan::logging;
use trendscan::scan::{ScanContext, Scanner};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = ScreenerConfig::from_env();
    info!(environment = %get_environment(), state_file = %config.state_file.display(), "Starting Trendscan");

    let scanner = Scanner::new(Arc::new(ScanContext::from_config(&config)));
    let summary = scanner.run(Local::now().date_naive()).await?;

    for (ticker, signal) in &summary.notified {
        info!(ticker = %ticker, signal = %signal, "Notified {}", ticker);
    }

    Ok(())
}
