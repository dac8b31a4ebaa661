//! Cron-based scheduler for recurring scan passes

use crate::scan::Scanner;
use chrono::Local;
use cron::Schedule;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Scheduler that runs a full scan pass on every cron tick
pub struct ScanScheduler {
    scanner: Arc<Scanner>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl ScanScheduler {
    pub fn new(scanner: Arc<Scanner>, schedule: Schedule) -> Self {
        Self {
            scanner,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        }
    }

    /// Start the scheduler loop in the background. Ticks are evaluated in
    /// local time so a schedule like "after market close" reads naturally.
    pub async fn start(&self) {
        let scanner = self.scanner.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("ScanScheduler: started, waiting for cron schedule...");

            loop {
                let Some(next_tick) = schedule.upcoming(Local).next() else {
                    info!("ScanScheduler: schedule has no upcoming ticks, stopping");
                    break;
                };
                let now = Local::now();
                if next_tick > now {
                    let duration = (next_tick - now).to_std().unwrap_or_default();
                    info!(next = %next_tick, "ScanScheduler: next scan at {}", next_tick);
                    tokio::time::sleep(duration).await;
                }

                let today = Local::now().date_naive();
                match scanner.run(today).await {
                    Ok(summary) => info!(
                        notified = summary.notified.len(),
                        universe = summary.universe,
                        "ScanScheduler: pass finished"
                    ),
                    Err(e) => {
                        error!(error = %e, "ScanScheduler: scan aborted on invariant violation, stopping");
                        break;
                    }
                }
            }
        });

        *self.handle.write().await = Some(handle);
        info!("ScanScheduler: started successfully");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("ScanScheduler: stopped");
        }
    }

    /// Check if the scheduler loop is still alive
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}
