//! Per-ticker outcomes and the pass summary

use crate::models::Signal;
use serde::Serialize;

/// What happened to one ticker during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerOutcome {
    AlreadyNotified,
    InsufficientHistory,
    NoSignal,
    Notified(Signal),
    DeliveryFailed(Signal),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanSummary {
    pub universe: usize,
    pub already_notified: usize,
    pub insufficient_history: usize,
    pub no_signal: usize,
    pub notified: Vec<(String, Signal)>,
    pub delivery_failed: Vec<(String, Signal)>,
}

impl ScanSummary {
    pub fn record(&mut self, ticker: &str, outcome: TickerOutcome) {
        match outcome {
            TickerOutcome::AlreadyNotified => self.already_notified += 1,
            TickerOutcome::InsufficientHistory => self.insufficient_history += 1,
            TickerOutcome::NoSignal => self.no_signal += 1,
            TickerOutcome::Notified(signal) => self.notified.push((ticker.to_string(), signal)),
            TickerOutcome::DeliveryFailed(signal) => {
                self.delivery_failed.push((ticker.to_string(), signal))
            }
        }
    }
}
