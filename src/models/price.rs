use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily bar of a ticker's history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Split a history into its parallel date and close columns.
pub fn split_history(history: &[PricePoint]) -> (Vec<NaiveDate>, Vec<f64>) {
    history.iter().map(|p| (p.date, p.close)).unzip()
}
