//! Telegram HTML report for a fired signal.

use chrono::NaiveDate;

use crate::models::Signal;

pub const NOT_AVAILABLE: &str = "N/A";

/// Escape the characters Telegram's HTML parse mode treats as markup.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalReport {
    pub ticker: String,
    pub name: String,
    pub signal: Signal,
    pub pe_ratio: Option<String>,
    pub regime_start: NaiveDate,
    pub price: f64,
}

impl SignalReport {
    pub fn caption(&self) -> String {
        let pe = self.pe_ratio.as_deref().unwrap_or(NOT_AVAILABLE);
        format!(
            "<b>{}</b> - {}\n{}\n\n📊 P/E Ratio: <b>{}</b>\n📅 Trend Start: {}\n💵 Price: ${:.2}",
            self.ticker,
            escape_html(&self.name),
            self.signal.headline(),
            escape_html(pe),
            self.regime_start.format("%Y-%m-%d"),
            self.price,
        )
    }
}
