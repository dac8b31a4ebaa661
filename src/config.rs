//! Environment-driven configuration.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use cron::Schedule;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid cron expression '{expr}': {reason}")]
    InvalidSchedule { expr: String, reason: String },
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Current deployment environment (`APP_ENVIRONMENT`, default `sandbox`).
pub fn get_environment() -> String {
    env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelegramConfig {
    pub api_url: String,
    pub bot_token: String,
    pub chat_id: String,
}

impl TelegramConfig {
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }
}

/// All knobs for one screener deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenerConfig {
    pub telegram: TelegramConfig,
    pub state_file: PathBuf,
    pub ticker_file: PathBuf,
    pub index_urls: Vec<String>,
    pub yahoo_base_url: String,
    pub finviz_base_url: String,
    pub quickchart_base_url: String,
    pub scan_schedule: Option<String>,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            telegram: TelegramConfig {
                api_url: "https://api.telegram.org".to_string(),
                bot_token: String::new(),
                chat_id: String::new(),
            },
            state_file: PathBuf::from("screener_state.json"),
            ticker_file: PathBuf::from("lookup_stocks"),
            index_urls: vec![
                "https://www.slickcharts.com/nasdaq100".to_string(),
                "https://www.slickcharts.com/sp500".to_string(),
            ],
            yahoo_base_url: "https://query1.finance.yahoo.com".to_string(),
            finviz_base_url: "https://finviz.com".to_string(),
            quickchart_base_url: "https://quickchart.io".to_string(),
            scan_schedule: None,
        }
    }
}

impl ScreenerConfig {
    /// Read the configuration from the process environment, falling back to
    /// the defaults for anything unset or blank.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            telegram: TelegramConfig {
                api_url: var_or("TELEGRAM_API_URL", &defaults.telegram.api_url),
                bot_token: var_or("TELEGRAM_BOT_TOKEN", ""),
                chat_id: var_or("TELEGRAM_CHAT_ID", ""),
            },
            state_file: PathBuf::from(var_or("STATE_FILE", &defaults.state_file.to_string_lossy())),
            ticker_file: PathBuf::from(var_or("TICKER_FILE", &defaults.ticker_file.to_string_lossy())),
            index_urls: vec![
                var_or("NASDAQ100_URL", &defaults.index_urls[0]),
                var_or("SP500_URL", &defaults.index_urls[1]),
            ],
            yahoo_base_url: var_or("YAHOO_BASE_URL", &defaults.yahoo_base_url),
            finviz_base_url: var_or("FINVIZ_BASE_URL", &defaults.finviz_base_url),
            quickchart_base_url: var_or("QUICKCHART_BASE_URL", &defaults.quickchart_base_url),
            scan_schedule: Some(var_or("SCAN_SCHEDULE", "")).filter(|s| !s.is_empty()),
        }
    }

    /// Parsed scan schedule, required by the worker.
    pub fn schedule(&self) -> Result<Schedule, ConfigError> {
        let expr = self
            .scan_schedule
            .as_deref()
            .ok_or(ConfigError::Missing("SCAN_SCHEDULE"))?;
        parse_schedule(expr)
    }
}

/// Parse a 6-field (seconds first) cron expression.
pub fn parse_schedule(expr: &str) -> Result<Schedule, ConfigError> {
    Schedule::from_str(expr).map_err(|e| ConfigError::InvalidSchedule {
        expr: expr.to_string(),
        reason: e.to_string(),
    })
}

/// Per-collaborator HTTP timeouts.
pub mod timeouts {
    use super::Duration;

    pub const TICKER_LIST: Duration = Duration::from_secs(15);
    pub const PRICE_HISTORY: Duration = Duration::from_secs(10);
    pub const FUNDAMENTALS: Duration = Duration::from_secs(10);
    pub const CHART: Duration = Duration::from_secs(20);
    pub const NOTIFY: Duration = Duration::from_secs(20);
}
