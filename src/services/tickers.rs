//! Ticker universe sources: index constituent pages and a local list.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::{info, warn};

use crate::config::timeouts;

use super::error::Result;
use super::http::{build_client, ensure_success};

#[async_trait]
pub trait TickerSource: Send + Sync {
    /// Label used in logs.
    fn name(&self) -> &str;

    /// Normalized symbols. Empty on any failure.
    async fn fetch_tickers(&self) -> Vec<String>;
}

/// Upper-case, trim and map `.` to `-` (e.g. `brk.b` -> `BRK-B`).
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let cleaned = raw.trim().trim_matches('"').trim().to_uppercase().replace('.', "-");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

static SYMBOL_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/symbol/([A-Z0-9.]+)").unwrap());

/// Pull every `/symbol/<SYM>` link target out of an index page.
pub fn extract_symbols(html: &str) -> Vec<String> {
    SYMBOL_LINK
        .captures_iter(html)
        .map(|caps| caps[1].replace('.', "-"))
        .collect()
}

/// Every comma- or newline-separated cell of a ticker file.
pub fn parse_ticker_list(content: &str) -> Vec<String> {
    content
        .lines()
        .flat_map(|line| line.split(','))
        .filter_map(normalize_symbol)
        .collect()
}

/// Merge all sources into a sorted, de-duplicated universe.
pub async fn build_universe(sources: &[Arc<dyn TickerSource>]) -> Vec<String> {
    let mut universe = BTreeSet::new();
    for source in sources {
        universe.extend(source.fetch_tickers().await);
    }
    universe.into_iter().collect()
}

/// Index constituents scraped from a slickcharts table page.
pub struct SlickchartsTickerSource {
    client: Client,
    url: String,
}

impl SlickchartsTickerSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, build_client(timeouts::TICKER_LIST))
    }

    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    async fn try_fetch(&self) -> Result<Vec<String>> {
        let response = ensure_success(self.client.get(&self.url).send().await?)?;
        Ok(extract_symbols(&response.text().await?))
    }
}

#[async_trait]
impl TickerSource for SlickchartsTickerSource {
    fn name(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or(&self.url)
    }

    async fn fetch_tickers(&self) -> Vec<String> {
        match self.try_fetch().await {
            Ok(symbols) => {
                info!(source = %self.name(), count = symbols.len(), "Fetched {} tickers from {}", symbols.len(), self.name());
                symbols
            }
            Err(e) => {
                warn!(source = %self.name(), error = %e, "Failed to fetch ticker list from {}", self.url);
                Vec::new()
            }
        }
    }
}

/// Extra tickers from a local CSV or plain-text file.
pub struct FileTickerSource {
    path: PathBuf,
    label: String,
}

impl FileTickerSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }
}

#[async_trait]
impl TickerSource for FileTickerSource {
    fn name(&self) -> &str {
        &self.label
    }

    async fn fetch_tickers(&self) -> Vec<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let tickers = parse_ticker_list(&content);
                info!(source = %self.label, count = tickers.len(), "Loaded {} tickers from {}", tickers.len(), self.label);
                tickers
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(source = %self.label, "Local ticker file not found, skipping");
                Vec::new()
            }
            Err(e) => {
                warn!(source = %self.label, error = %e, "Failed to read ticker file");
                Vec::new()
            }
        }
    }
}
