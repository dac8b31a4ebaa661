//! Display name and P/E lookup from the finviz quote page.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::warn;
use url::Url;

use crate::config::timeouts;

use super::error::Result;
use super::http::{build_client, endpoint, ensure_success};

#[derive(Debug, Clone, PartialEq)]
pub struct Fundamentals {
    pub name: String,
    pub pe_ratio: Option<String>,
}

impl Fundamentals {
    /// Placeholder used whenever the lookup fails.
    pub fn unavailable(ticker: &str) -> Self {
        Self {
            name: ticker.to_string(),
            pe_ratio: None,
        }
    }
}

#[async_trait]
pub trait FundamentalsSource: Send + Sync {
    /// Never fails: falls back to [`Fundamentals::unavailable`].
    async fn lookup(&self, ticker: &str) -> Fundamentals;
}

static TITLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title>[^-]+- (.*?) Stock Price").unwrap());
static PE_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)>P/E</td>.*?<b>(.*?)</b>").unwrap());
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").unwrap());

/// Company name from `<title>TICKER - Company Name Stock Price …</title>`.
fn parse_name(html: &str) -> Option<String> {
    TITLE_NAME.captures(html).map(|caps| caps[1].to_string())
}

/// Bold value of the table cell following the `P/E` label.
fn parse_pe(html: &str) -> Option<String> {
    PE_CELL
        .captures(html)
        .map(|caps| HTML_TAG.replace_all(&caps[1], "").into_owned())
}

pub fn parse_quote_page(ticker: &str, html: &str) -> Fundamentals {
    Fundamentals {
        name: parse_name(html).unwrap_or_else(|| ticker.to_string()),
        pe_ratio: parse_pe(html),
    }
}

pub struct FinvizFundamentals {
    client: Client,
    base_url: String,
}

impl FinvizFundamentals {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, build_client(timeouts::FUNDAMENTALS))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn try_lookup(&self, ticker: &str) -> Result<Fundamentals> {
        let url = Url::parse_with_params(&endpoint(&self.base_url, "quote.ashx"), &[("t", ticker)])?;
        let response = ensure_success(self.client.get(url).send().await?)?;
        Ok(parse_quote_page(ticker, &response.text().await?))
    }
}

#[async_trait]
impl FundamentalsSource for FinvizFundamentals {
    async fn lookup(&self, ticker: &str) -> Fundamentals {
        self.try_lookup(ticker).await.unwrap_or_else(|e| {
            warn!(ticker = %ticker, error = %e, "Fundamentals unavailable for {}", ticker);
            Fundamentals::unavailable(ticker)
        })
    }
}
