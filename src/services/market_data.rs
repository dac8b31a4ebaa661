//! Daily price history provider interface and the Yahoo chart implementation.

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::timeouts;
use crate::models::PricePoint;

use super::error::{Result, ServiceError};
use super::http::{build_client, endpoint, ensure_success};

#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    /// Ascending daily closes for a ticker. Empty on any failure.
    async fn fetch_history(&self, ticker: &str) -> Vec<PricePoint>;
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Parse a Yahoo `v8/finance/chart` payload into normalized daily bars.
pub fn parse_chart(body: &str) -> Result<Vec<PricePoint>> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;
    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let mut points = Vec::with_capacity(closes.len());
    for (ts, close) in result.timestamp.iter().zip(closes) {
        let Some(close) = close else { continue };
        let date = DateTime::from_timestamp(*ts, 0)
            .ok_or_else(|| ServiceError::Malformed(format!("timestamp out of range: {}", ts)))?
            .date_naive();
        points.push(PricePoint::new(date, close));
    }

    Ok(normalize_history(points))
}

/// Sort ascending, drop unusable closes and collapse duplicate dates (the
/// later bar wins).
pub fn normalize_history(mut points: Vec<PricePoint>) -> Vec<PricePoint> {
    points.retain(|p| p.close.is_finite() && p.close > 0.0);
    points.sort_by_key(|p| p.date);

    let mut out: Vec<PricePoint> = Vec::with_capacity(points.len());
    for point in points {
        match out.last_mut() {
            Some(last) if last.date == point.date => *last = point,
            _ => out.push(point),
        }
    }
    out
}

/// Two years of daily bars from Yahoo Finance.
pub struct YahooPriceHistory {
    client: Client,
    base_url: String,
}

impl YahooPriceHistory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, build_client(timeouts::PRICE_HISTORY))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn try_fetch(&self, ticker: &str) -> Result<Vec<PricePoint>> {
        let url = Url::parse_with_params(
            &endpoint(&self.base_url, &format!("v8/finance/chart/{}", ticker)),
            &[("range", "2y"), ("interval", "1d")],
        )?;
        let response = ensure_success(self.client.get(url).send().await?)?;
        let body = response.text().await?;
        parse_chart(&body)
    }
}

#[async_trait]
impl PriceHistorySource for YahooPriceHistory {
    async fn fetch_history(&self, ticker: &str) -> Vec<PricePoint> {
        match self.try_fetch(ticker).await {
            Ok(points) => {
                debug!(ticker = %ticker, count = points.len(), "Fetched {} bars for {}", points.len(), ticker);
                points
            }
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "Price history unavailable for {}", ticker);
                Vec::new()
            }
        }
    }
}
