//! Line chart of price, EMA 50 and EMA 200 rendered by QuickChart.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::config::timeouts;
use crate::signals::Evaluation;

use super::error::{Result, ServiceError};
use super::http::{build_client, endpoint, ensure_success};

/// Most recent bars shown on a chart.
pub const CHART_POINTS: usize = 100;

/// Parallel series for one chart. Undefined EMA entries stay `None` and are
/// drawn as gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub closes: Vec<f64>,
    pub ema_fast: Vec<Option<f64>>,
    pub ema_slow: Vec<Option<f64>>,
}

fn tail<T: Clone>(items: &[T], limit: usize) -> Vec<T> {
    items[items.len().saturating_sub(limit)..].to_vec()
}

impl ChartData {
    pub fn from_evaluation(evaluation: &Evaluation, limit: usize) -> Self {
        Self {
            labels: tail(&evaluation.dates, limit)
                .iter()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .collect(),
            closes: tail(&evaluation.closes, limit),
            ema_fast: tail(&evaluation.ema_fast, limit),
            ema_slow: tail(&evaluation.ema_slow, limit),
        }
    }
}

#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// URL of the rendered image, or `None` if rendering failed.
    async fn render(&self, ticker: &str, data: &ChartData) -> Option<String>;
}

fn dataset(label: &str, data: Value, color: &str, width: u32) -> Value {
    json!({
        "label": label,
        "data": data,
        "borderColor": color,
        "fill": false,
        "pointRadius": 0,
        "borderWidth": width,
    })
}

/// Chart.js configuration understood by QuickChart.
pub fn chart_config(ticker: &str, data: &ChartData) -> Value {
    json!({
        "type": "line",
        "data": {
            "labels": data.labels,
            "datasets": [
                dataset("Price", json!(data.closes), "black", 2),
                dataset("EMA 50", json!(data.ema_fast), "blue", 1),
                dataset("EMA 200", json!(data.ema_slow), "red", 1),
            ],
        },
        "options": {
            "title": { "display": true, "text": format!("{} Daily Chart", ticker) },
            "scales": {
                "xAxes": [{ "display": false }],
                "yAxes": [{ "display": true, "ticks": { "beginAtZero": false } }],
            },
        },
    })
}

#[derive(Debug, Deserialize)]
struct CreateChartResponse {
    url: Option<String>,
}

pub struct QuickChartRenderer {
    client: Client,
    base_url: String,
}

impl QuickChartRenderer {
    pub const WIDTH: u32 = 800;
    pub const HEIGHT: u32 = 400;

    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, build_client(timeouts::CHART))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn try_render(&self, ticker: &str, data: &ChartData) -> Result<String> {
        let body = json!({
            "chart": chart_config(ticker, data),
            "width": Self::WIDTH,
            "height": Self::HEIGHT,
        });
        let response = self
            .client
            .post(endpoint(&self.base_url, "chart/create"))
            .json(&body)
            .send()
            .await?;
        let created: CreateChartResponse = ensure_success(response)?.json().await?;
        created
            .url
            .ok_or_else(|| ServiceError::Malformed("chart response without url".to_string()))
    }
}

#[async_trait]
impl ChartRenderer for QuickChartRenderer {
    async fn render(&self, ticker: &str, data: &ChartData) -> Option<String> {
        match self.try_render(ticker, data).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "Chart rendering failed for {}", ticker);
                None
            }
        }
    }
}
