//! In-memory collaborators for scan tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use trendscan::models::PricePoint;
use trendscan::scan::ScanContext;
use trendscan::services::error::{Result, ServiceError};
use trendscan::services::{
    ChartData, ChartRenderer, Fundamentals, FundamentalsSource, Notifier, PriceHistorySource,
    TickerSource,
};
use trendscan::state::{DedupState, DedupStateStore};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Daily bars ending the day before `today()`.
pub fn bars(closes: &[f64]) -> Vec<PricePoint> {
    let first = today() - Duration::days(closes.len() as i64);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint::new(first + Duration::days(i as i64), close))
        .collect()
}

/// Declining series whose final bar jumps above the EMA 200.
pub fn breakout(count: usize) -> Vec<PricePoint> {
    let mut closes: Vec<f64> = (0..count - 1).map(|i| 200.0 - 0.1 * i as f64).collect();
    closes.push(300.0);
    bars(&closes)
}

/// Rising series with no transition on the final bar.
pub fn quiet(count: usize) -> Vec<PricePoint> {
    let closes: Vec<f64> = (0..count).map(|i| 100.0 + 0.5 * i as f64).collect();
    bars(&closes)
}

pub struct FakeTickers(pub Vec<String>);

#[async_trait]
impl TickerSource for FakeTickers {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_tickers(&self) -> Vec<String> {
        self.0.clone()
    }
}

#[derive(Default)]
pub struct FakeHistory {
    pub bars: HashMap<String, Vec<PricePoint>>,
    pub requested: Mutex<Vec<String>>,
}

#[async_trait]
impl PriceHistorySource for FakeHistory {
    async fn fetch_history(&self, ticker: &str) -> Vec<PricePoint> {
        self.requested.lock().unwrap().push(ticker.to_string());
        self.bars.get(ticker).cloned().unwrap_or_default()
    }
}

pub struct FakeFundamentals {
    pub available: bool,
}

#[async_trait]
impl FundamentalsSource for FakeFundamentals {
    async fn lookup(&self, ticker: &str) -> Fundamentals {
        if self.available {
            Fundamentals {
                name: format!("{} Corp", ticker),
                pe_ratio: Some("21.3".to_string()),
            }
        } else {
            Fundamentals::unavailable(ticker)
        }
    }
}

#[derive(Default)]
pub struct FakeCharts {
    pub url: Option<String>,
    pub rendered: Mutex<Vec<(String, usize)>>,
}

#[async_trait]
impl ChartRenderer for FakeCharts {
    async fn render(&self, ticker: &str, data: &ChartData) -> Option<String> {
        self.rendered
            .lock()
            .unwrap()
            .push((ticker.to_string(), data.closes.len()));
        self.url.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub caption: String,
    pub image_url: Option<String>,
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub failing_tickers: Vec<String>,
    pub deliveries: Mutex<Vec<Delivery>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(&self, caption: &str, image_url: Option<&str>) -> Result<()> {
        if self
            .failing_tickers
            .iter()
            .any(|t| caption.starts_with(&format!("<b>{}</b>", t)))
        {
            return Err(ServiceError::Status {
                status: 502,
                url: "sendMessage".to_string(),
            });
        }
        self.deliveries.lock().unwrap().push(Delivery {
            caption: caption.to_string(),
            image_url: image_url.map(str::to_string),
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStateStore {
    pub state: Mutex<DedupState>,
    pub saves: Mutex<usize>,
}

impl MemoryStateStore {
    pub fn with_state(state: DedupState) -> Self {
        Self {
            state: Mutex::new(state),
            saves: Mutex::new(0),
        }
    }

    pub fn snapshot(&self) -> DedupState {
        self.state.lock().unwrap().clone()
    }
}

#[async_trait]
impl DedupStateStore for MemoryStateStore {
    async fn load(&self) -> DedupState {
        self.snapshot()
    }

    async fn save(&self, state: &DedupState) -> Result<()> {
        *self.state.lock().unwrap() = state.clone();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

/// Handles on every fake so tests can inspect them after a pass.
pub struct TestScan {
    pub history: Arc<FakeHistory>,
    pub charts: Arc<FakeCharts>,
    pub notifier: Arc<RecordingNotifier>,
    pub store: Arc<MemoryStateStore>,
    pub context: Arc<ScanContext>,
}

pub struct TestScanBuilder {
    tickers: Vec<String>,
    bars: HashMap<String, Vec<PricePoint>>,
    chart_url: Option<String>,
    fundamentals_available: bool,
    failing_tickers: Vec<String>,
    state: DedupState,
}

impl TestScanBuilder {
    pub fn new() -> Self {
        Self {
            tickers: Vec::new(),
            bars: HashMap::new(),
            chart_url: Some("https://charts.test/abc.png".to_string()),
            fundamentals_available: true,
            failing_tickers: Vec::new(),
            state: DedupState::new(),
        }
    }

    pub fn ticker(mut self, ticker: &str, bars: Vec<PricePoint>) -> Self {
        self.tickers.push(ticker.to_string());
        self.bars.insert(ticker.to_string(), bars);
        self
    }

    pub fn without_chart(mut self) -> Self {
        self.chart_url = None;
        self
    }

    pub fn without_fundamentals(mut self) -> Self {
        self.fundamentals_available = false;
        self
    }

    pub fn failing_delivery(mut self, ticker: &str) -> Self {
        self.failing_tickers.push(ticker.to_string());
        self
    }

    pub fn state(mut self, state: DedupState) -> Self {
        self.state = state;
        self
    }

    pub fn build(self) -> TestScan {
        let history = Arc::new(FakeHistory {
            bars: self.bars,
            requested: Mutex::new(Vec::new()),
        });
        let charts = Arc::new(FakeCharts {
            url: self.chart_url,
            rendered: Mutex::new(Vec::new()),
        });
        let notifier = Arc::new(RecordingNotifier {
            failing_tickers: self.failing_tickers,
            deliveries: Mutex::new(Vec::new()),
        });
        let store = Arc::new(MemoryStateStore::with_state(self.state));

        let sources: Vec<Arc<dyn TickerSource>> = vec![Arc::new(FakeTickers(self.tickers))];
        let context = Arc::new(ScanContext::new(
            sources,
            history.clone(),
            Arc::new(FakeFundamentals {
                available: self.fundamentals_available,
            }),
            charts.clone(),
            notifier.clone(),
            store.clone(),
        ));

        TestScan {
            history,
            charts,
            notifier,
            store,
            context,
        }
    }
}
