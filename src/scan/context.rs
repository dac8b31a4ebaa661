//! Collaborators handed to the scanner

use crate::config::ScreenerConfig;
use crate::services::{
    ChartRenderer, FileTickerSource, FinvizFundamentals, FundamentalsSource, Notifier,
    PriceHistorySource, QuickChartRenderer, SlickchartsTickerSource, TelegramNotifier,
    TickerSource, YahooPriceHistory,
};
use crate::state::{DedupStateStore, JsonStateStore};
use std::sync::Arc;

/// Everything a scan pass talks to outside the signal core.
///
/// Production wiring comes from [`ScanContext::from_config`]; tests build one
/// from in-memory fakes with [`ScanContext::new`].
pub struct ScanContext {
    pub ticker_sources: Vec<Arc<dyn TickerSource>>,
    pub price_history: Arc<dyn PriceHistorySource>,
    pub fundamentals: Arc<dyn FundamentalsSource>,
    pub charts: Arc<dyn ChartRenderer>,
    pub notifier: Arc<dyn Notifier>,
    pub state_store: Arc<dyn DedupStateStore>,
}

impl ScanContext {
    pub fn new(
        ticker_sources: Vec<Arc<dyn TickerSource>>,
        price_history: Arc<dyn PriceHistorySource>,
        fundamentals: Arc<dyn FundamentalsSource>,
        charts: Arc<dyn ChartRenderer>,
        notifier: Arc<dyn Notifier>,
        state_store: Arc<dyn DedupStateStore>,
    ) -> Self {
        Self {
            ticker_sources,
            price_history,
            fundamentals,
            charts,
            notifier,
            state_store,
        }
    }

    pub fn from_config(config: &ScreenerConfig) -> Self {
        let mut ticker_sources: Vec<Arc<dyn TickerSource>> = config
            .index_urls
            .iter()
            .map(|url| Arc::new(SlickchartsTickerSource::new(url.clone())) as Arc<dyn TickerSource>)
            .collect();
        ticker_sources.push(Arc::new(FileTickerSource::new(config.ticker_file.clone())));

        Self::new(
            ticker_sources,
            Arc::new(YahooPriceHistory::new(config.yahoo_base_url.clone())),
            Arc::new(FinvizFundamentals::new(config.finviz_base_url.clone())),
            Arc::new(QuickChartRenderer::new(config.quickchart_base_url.clone())),
            Arc::new(TelegramNotifier::new(config.telegram.clone())),
            Arc::new(JsonStateStore::new(config.state_file.clone())),
        )
    }
}
