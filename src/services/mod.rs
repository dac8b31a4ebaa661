//! External collaborators: ticker lists, price history, fundamentals,
//! chart rendering and notification delivery.

pub mod chart;
pub mod error;
pub mod fundamentals;
pub mod http;
pub mod market_data;
pub mod telegram;
pub mod tickers;

pub use chart::{ChartData, ChartRenderer, QuickChartRenderer, CHART_POINTS};
pub use error::ServiceError;
pub use fundamentals::{Fundamentals, FundamentalsSource, FinvizFundamentals};
pub use market_data::{PriceHistorySource, YahooPriceHistory};
pub use telegram::{Notifier, TelegramNotifier};
pub use tickers::{build_universe, FileTickerSource, SlickchartsTickerSource, TickerSource};
