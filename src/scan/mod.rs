//! Scan orchestration: universe -> per-ticker evaluation -> delivery.

pub mod context;
pub mod scanner;
pub mod types;

pub use context::ScanContext;
pub use scanner::Scanner;
pub use types::{ScanSummary, TickerOutcome};
