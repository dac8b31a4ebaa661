pub mod error;
pub mod trend;

pub use error::{ensure_aligned, IndicatorError};
pub use trend::*;
