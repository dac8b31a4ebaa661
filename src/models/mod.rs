//! Shared data models spanning the engine layers.

pub mod price;
pub mod signal;

pub use price::{split_history, PricePoint};
pub use signal::{Direction, Signal};
