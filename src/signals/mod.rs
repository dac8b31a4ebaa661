//! Signal detection interfaces.

pub mod detector;
pub mod engine;
pub mod regime;
pub mod report;

pub use detector::*;
pub use engine::*;
pub use regime::*;
pub use report::*;
