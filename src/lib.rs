//! Daily EMA trend screener: scans a ticker universe for price / EMA 200
//! crosses and golden / death crosses and reports each hit once per day.

pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod scan;
pub mod services;
pub mod signals;
pub mod state;
