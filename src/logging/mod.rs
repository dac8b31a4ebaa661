//! Logging setup for the screener binaries.
//!
//! Production deployments (cron / systemd) get one JSON object per line so
//! the scan summary can be grepped by field; everywhere else gets coloured
//! text. `RUST_LOG` overrides the default `info` filter.

use crate::config::get_environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn for_environment(env: &str) -> Self {
        if matches!(env.to_ascii_lowercase().as_str(), "production" | "prod") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match LogFormat::for_environment(&get_environment()) {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_target(true)
                    .with_writer(std::io::stdout),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("logging already initialised: {}", e);
    }
}
