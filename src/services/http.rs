//! Shared HTTP client construction.

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::warn;

use super::error::{Result, ServiceError};

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Client with a per-call timeout and a browser user agent. Falls back to a
/// default client if the builder rejects the settings.
pub fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Failed to build HTTP client, using defaults");
            Client::new()
        })
}

/// Join a base URL and a path without doubling slashes.
pub fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Turn a non-2xx response into `ServiceError::Status`.
pub fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ServiceError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}
