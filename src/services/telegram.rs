//! Telegram bot delivery with a text-only fallback.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use crate::config::{timeouts, TelegramConfig};

use super::error::{Result, ServiceError};
use super::http::{build_client, endpoint, ensure_success};

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver an HTML report, with the image when one is given. Errors only
    /// when even text-only delivery failed.
    async fn deliver(&self, caption: &str, image_url: Option<&str>) -> Result<()>;
}

pub struct TelegramNotifier {
    client: Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Self {
        Self::with_client(config, build_client(timeouts::NOTIFY))
    }

    pub fn with_client(config: TelegramConfig, client: Client) -> Self {
        Self { client, config }
    }

    fn method_url(&self, method: &str) -> String {
        endpoint(
            &self.config.api_url,
            &format!("bot{}/{}", self.config.bot_token, method),
        )
    }

    async fn post_form(&self, method: &str, form: &[(&str, &str)]) -> Result<()> {
        let response = self
            .client
            .post(self.method_url(method))
            .form(form)
            .send()
            .await
            .map_err(|e| ServiceError::from(e).without_url())?;
        ensure_success(response).map_err(ServiceError::without_url)?;
        Ok(())
    }

    async fn send_photo(&self, caption: &str, image_url: &str) -> Result<()> {
        self.post_form(
            "sendPhoto",
            &[
                ("chat_id", self.config.chat_id.as_str()),
                ("photo", image_url),
                ("caption", caption),
                ("parse_mode", "HTML"),
            ],
        )
        .await
    }

    async fn send_message(&self, text: &str) -> Result<()> {
        self.post_form(
            "sendMessage",
            &[
                ("chat_id", self.config.chat_id.as_str()),
                ("text", text),
                ("parse_mode", "HTML"),
            ],
        )
        .await
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, caption: &str, image_url: Option<&str>) -> Result<()> {
        if !self.config.is_configured() {
            info!(report = %caption, "Telegram not configured, logging report instead");
            return Ok(());
        }

        if let Some(image_url) = image_url {
            match self.send_photo(caption, image_url).await {
                Ok(()) => return Ok(()),
                Err(e) => warn!(error = %e, "sendPhoto failed, falling back to text"),
            }
        }

        self.send_message(caption).await
    }
}
