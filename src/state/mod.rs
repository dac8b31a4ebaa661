//! Per-ticker "last notified" bookkeeping persisted between runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};

use crate::services::error::Result;

/// Ticker -> date it last triggered a notification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupState {
    entries: BTreeMap<String, NaiveDate>,
}

impl DedupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_notified(&self, ticker: &str) -> Option<NaiveDate> {
        self.entries.get(ticker).copied()
    }

    pub fn notified_on(&self, ticker: &str, day: NaiveDate) -> bool {
        self.last_notified(ticker) == Some(day)
    }

    pub fn mark(&mut self, ticker: &str, day: NaiveDate) {
        self.entries.insert(ticker.to_string(), day);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flat `{ "TICKER": "YYYY-MM-DD" }` object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Parse the flat JSON object. Entries whose value is not an ISO date are
    /// dropped; a payload that is not an object is an error.
    pub fn from_json(raw: &str) -> Result<Self> {
        let map: BTreeMap<String, Value> = serde_json::from_str(raw)?;
        let entries = map
            .into_iter()
            .filter_map(|(ticker, value)| {
                let day = value.as_str()?.parse::<NaiveDate>().ok()?;
                Some((ticker, day))
            })
            .collect();
        Ok(Self { entries })
    }
}

impl FromIterator<(String, NaiveDate)> for DedupState {
    fn from_iter<I: IntoIterator<Item = (String, NaiveDate)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
pub trait DedupStateStore: Send + Sync {
    /// Persisted state, or empty when missing or unreadable.
    async fn load(&self) -> DedupState;

    /// Replace the persisted state with `state`.
    async fn save(&self, state: &DedupState) -> Result<()>;
}

/// JSON file store with write-then-rename saves.
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DedupStateStore for JsonStateStore {
    async fn load(&self) -> DedupState {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No state file yet, starting empty");
                return DedupState::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read state file, starting empty");
                return DedupState::new();
            }
        };

        DedupState::from_json(&raw).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Corrupt state file, starting empty");
            DedupState::new()
        })
    }

    async fn save(&self, state: &DedupState) -> Result<()> {
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, state.to_json()?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), entries = state.len(), "State saved");
        Ok(())
    }
}
