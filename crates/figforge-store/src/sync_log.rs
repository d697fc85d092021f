use crate::storage::KeyValueStorage;
use chrono::{DateTime, Utc};
use figforge_common::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

pub const FIGMA_SYNC_KEY: &str = "figmaSync";
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncHistoryEntry {
    pub id: String,
    pub design_system_id: String,
    pub file_id: String,
    pub file_name: String,
    pub timestamp: DateTime<Utc>,
    pub status: SyncStatus,
    #[serde(default)]
    pub components: usize,
    #[serde(default)]
    pub tokens: usize,
    #[serde(default)]
    pub message: Option<String>,
}

impl SyncHistoryEntry {
    pub fn new(
        design_system_id: impl Into<String>,
        file_id: impl Into<String>,
        file_name: impl Into<String>,
        status: SyncStatus,
    ) -> Self {
        Self {
            id: figforge_core::new_id(),
            design_system_id: design_system_id.into(),
            file_id: file_id.into(),
            file_name: file_name.into(),
            timestamp: Utc::now(),
            status,
            components: 0,
            tokens: 0,
            message: None,
        }
    }

    pub fn with_counts(mut self, components: usize, tokens: usize) -> Self {
        self.components = components;
        self.tokens = tokens;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Auto-sync preferences. Stored only; nothing schedules syncs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSettings {
    pub auto_sync: bool,
    pub interval_minutes: u32,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            auto_sync: false,
            interval_minutes: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SyncState {
    #[serde(default)]
    history: Vec<SyncHistoryEntry>,
    #[serde(default)]
    settings: SyncSettings,
}

/// Sync history (newest first, capped) and settings under one storage key.
pub struct SyncLog {
    storage: Arc<dyn KeyValueStorage>,
}

impl SyncLog {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    fn load(&self) -> SyncState {
        let raw = match self.storage.get(FIGMA_SYNC_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("⚠️  Could not read sync state: {}", e);
                None
            }
        };

        raw.and_then(|json| match serde_json::from_str(&json) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!("⚠️  Ignoring corrupt sync state: {}", e);
                None
            }
        })
        .unwrap_or_default()
    }

    fn save(&self, state: &SyncState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.storage.set(FIGMA_SYNC_KEY, &json)
    }

    pub fn record(&self, entry: SyncHistoryEntry) -> Result<()> {
        let mut state = self.load();
        debug!("Recording sync of {} ({:?})", entry.file_id, entry.status);
        state.history.insert(0, entry);
        state.history.truncate(HISTORY_LIMIT);
        self.save(&state)
    }

    pub fn history(&self) -> Vec<SyncHistoryEntry> {
        self.load().history
    }

    pub fn settings(&self) -> SyncSettings {
        self.load().settings
    }

    pub fn update_settings(
        &self,
        auto_sync: Option<bool>,
        interval_minutes: Option<u32>,
    ) -> Result<SyncSettings> {
        let mut state = self.load();
        if let Some(auto_sync) = auto_sync {
            state.settings.auto_sync = auto_sync;
        }
        if let Some(interval) = interval_minutes {
            state.settings.interval_minutes = interval.max(1);
        }
        self.save(&state)?;
        Ok(state.settings)
    }
}
