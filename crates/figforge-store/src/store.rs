use crate::storage::KeyValueStorage;
use chrono::{DateTime, Utc};
use figforge_common::{ForgeError, Result};
use figforge_core::{DesignComponent, DesignSystem, DesignTokens, Language};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

pub const DESIGN_SYSTEMS_KEY: &str = "designSystems";

/// Fields to overwrite on a stored design system. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct DesignSystemPatch {
    pub name: Option<String>,
    pub source_file_id: Option<String>,
    pub access_token: Option<String>,
    pub last_sync: Option<DateTime<Utc>>,
    pub components: Option<Vec<DesignComponent>>,
    pub tokens: Option<DesignTokens>,
    pub language: Option<Language>,
}

impl DesignSystemPatch {
    /// Replace everything the extractor produces, keeping id and token.
    pub fn content_of(fresh: DesignSystem) -> Self {
        Self {
            name: Some(fresh.name),
            source_file_id: Some(fresh.source_file_id),
            last_sync: Some(fresh.last_sync),
            components: Some(fresh.components),
            tokens: Some(fresh.tokens),
            ..Default::default()
        }
    }

    pub fn apply(self, target: &mut DesignSystem) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(source_file_id) = self.source_file_id {
            target.source_file_id = source_file_id;
        }
        if let Some(access_token) = self.access_token {
            target.access_token = access_token;
        }
        if let Some(last_sync) = self.last_sync {
            target.last_sync = last_sync;
        }
        if let Some(components) = self.components {
            target.components = components;
        }
        if let Some(tokens) = self.tokens {
            target.tokens = tokens;
        }
        if let Some(language) = self.language {
            target.language = language;
        }
    }
}

/// Dashboard counters over every stored design system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub connected_files: usize,
    pub components: usize,
    pub design_tokens: usize,
    /// Three files (html, scss, ts) per fully generated component
    pub generated_files: usize,
}

/// The list of design systems, persisted on every change.
///
/// Readers get a `watch` receiver that always holds the latest list. Writes
/// run under the channel's lock, so concurrent writers never lose updates.
pub struct DesignSystemStore {
    storage: Arc<dyn KeyValueStorage>,
    state: watch::Sender<Vec<DesignSystem>>,
}

impl DesignSystemStore {
    /// Load the saved list. Unreadable or corrupt state is logged and
    /// replaced by an empty list.
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        let systems = match load(storage.as_ref()) {
            Ok(systems) => systems,
            Err(e) => {
                error!("❌ Failed to load saved design systems, starting empty: {}", e);
                Vec::new()
            }
        };
        info!("📚 Loaded {} design systems", systems.len());

        let (state, _) = watch::channel(systems);
        Self { storage, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<DesignSystem>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> Vec<DesignSystem> {
        self.state.borrow().clone()
    }

    pub fn get(&self, id: &str) -> Option<DesignSystem> {
        self.state.borrow().iter().find(|ds| ds.id == id).cloned()
    }

    /// Like `get`, but an unknown id is `ForgeError::NotFound`.
    pub fn require(&self, id: &str) -> Result<DesignSystem> {
        self.get(id)
            .ok_or_else(|| ForgeError::NotFound(format!("no design system with id {}", id)))
    }

    pub fn len(&self) -> usize {
        self.state.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn add(&self, design_system: DesignSystem) -> Result<()> {
        info!("➕ Adding design system '{}' ({})", design_system.name, design_system.id);
        self.modify(|systems| {
            systems.push(design_system);
            true
        })?;
        Ok(())
    }

    /// Shallow-merge `patch` into the system with `id`. Returns false if no
    /// such system exists.
    pub fn update(&self, id: &str, patch: DesignSystemPatch) -> Result<bool> {
        let updated = self.modify(|systems| match systems.iter_mut().find(|ds| ds.id == id) {
            Some(target) => {
                patch.apply(target);
                true
            }
            None => false,
        })?;

        if !updated {
            warn!("⚠️  Update skipped, no design system with id {}", id);
        }
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        let deleted = self.modify(|systems| {
            let before = systems.len();
            systems.retain(|ds| ds.id != id);
            systems.len() != before
        })?;

        if deleted {
            info!("🗑️  Deleted design system {}", id);
        } else {
            warn!("⚠️  Delete skipped, no design system with id {}", id);
        }
        Ok(deleted)
    }

    pub fn stats(&self) -> StoreStats {
        let systems = self.state.borrow();
        let components: Vec<&DesignComponent> =
            systems.iter().flat_map(|ds| ds.components.iter()).collect();

        StoreStats {
            connected_files: systems.len(),
            components: components.len(),
            design_tokens: systems.iter().map(DesignSystem::token_count).sum(),
            generated_files: components.iter().filter(|c| c.is_generated()).count() * 3,
        }
    }

    /// Apply `change` to a copy of the list; if it reports a change, persist
    /// the copy and then publish it. Subscribers never see unsaved state, and
    /// a failed save leaves the published list untouched.
    fn modify(&self, change: impl FnOnce(&mut Vec<DesignSystem>) -> bool) -> Result<bool> {
        let mut outcome = Ok(false);

        self.state.send_if_modified(|systems| {
            let mut next = systems.clone();
            if !change(&mut next) {
                return false;
            }
            match save(self.storage.as_ref(), &next) {
                Ok(()) => {
                    *systems = next;
                    outcome = Ok(true);
                    true
                }
                Err(e) => {
                    outcome = Err(e);
                    false
                }
            }
        });

        outcome
    }
}

fn save(storage: &dyn KeyValueStorage, systems: &[DesignSystem]) -> Result<()> {
    let json = serde_json::to_string(systems)?;
    storage.set(DESIGN_SYSTEMS_KEY, &json)
}

fn load(storage: &dyn KeyValueStorage) -> Result<Vec<DesignSystem>> {
    match storage.get(DESIGN_SYSTEMS_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}
