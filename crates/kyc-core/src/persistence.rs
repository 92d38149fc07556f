//! Draft persistence over a string key-value store.
//!
//! Two fixed keys hold the snapshot: the JSON draft and the stringified step
//! number. Both are written in one `set_many` call and removed together.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use kyc_domain::{ApplicationDraft, WizardStep};

use crate::{state::WizardState, CoreError};

/// Key holding the JSON-serialized [`ApplicationDraft`].
pub const DRAFT_KEY: &str = "kycFormData";

/// Key holding the current step number as a string.
pub const STEP_KEY: &str = "kycCurrentStep";

/// String key-value store with local-storage semantics.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;

    /// Writes several keys. Stores that can commit them in one write should
    /// override this; the default sets them one by one.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), CoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), CoreError> {
        (**self).set_many(entries)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), CoreError> {
        (**self).set_many(entries)
    }
}

/// Process-local store, used by tests and when no data directory is usable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::Storage("memory store poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::Storage("memory store poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::Storage("memory store poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), CoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::Storage("memory store poisoned".into()))?;
        for (key, value) in pairs {
            entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// Result of hydrating the wizard at mount time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoredDraft {
    pub form_data: ApplicationDraft,
    pub current_step: WizardStep,
    /// True when a persisted draft was found and parsed.
    pub recovered: bool,
}

/// Saves and restores the in-progress application.
pub struct DraftPersistence<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> DraftPersistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mirrors the draft and current step. An empty draft is not written.
    pub fn save(&self, state: &WizardState) -> Result<(), CoreError> {
        if state.form_data.is_empty() {
            return Ok(());
        }
        let json = serde_json::to_string(&state.form_data)?;
        let step = state.current_step.number().to_string();
        self.store
            .set_many(&[(DRAFT_KEY, json.as_str()), (STEP_KEY, step.as_str())])
    }

    /// Reads the snapshot back. Never fails: unreadable or corrupt data is
    /// logged and the wizard starts empty.
    pub fn restore(&self) -> RestoredDraft {
        let raw = match self.store.get(DRAFT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return RestoredDraft::default(),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read saved application draft");
                return RestoredDraft::default();
            }
        };

        let form_data: ApplicationDraft = match serde_json::from_str(&raw) {
            Ok(draft) => draft,
            Err(err) => {
                tracing::warn!(error = %err, "Saved application draft is corrupt, starting fresh");
                return RestoredDraft::default();
            }
        };

        let current_step = match self.store.get(STEP_KEY) {
            Ok(value) => parse_step(value.as_deref()),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read saved wizard step");
                WizardStep::default()
            }
        };

        tracing::info!(step = current_step.number(), "Restored application draft");
        RestoredDraft {
            form_data,
            current_step,
            recovered: true,
        }
    }

    /// Removes both keys. Attempts both removals even if the first fails.
    pub fn clear(&self) -> Result<(), CoreError> {
        let draft = self.store.remove(DRAFT_KEY);
        let step = self.store.remove(STEP_KEY);
        draft.and(step)
    }
}

/// Missing, non-numeric or out-of-range values fall back to step 1.
fn parse_step(value: Option<&str>) -> WizardStep {
    value
        .and_then(|raw| raw.trim().parse::<u8>().ok())
        .and_then(WizardStep::from_number)
        .unwrap_or_default()
}
