//! Persistence gateway for the canonical state blob.
//!
//! # Responsibility
//! - Serialize state with the current version tag into the single storage
//!   slot, and read it back through the migrator.
//! - Convert every failure to the contract-level signal (`false` / `None`),
//!   logging the underlying cause first.
//!
//! # Invariants
//! - Exactly one slot, [`STATE_STORAGE_KEY`], is ever touched.
//! - `save` and `clear` never panic; `load` treats absent, corrupt and
//!   unmigratable blobs the same way.
//!
//! # See also
//! - docs/architecture/persistence.md

use crate::model::activity::Activity;
use crate::model::lists::ListsState;
use crate::model::settings::Settings;
use crate::model::state::PersistedState;
use crate::schema::migrate::migrate;
use crate::schema::CURRENT_VERSION;
use crate::storage::StorageBackend;
use log::{error, warn};
use serde::Serialize;
use serde_json::Value;

/// The one key the canonical state blob lives under.
pub const STATE_STORAGE_KEY: &str = "planbook.state";

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    activities: &'a [Activity],
    lists: &'a ListsState,
    settings: &'a Settings,
}

/// Serializes `state` as the version-tagged storage envelope.
pub fn encode_state(state: &PersistedState) -> serde_json::Result<String> {
    serde_json::to_string(&Envelope {
        version: CURRENT_VERSION,
        activities: &state.activities,
        lists: &state.lists,
        settings: &state.settings,
    })
}

/// Reads and writes the canonical state blob through an injected backend.
pub struct PersistenceGateway<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> PersistenceGateway<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Direct backend access, for callers that need raw slot inspection.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Durably stores `state` under the well-known key.
    ///
    /// Returns whether the write succeeded. Serialization and backend
    /// failures are logged and reported as `false`, never raised.
    pub fn save(&self, state: &PersistedState) -> bool {
        let blob = match encode_state(state) {
            Ok(blob) => blob,
            Err(err) => {
                error!("event=state_save module=storage status=error error_code=encode_failed error={err}");
                return false;
            }
        };

        match self.backend.set(STATE_STORAGE_KEY, &blob) {
            Ok(()) => true,
            Err(err) => {
                error!("event=state_save module=storage status=error error_code=write_failed error={err}");
                false
            }
        }
    }

    /// Loads and migrates whatever the slot holds.
    ///
    /// Returns `None` when the slot is absent, unreadable, corrupt, or the
    /// payload cannot be migrated to the current version.
    pub fn load(&self) -> Option<PersistedState> {
        let blob = match self.backend.get(STATE_STORAGE_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(err) => {
                warn!("event=state_load module=storage status=error error_code=read_failed error={err}");
                return None;
            }
        };

        let value: Value = match serde_json::from_str(&blob) {
            Ok(value) => value,
            Err(err) => {
                warn!("event=state_load module=storage status=error error_code=corrupt_blob error={err}");
                return None;
            }
        };

        match migrate(&value) {
            Ok(state) => Some(state),
            Err(err) => {
                warn!("event=state_load module=storage status=error error_code=unmigratable error={err}");
                None
            }
        }
    }

    /// Removes the stored blob. Best-effort; failures are logged.
    pub fn clear(&self) {
        if let Err(err) = self.backend.remove(STATE_STORAGE_KEY) {
            warn!("event=state_clear module=storage status=error error={err}");
        }
    }
}
