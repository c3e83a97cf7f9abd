//! Backup import orchestration.
//!
//! # Responsibility
//! - Drive one import through parse, validate+migrate, persist and hydrate,
//!   reporting exactly one of the fixed user-facing failure messages.
//! - Guarantee that a failed import leaves both the in-memory store and the
//!   durable copy unchanged.
//!
//! # Invariants
//! - The durable copy is written before the in-memory swap; a crash between
//!   the two leaves storage ahead of memory, never the reverse.
//! - One import runs to a terminal stage before another starts; callers
//!   prevent overlap (e.g. by disabling the trigger while pending).
//! - Failure messages are a stable UI contract and must not be reworded
//!   without updating every consumer.
//!
//! # See also
//! - docs/architecture/persistence.md

use crate::schema::migrate::migrate;
use crate::storage::{PersistenceGateway, StorageBackend};
use crate::store::StateStore;
use log::{error, info, warn};
use serde_json::Value;
use std::path::Path;

/// Pipeline stage an import is in; `Failed` is terminal from any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    Idle,
    Parsing,
    Migrating,
    Persisting,
    Hydrating,
    Done,
    Failed,
}

impl ImportStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Parsing => "parsing",
            Self::Migrating => "migrating",
            Self::Persisting => "persisting",
            Self::Hydrating => "hydrating",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

/// Failure kind, each mapping to one fixed user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportError {
    /// Input text is not valid JSON.
    Parse,
    /// Valid JSON, but unknown version or invalid shape.
    Schema,
    /// Durable write failed; nothing was changed.
    Persistence,
    /// Store rejected a validated state after the durable write.
    Hydration,
    /// File name does not end in `.json`.
    NotJsonFile,
}

impl ImportError {
    /// The stable message consumed by the UI layer.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::Parse => "Invalid JSON format",
            Self::Schema => "Invalid or incompatible backup file",
            Self::Persistence => "Failed to save to localStorage",
            Self::Hydration => "Failed to update app state",
            Self::NotJsonFile => "Please select a JSON file",
        }
    }
}

/// Outcome envelope handed back to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    pub ok: bool,
    pub error: Option<&'static str>,
}

impl ImportResult {
    fn done() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    fn failed(kind: ImportError) -> Self {
        Self {
            ok: false,
            error: Some(kind.user_message()),
        }
    }
}

/// Import/export use-case service over an injected gateway and store handle.
pub struct ImportService<B: StorageBackend> {
    gateway: PersistenceGateway<B>,
}

impl<B: StorageBackend> ImportService<B> {
    pub fn new(gateway: PersistenceGateway<B>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &PersistenceGateway<B> {
        &self.gateway
    }

    /// Imports a pasted or file-read backup payload.
    ///
    /// # Contract
    /// - On failure, `store` and the durable slot are exactly as they were
    ///   before the call (hydration failures excepted, where the durable
    ///   copy is deliberately ahead).
    /// - Never panics; every failure maps to one fixed message.
    pub fn import_from_text(&self, store: &mut impl StateStore, raw: &str) -> ImportResult {
        let mut stage = ImportStage::Parsing;
        info!("event=import module=service status=start stage={}", stage.as_str());

        let parsed: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=import module=service status=error stage={} error={err}",
                    stage.as_str()
                );
                return ImportResult::failed(ImportError::Parse);
            }
        };

        stage = ImportStage::Migrating;
        let state = match migrate(&parsed) {
            Ok(state) => state,
            Err(err) => {
                warn!(
                    "event=import module=service status=error stage={} error={err}",
                    stage.as_str()
                );
                return ImportResult::failed(ImportError::Schema);
            }
        };

        // Why: durable copy must land before the in-memory swap, so a crash
        // between the two leaves storage ahead of memory.
        stage = ImportStage::Persisting;
        if !self.gateway.save(&state) {
            warn!(
                "event=import module=service status=error stage={}",
                stage.as_str()
            );
            return ImportResult::failed(ImportError::Persistence);
        }

        stage = ImportStage::Hydrating;
        let activity_count = state.activities.len();
        if let Err(err) = store.replace(state) {
            // Durable and in-memory copies are now inconsistent until the
            // next load; surfaced, not masked.
            error!(
                "event=import module=service status=error stage={} error_code=store_behind_storage error={err}",
                stage.as_str()
            );
            return ImportResult::failed(ImportError::Hydration);
        }

        stage = ImportStage::Done;
        info!(
            "event=import module=service status=ok stage={} activities={activity_count}",
            stage.as_str()
        );
        ImportResult::done()
    }

    /// Imports a backup file after gating on its name.
    ///
    /// # Contract
    /// - Names not ending in `.json` (case-sensitive) are rejected without
    ///   reading the file.
    /// - Read failures surface as the parse-stage failure.
    pub fn import_from_file(&self, store: &mut impl StateStore, path: &Path) -> ImportResult {
        let is_json = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(".json"));
        if !is_json {
            warn!(
                "event=import module=service status=error stage={} error_code=not_json_file",
                ImportStage::Idle.as_str()
            );
            return ImportResult::failed(ImportError::NotJsonFile);
        }

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=import module=service status=error stage={} error_code=file_read_failed error={err}",
                    ImportStage::Parsing.as_str()
                );
                return ImportResult::failed(ImportError::Parse);
            }
        };

        self.import_from_text(store, &raw)
    }

    /// Serializes the store's current state as a version-tagged backup
    /// payload.
    pub fn export_to_text(&self, store: &impl StateStore) -> serde_json::Result<String> {
        crate::storage::gateway::encode_state(store.state())
    }
}
