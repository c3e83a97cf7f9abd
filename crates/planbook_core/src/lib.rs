//! State persistence and migration core for Planbook.
//! This crate is the single source of truth for backup/restore invariants:
//! untrusted payloads are validated and migrated before they replace
//! anything, and a failed import changes nothing.

pub mod logging;
pub mod model;
pub mod schema;
pub mod service;
pub mod storage;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::{Activity, ActivityValidationError, Bucket};
pub use model::lists::{ListsState, ListsValidationError, LISTS_CURRENT_VERSION};
pub use model::settings::{Settings, ThemeMode, WeekStart};
pub use model::state::{PersistedState, StateValidationError};
pub use schema::migrate::{detect_version, migrate, MigrateError};
pub use schema::validate::{validate, ValidationError};
pub use schema::{is_supported_version, VersionedState, CURRENT_VERSION, EARLIEST_VERSION};
pub use service::import_service::{
    ImportError, ImportResult, ImportService, ImportStage,
};
pub use storage::{
    MemoryStorage, PersistenceGateway, SqliteStorage, StorageBackend, StorageError,
    STATE_STORAGE_KEY,
};
pub use store::{AppStore, HydrationError, StateStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
