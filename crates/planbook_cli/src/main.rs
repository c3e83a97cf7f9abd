//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `planbook_core` linkage.
//! - Optionally run a one-shot backup import for local sanity checks.

use planbook_core::{AppStore, ImportService, PersistenceGateway, SqliteStorage, StateStore};
use std::path::{Path, PathBuf};

const STORAGE_FILE_NAME: &str = "planbook.sqlite3";

fn main() {
    println!("planbook_core ping={}", planbook_core::ping());
    println!("planbook_core version={}", planbook_core::core_version());

    if let Some(backup_path) = std::env::args().nth(1) {
        if !run_import(Path::new(&backup_path)) {
            std::process::exit(1);
        }
    }
}

fn run_import(backup_path: &Path) -> bool {
    let storage = match SqliteStorage::open(resolve_storage_path()) {
        Ok(storage) => storage,
        Err(err) => {
            eprintln!("storage open failed: {err}");
            return false;
        }
    };

    let service = ImportService::new(PersistenceGateway::new(storage));
    let mut store = AppStore::new();
    if let Some(state) = service.gateway().load() {
        let _ = store.replace(state);
    }

    let result = service.import_from_file(&mut store, backup_path);
    match result.error {
        None => {
            println!("import ok activities={}", store.activities().len());
            true
        }
        Some(message) => {
            eprintln!("import failed: {message}");
            false
        }
    }
}

fn resolve_storage_path() -> PathBuf {
    if let Ok(raw) = std::env::var("PLANBOOK_DB_PATH") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(STORAGE_FILE_NAME)
}
