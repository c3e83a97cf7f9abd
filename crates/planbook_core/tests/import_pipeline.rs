use planbook_core::{
    AppStore, HydrationError, ImportService, MemoryStorage, PersistedState, PersistenceGateway,
    StateStore, StorageBackend, StorageError, WeekStart, STATE_STORAGE_KEY,
};
use serde_json::json;
use std::cell::Cell;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

/// Backend whose writes can be made to fail on demand, for rollback checks.
struct FlakyStorage {
    inner: MemoryStorage,
    fail_writes: Rc<Cell<bool>>,
}

impl FlakyStorage {
    fn new() -> (Self, Rc<Cell<bool>>) {
        let fail_writes = Rc::new(Cell::new(false));
        (
            Self {
                inner: MemoryStorage::new(),
                fail_writes: Rc::clone(&fail_writes),
            },
            fail_writes,
        )
    }
}

impl StorageBackend for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Backend("simulated quota exhaustion".into()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

/// Store that refuses hydration, for the post-persist failure path.
struct RejectingStore {
    inner: AppStore,
}

impl StateStore for RejectingStore {
    fn replace(&mut self, _state: PersistedState) -> Result<(), HydrationError> {
        Err(HydrationError::new("refused by test store"))
    }

    fn state(&self) -> &PersistedState {
        self.inner.state()
    }
}

fn valid_payload_text() -> String {
    json!({
        "version": 3,
        "activities": [{
            "id": "plan-1",
            "title": "Weekly review",
            "bucket": "scheduled",
            "date": "2026-08-09",
            "time": "18:00",
            "durationMinutes": 60,
            "note": "",
            "isDone": false,
            "orderIndex": 0,
            "createdAt": "2026-08-01T10:00:00Z",
            "updatedAt": "2026-08-01T10:00:00Z",
        }],
        "lists": { "version": 1 },
        "settings": { "weekStart": "sunday", "themeMode": "system" },
    })
    .to_string()
}

fn memory_service() -> ImportService<MemoryStorage> {
    ImportService::new(PersistenceGateway::new(MemoryStorage::new()))
}

#[test]
fn malformed_text_fails_and_changes_nothing() {
    let service = memory_service();
    let mut store = AppStore::new();
    let before = store.state().clone();

    let result = service.import_from_text(&mut store, "definitely {not json");

    assert!(!result.ok);
    assert_eq!(result.error, Some("Invalid JSON format"));
    assert_eq!(store.state(), &before);
    assert_eq!(
        service.gateway().backend().get(STATE_STORAGE_KEY).unwrap(),
        None
    );
}

#[test]
fn unknown_version_fails_and_changes_nothing() {
    let service = memory_service();
    let mut store = AppStore::new();
    let before = store.state().clone();

    let payload = json!({ "version": 999, "activities": [] }).to_string();
    let result = service.import_from_text(&mut store, &payload);

    assert!(!result.ok);
    assert_eq!(result.error, Some("Invalid or incompatible backup file"));
    assert_eq!(store.state(), &before);
    assert_eq!(
        service.gateway().backend().get(STATE_STORAGE_KEY).unwrap(),
        None
    );
}

#[test]
fn valid_payload_replaces_store_and_durable_copy() {
    let service = memory_service();
    let mut store = AppStore::new();

    let result = service.import_from_text(&mut store, &valid_payload_text());

    assert!(result.ok);
    assert_eq!(result.error, None);
    assert_eq!(store.activities().len(), 1);
    assert_eq!(store.activities()[0].id, "plan-1");
    assert_eq!(store.settings().week_start, WeekStart::Sunday);
    assert_eq!(service.gateway().load(), Some(store.state().clone()));

    let blob = service
        .gateway()
        .backend()
        .get(STATE_STORAGE_KEY)
        .unwrap()
        .expect("durable copy written");
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(value["version"], 3);
}

#[test]
fn failed_durable_write_rolls_back_completely() {
    let (backend, fail_writes) = FlakyStorage::new();
    let service = ImportService::new(PersistenceGateway::new(backend));
    let mut store = AppStore::new();

    // Seed both copies with a known-good state.
    let seeded = service.import_from_text(&mut store, &valid_payload_text());
    assert!(seeded.ok);
    let store_before = store.state().clone();
    let blob_before = service
        .gateway()
        .backend()
        .get(STATE_STORAGE_KEY)
        .unwrap()
        .expect("seeded blob present");

    fail_writes.set(true);
    let incoming = json!({
        "version": 3,
        "activities": [],
        "lists": { "version": 1 },
        "settings": { "weekStart": "monday", "themeMode": "dark" },
    })
    .to_string();
    let result = service.import_from_text(&mut store, &incoming);

    assert!(!result.ok);
    assert_eq!(result.error, Some("Failed to save to localStorage"));
    assert_eq!(store.state(), &store_before);
    // Byte-identical, not merely equivalent.
    assert_eq!(
        service.gateway().backend().get(STATE_STORAGE_KEY).unwrap(),
        Some(blob_before)
    );
}

#[test]
fn hydration_failure_is_surfaced_with_durable_copy_ahead() {
    let service = memory_service();
    let mut store = RejectingStore {
        inner: AppStore::new(),
    };
    let before = store.state().clone();

    let result = service.import_from_text(&mut store, &valid_payload_text());

    assert!(!result.ok);
    assert_eq!(result.error, Some("Failed to update app state"));
    assert_eq!(store.state(), &before);
    // The durable write already committed; next load reconciles.
    let durable = service.gateway().load().expect("durable copy is ahead");
    assert_eq!(durable.activities.len(), 1);
}

#[test]
fn non_json_file_name_is_rejected_without_reading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.txt");
    // Unparsable contents: a read attempt would report the parse failure
    // instead of the file gate.
    std::fs::File::create(&path)
        .unwrap()
        .write_all(b"{broken")
        .unwrap();

    let service = memory_service();
    let mut store = AppStore::new();
    let result = service.import_from_file(&mut store, &path);

    assert!(!result.ok);
    assert_eq!(result.error, Some("Please select a JSON file"));
}

#[test]
fn json_extension_check_is_case_sensitive() {
    let service = memory_service();
    let mut store = AppStore::new();

    let result = service.import_from_file(&mut store, Path::new("backup.JSON"));

    assert!(!result.ok);
    assert_eq!(result.error, Some("Please select a JSON file"));
}

#[test]
fn json_file_imports_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.json");
    std::fs::write(&path, valid_payload_text()).unwrap();

    let service = memory_service();
    let mut store = AppStore::new();
    let result = service.import_from_file(&mut store, &path);

    assert!(result.ok);
    assert_eq!(store.activities().len(), 1);
}

#[test]
fn export_then_import_round_trips() {
    let service = memory_service();
    let mut store = AppStore::new();
    assert!(service
        .import_from_text(&mut store, &valid_payload_text())
        .ok);

    let exported = service.export_to_text(&store).unwrap();

    let other_service = memory_service();
    let mut other_store = AppStore::new();
    assert!(other_service.import_from_text(&mut other_store, &exported).ok);
    assert_eq!(other_store.state(), store.state());
}
