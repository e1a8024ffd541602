use tasklist_core::{FileStore, StoreError, TaskItem, TaskStore, VolatileStore, SNAPSHOT_FILE_NAME};
use tempfile::TempDir;

fn sample_items() -> Vec<TaskItem> {
    let mut done = TaskItem::new("file taxes").unwrap();
    done.toggle();
    vec![
        TaskItem::new("Buy milk").unwrap(),
        done,
        TaskItem::new("call \"Mum\" ☎").unwrap(),
    ]
}

#[test]
fn volatile_store_loads_none_before_any_save() {
    let store = VolatileStore::new();
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn volatile_store_roundtrip_is_exact() {
    let mut store = VolatileStore::new();
    let items = sample_items();

    store.save(&items).unwrap();

    assert_eq!(store.load().unwrap(), Some(items));
}

#[test]
fn volatile_store_treats_empty_save_as_absent() {
    let mut store = VolatileStore::new();
    store.save(&sample_items()).unwrap();

    store.save(&[]).unwrap();

    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn file_store_loads_none_when_file_is_missing() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::in_dir(dir.path());

    assert_eq!(store.load().unwrap(), None);
    assert!(!dir.path().join(SNAPSHOT_FILE_NAME).exists());
}

#[test]
fn file_store_roundtrip_preserves_content_and_order() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::in_dir(dir.path());
    let items = sample_items();

    store.save(&items).unwrap();

    assert_eq!(store.load().unwrap(), Some(items.clone()));
    let reopened = FileStore::in_dir(dir.path());
    assert_eq!(reopened.load().unwrap(), Some(items));
}

#[test]
fn file_store_writes_bare_json_array() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::in_dir(dir.path());
    let items = sample_items();

    store.save(&items).unwrap();

    let raw = std::fs::read_to_string(dir.path().join(SNAPSHOT_FILE_NAME)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 3);
    assert_eq!(array[0]["id"], items[0].id().to_string());
    assert_eq!(array[0]["title"], "Buy milk");
    assert_eq!(array[1]["isCompleted"], true);
    assert!(raw.find("\"id\"").unwrap() < raw.find("\"title\"").unwrap());
    assert!(raw.find("\"title\"").unwrap() < raw.find("\"isCompleted\"").unwrap());
}

#[test]
fn file_store_save_replaces_previous_snapshot() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::in_dir(dir.path());
    store.save(&sample_items()).unwrap();

    let only = vec![TaskItem::new("only one").unwrap()];
    store.save(&only).unwrap();

    assert_eq!(store.load().unwrap(), Some(only));
}

#[test]
fn file_store_keeps_saved_empty_list_distinct_from_absent() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::in_dir(dir.path());

    store.save(&[]).unwrap();

    assert_eq!(store.load().unwrap(), Some(Vec::new()));
}

#[test]
fn file_store_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::in_dir(dir.path().join("nested").join("deeper"));

    store.save(&sample_items()).unwrap();

    assert!(store.path().exists());
}

#[test]
fn file_store_reports_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SNAPSHOT_FILE_NAME);
    std::fs::write(&path, "{\"not\": \"an array\"}").unwrap();
    let store = FileStore::new(&path);

    let err = store.load().unwrap_err();

    assert!(matches!(err, StoreError::Corrupt { .. }));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "{\"not\": \"an array\"}"
    );
}

#[test]
fn file_store_rejects_items_with_wrong_shape() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SNAPSHOT_FILE_NAME);
    std::fs::write(&path, r#"[{"id": "not-a-uuid", "title": "x", "isCompleted": false}]"#)
        .unwrap();

    let err = FileStore::new(&path).load().unwrap_err();

    assert!(matches!(err, StoreError::Corrupt { .. }));
}

#[test]
fn file_store_save_into_unwritable_location_reports_io_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "a file, not a directory").unwrap();
    let mut store = FileStore::in_dir(&blocker);

    let err = store.save(&sample_items()).unwrap_err();

    assert!(matches!(err, StoreError::Io { .. }));
}
