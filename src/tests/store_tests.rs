/// Tests for the in-memory and file-backed key-value stores.
use std::path::PathBuf;

use crate::store::{FileStore, KeyValueStore, MemoryStore, TOKEN_KEY};

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "loteria-web-{}-{name}.json",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn memory_store_get_set_overwrite() {
    let store = MemoryStore::new();
    assert_eq!(store.get("k"), None);

    store.set("k", "one".into());
    assert_eq!(store.get("k").as_deref(), Some("one"));

    store.set("k", "two".into());
    assert_eq!(store.get("k").as_deref(), Some("two"));
    assert_eq!(store.get("other"), None);
}

#[test]
fn file_store_missing_file_is_empty() {
    let store = FileStore::new(temp_path("missing"));
    assert_eq!(store.get(TOKEN_KEY), None);
}

#[test]
fn file_store_persists_across_instances() {
    let path = temp_path("persist");
    FileStore::new(&path).set(TOKEN_KEY, "abc".into());
    FileStore::new(&path).set("other", "x".into());

    let reopened = FileStore::new(&path);
    assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("abc"));
    assert_eq!(reopened.get("other").as_deref(), Some("x"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn file_store_sees_token_written_externally() {
    let path = temp_path("external");
    let store = FileStore::new(&path);
    assert_eq!(store.get(TOKEN_KEY), None);

    std::fs::write(&path, r#"{"token":"from-login"}"#).unwrap();
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("from-login"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn file_store_corrupt_file_reads_as_empty() {
    let path = temp_path("corrupt");
    std::fs::write(&path, "not json").unwrap();

    let store = FileStore::new(&path);
    assert_eq!(store.get(TOKEN_KEY), None);

    // a write replaces the unreadable contents
    store.set(TOKEN_KEY, "fresh".into());
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("fresh"));

    let _ = std::fs::remove_file(&path);
}
