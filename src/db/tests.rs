#![allow(clippy::unwrap_used)]

use super::*;

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_fresh_schema_version() {
    let db = Database::open_in_memory().unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_reopen_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledgerly.db");
    {
        let mut db = Database::open(&path).unwrap();
        db.set(KEY_THEME, "\"light\"").unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.get(KEY_THEME).unwrap().as_deref(), Some("\"light\""));
}

// ── Key-value access ──────────────────────────────────────────

#[test]
fn test_get_absent_key() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get(KEY_TRANSACTIONS).unwrap().is_none());
}

#[test]
fn test_set_overwrites() {
    let mut db = Database::open_in_memory().unwrap();
    db.set(KEY_BUDGETS, "{}").unwrap();
    db.set(KEY_BUDGETS, r#"{"Food":150.0}"#).unwrap();
    assert_eq!(
        db.get(KEY_BUDGETS).unwrap().as_deref(),
        Some(r#"{"Food":150.0}"#)
    );
    let count: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_set_many_writes_all_keys() {
    let mut db = Database::open_in_memory().unwrap();
    db.set_many(&[
        (KEY_TRANSACTIONS, "[]".to_string()),
        (KEY_BUDGETS, "{}".to_string()),
    ])
    .unwrap();
    assert_eq!(db.get(KEY_TRANSACTIONS).unwrap().as_deref(), Some("[]"));
    assert_eq!(db.get(KEY_BUDGETS).unwrap().as_deref(), Some("{}"));
}

#[test]
fn test_memory_storage() {
    let mut mem = MemoryStorage::new().with_entry(KEY_THEME, "\"dark\"");
    assert_eq!(mem.get(KEY_THEME).unwrap().as_deref(), Some("\"dark\""));
    mem.set_many(&[(KEY_THEME, "\"light\"".to_string())]).unwrap();
    assert_eq!(mem.get(KEY_THEME).unwrap().as_deref(), Some("\"light\""));
    assert!(mem.get(KEY_BUDGETS).unwrap().is_none());
}
