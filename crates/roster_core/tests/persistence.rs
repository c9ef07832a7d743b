use roster_core::db::{open_db, open_db_in_memory};
use roster_core::{KeyValueStore, RosterStorage, SqliteKeyValueStore, StudentRecord};

fn memory_storage() -> RosterStorage<SqliteKeyValueStore> {
    RosterStorage::new(SqliteKeyValueStore::new(open_db_in_memory().unwrap()))
}

fn sample_roster() -> Vec<StudentRecord> {
    vec![
        StudentRecord::new("Ann Lee", "1", "ann@example.com", "1234567890"),
        StudentRecord::new("Bo Chen", "2", "bo@example.org", "0987654321"),
        StudentRecord::new("Cy <Script>", "30", "cy@x.io", "5550001111"),
    ]
}

#[test]
fn load_returns_empty_when_key_is_absent() {
    let storage = memory_storage();
    assert!(storage.load().is_empty());
}

#[test]
fn save_then_load_reconstructs_collection() {
    let storage = memory_storage();
    let roster = sample_roster();

    storage.save(&roster).unwrap();
    assert_eq!(storage.load(), roster);

    storage.save(&[]).unwrap();
    assert!(storage.load().is_empty());
}

#[test]
fn save_writes_json_array_under_fixed_key() {
    let storage = memory_storage();
    storage.save(&sample_roster()[..1]).unwrap();

    let raw = storage.kv().get("students").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"name": "Ann Lee", "id": "1", "email": "ann@example.com", "contact": "1234567890"}
        ])
    );
}

#[test]
fn malformed_data_loads_as_empty() {
    let storage = memory_storage();
    for corrupt in ["{not json", "null", r#"{"name":"x"}"#, r#"[{"name":"x"}]"#] {
        storage.kv().set("students", corrupt).unwrap();
        assert!(storage.load().is_empty(), "expected empty for {corrupt}");
    }
}

#[test]
fn custom_key_is_isolated_from_default_key() {
    let kv = SqliteKeyValueStore::new(open_db_in_memory().unwrap());
    kv.set("students", "[]").unwrap();
    let storage = RosterStorage::with_key(kv, "class-b");
    assert_eq!(storage.key(), "class-b");

    storage.save(&sample_roster()).unwrap();
    assert_eq!(storage.kv().get("students").unwrap().as_deref(), Some("[]"));
    assert_eq!(storage.load().len(), 3);
}

#[test]
fn saved_roster_survives_reopening_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.db");

    {
        let storage = RosterStorage::new(SqliteKeyValueStore::new(open_db(&path).unwrap()));
        storage.save(&sample_roster()).unwrap();
    }

    let reopened = RosterStorage::new(SqliteKeyValueStore::new(open_db(&path).unwrap()));
    assert_eq!(reopened.load(), sample_roster());
}
