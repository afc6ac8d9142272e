use catedra::model::{EntityKind, Record};
use catedra::query::{Criteria, OrderBy, Query};
use catedra::store::backend::StorageBackend;
use catedra::store::fs_backend::FsBackend;
use catedra::store::{EntityStore, LoadOutcome};
use serde_json::json;

const KEY: &str = "catedra_data";

#[test]
fn test_first_open_uses_defaults_without_writing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = EntityStore::open(FsBackend::new(temp_dir.path()), KEY).unwrap();

    assert_eq!(store.load_outcome(), &LoadOutcome::Fresh);
    assert!(!store.list(EntityKind::BlogPost, &Query::new()).is_empty());
    assert!(!temp_dir.path().join("catedra_data.json").exists());
}

#[test]
fn test_mutations_survive_reopen() {
    let temp_dir = tempfile::tempdir().unwrap();

    let id = {
        let mut store = EntityStore::open(FsBackend::new(temp_dir.path()), KEY).unwrap();
        let created = store
            .create(
                EntityKind::Event,
                Record::new()
                    .with("title", "Seminario de Historia")
                    .with("capacity", 40),
            )
            .unwrap();
        let id = created.id().unwrap().to_string();
        store
            .update(EntityKind::Event, &id, Record::new().with("capacity", 60))
            .unwrap();
        store.delete(EntityKind::BlogPost, "blogpost-2").unwrap();
        id
    };

    let store = EntityStore::open(FsBackend::new(temp_dir.path()), KEY).unwrap();
    assert!(matches!(
        store.load_outcome(),
        LoadOutcome::FromSnapshot { .. }
    ));

    let event = store.get(EntityKind::Event, &id).unwrap();
    assert_eq!(event.get("title"), Some(&json!("Seminario de Historia")));
    assert_eq!(event.get("capacity"), Some(&json!(60)));
    assert!(store.get(EntityKind::BlogPost, "blogpost-2").is_none());
}

#[test]
fn test_corrupted_snapshot_falls_back_to_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("catedra_data.json"), "{not json").unwrap();

    let store = EntityStore::open(FsBackend::new(temp_dir.path()), KEY).unwrap();
    assert!(matches!(
        store.load_outcome(),
        LoadOutcome::Recovered { .. }
    ));
    assert!(store.get(EntityKind::BlogPost, "blogpost-1").is_some());
}

#[test]
fn test_partial_snapshot_keeps_default_tables() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        temp_dir.path().join("catedra_data.json"),
        r#"{"Event": [{"id": "e1", "title": "Solo"}], "Widget": []}"#,
    )
    .unwrap();

    let store = EntityStore::open(FsBackend::new(temp_dir.path()), KEY).unwrap();
    let events = store.list(EntityKind::Event, &Query::new());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id(), Some("e1"));
    assert!(!store.list(EntityKind::Publication, &Query::new()).is_empty());
}

#[test]
fn test_filter_order_and_limit_on_disk_store() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut store = EntityStore::open(FsBackend::new(temp_dir.path()), KEY).unwrap();

    for (title, year) in [("A", 2019), ("B", 2024), ("C", 2022)] {
        store
            .create(
                EntityKind::Publication,
                Record::new()
                    .with("title", title)
                    .with("year", year)
                    .with("featured", true),
            )
            .unwrap();
    }

    let criteria = Criteria::new().eq("featured", true);
    let query = Query::new().order(OrderBy::desc("year")).limit(2);
    let top = store.filter(EntityKind::Publication, &criteria, &query);

    let years: Vec<_> = top.iter().map(|r| r.get("year").cloned()).collect();
    // the default dataset carries a featured 2023 publication
    assert_eq!(years, vec![Some(json!(2024)), Some(json!(2023))]);
}

#[test]
fn test_reset_discards_stored_content() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut store = EntityStore::open(FsBackend::new(temp_dir.path()), KEY).unwrap();
    store
        .create(EntityKind::Subscriber, Record::new().with("email", "a@b.c"))
        .unwrap();
    store.reset().unwrap();

    let store = EntityStore::open(FsBackend::new(temp_dir.path()), KEY).unwrap();
    assert!(store
        .list(EntityKind::Subscriber, &Query::new())
        .is_empty());
}

#[test]
fn test_invalid_keys_are_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(temp_dir.path());

    assert!(backend.write("../escape", "{}").is_err());
    assert!(backend.write("", "{}").is_err());
    assert!(backend.read(".hidden").is_err());
    assert!(EntityStore::open(FsBackend::new(temp_dir.path()), "a/b").is_err());
}

#[test]
fn test_remove_is_idempotent() {
    let temp_dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(temp_dir.path().join("nested"));

    backend.write("session", "{}").unwrap();
    assert_eq!(backend.read("session").unwrap().as_deref(), Some("{}"));
    assert_eq!(
        backend.location("session"),
        temp_dir.path().join("nested").join("session.json")
    );
    backend.remove("session").unwrap();
    backend.remove("session").unwrap();
    assert_eq!(backend.read("session").unwrap(), None);
}
