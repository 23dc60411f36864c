use serde_json::json;
use std::fs;
use tasknest_core::{SessionOptions, SessionState, LAST_CATEGORY_ID_KEY};
use uuid::Uuid;

#[test]
fn save_then_load_round_trips_last_category() {
    let dir = tempfile::tempdir().unwrap();
    let state = SessionState::new(dir.path().join("session.json"));
    let id = Uuid::new_v4();

    let mut options = SessionOptions::new();
    options.set_last_category_id(Some(id));
    state.save(&options).unwrap();

    let loaded = state.load();
    assert_eq!(loaded.last_category_id(), Some(id));
    assert_eq!(loaded.get(LAST_CATEGORY_ID_KEY), Some(&json!(id.to_string())));
}

#[test]
fn save_replaces_whole_record() {
    let dir = tempfile::tempdir().unwrap();
    let state = SessionState::new(dir.path().join("session.json"));

    let mut first = SessionOptions::new();
    first.set("theme", "dark");
    first.set_last_category_id(Some(Uuid::new_v4()));
    state.save(&first).unwrap();

    let mut second = SessionOptions::new();
    second.set("zoom", 2);
    state.save(&second).unwrap();

    let loaded = state.load();
    assert_eq!(loaded, second);
    assert!(loaded.get("theme").is_none());
    assert_eq!(loaded.last_category_id(), None);
}

#[test]
fn saving_same_options_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let state = SessionState::new(&path);

    let mut options = SessionOptions::new();
    options.set_last_category_id(Some(Uuid::new_v4()));
    state.save(&options).unwrap();
    let first = fs::read(&path).unwrap();
    state.save(&options).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(state.load(), options);
}

#[test]
fn unknown_keys_survive_a_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    fs::write(
        &path,
        r#"{"last_category_id": 3, "window": {"width": 800, "height": 600}}"#,
    )
    .unwrap();
    let state = SessionState::new(&path);

    let mut options = state.load();
    assert_eq!(options.last_category_id(), None);
    assert_eq!(options.len(), 2);

    let id = Uuid::new_v4();
    options.set_last_category_id(Some(id));
    state.save(&options).unwrap();

    let reloaded = state.load();
    assert_eq!(reloaded.last_category_id(), Some(id));
    assert_eq!(
        reloaded.get("window"),
        Some(&json!({"width": 800, "height": 600}))
    );
}

#[test]
fn corrupted_record_loads_empty_and_can_be_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    fs::write(&path, b"{\"last_category_id\": ").unwrap();
    let state = SessionState::new(&path);

    assert!(state.load().is_empty());

    let mut options = SessionOptions::new();
    options.set("theme", "light");
    state.save(&options).unwrap();
    assert_eq!(state.load(), options);
}
