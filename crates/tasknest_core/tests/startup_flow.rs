use std::fs;
use tasknest_core::{
    remember_category, restore_view, DataPaths, Priority, SessionOptions, SessionState, Store,
};
use uuid::Uuid;

fn open(paths: &DataPaths) -> (Store, SessionState) {
    paths.ensure_exists().unwrap();
    (
        Store::open(paths.db_path()).unwrap(),
        SessionState::new(paths.session_path()),
    )
}

#[test]
fn selection_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::new(dir.path());

    let home_id = {
        let (store, session) = open(&paths);
        store.create_category("Work", None, None).unwrap();
        let home = store.create_category("Home", None, None).unwrap();
        store
            .create_task(home.id, "laundry", None, Priority::Low)
            .unwrap();
        assert!(remember_category(&session, Some(home.id)));
        home.id
    };

    let (store, session) = open(&paths);
    let view = restore_view(&store, &session).unwrap();
    assert_eq!(view.categories.len(), 2);
    assert_eq!(view.selected, Some(home_id));
    assert_eq!(view.tasks.len(), 1);
    assert_eq!(view.tasks[0].title, "laundry");
}

#[test]
fn stale_selection_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::new(dir.path());
    let (store, session) = open(&paths);

    let work = store.create_category("Work", None, None).unwrap();
    remember_category(&session, Some(work.id));
    store.delete_category(work.id).unwrap();

    let view = restore_view(&store, &session).unwrap();
    assert!(view.categories.is_empty());
    assert_eq!(view.selected, None);
    assert!(view.tasks.is_empty());

    // The stale id is left alone; it is not treated as corruption.
    assert_eq!(session.load().last_category_id(), Some(work.id));
}

#[test]
fn first_start_has_no_selection() {
    let dir = tempfile::tempdir().unwrap();
    let (store, session) = open(&DataPaths::new(dir.path()));

    let view = restore_view(&store, &session).unwrap();
    assert!(view.categories.is_empty());
    assert_eq!(view.selected, None);
}

#[test]
fn corrupted_session_does_not_affect_entities() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::new(dir.path());
    let (store, session) = open(&paths);
    let work = store.create_category("Work", None, None).unwrap();
    remember_category(&session, Some(work.id));

    fs::write(paths.session_path(), "\u{feff}garbage").unwrap();

    let view = restore_view(&store, &session).unwrap();
    assert_eq!(view.categories.len(), 1);
    assert_eq!(view.selected, None);
}

#[test]
fn remember_category_preserves_other_options() {
    let dir = tempfile::tempdir().unwrap();
    let session = SessionState::new(dir.path().join("session.json"));
    let mut options = SessionOptions::new();
    options.set("theme", "dark");
    session.save(&options).unwrap();

    let id = Uuid::new_v4();
    assert!(remember_category(&session, Some(id)));
    let loaded = session.load();
    assert_eq!(loaded.last_category_id(), Some(id));
    assert_eq!(loaded.get("theme").and_then(|value| value.as_str()), Some("dark"));

    assert!(remember_category(&session, None));
    assert_eq!(session.load().last_category_id(), None);
}

#[test]
fn remember_category_swallows_write_failures() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let session = SessionState::new(blocker.join("session.json"));

    assert!(!remember_category(&session, Some(Uuid::new_v4())));
}
