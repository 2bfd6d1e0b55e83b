use std::fs;

use chrono::NaiveDate;
use ticklist_core::datastore::FileStore;
use ticklist_model::storage::STATE_KEY;
use ticklist_model::{Action, KeyValueStore, Store, Theme, View};
use tempfile::tempdir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

#[test]
fn file_store_roundtrip_and_filtering() {
    let temp = tempdir().expect("tempdir");
    let backend = FileStore::open(temp.path()).expect("open file store");
    let mut store = Store::open(backend);

    store
        .apply(
            Action::AddTask {
                title: "Write report".to_string(),
            },
            today(),
        )
        .expect("add task");
    store
        .apply(
            Action::AddTask {
                title: "Call plumber".to_string(),
            },
            today(),
        )
        .expect("add task");
    store.toggle_theme().expect("toggle theme");

    let reopened = Store::open(FileStore::open(temp.path()).expect("reopen"));
    assert_eq!(reopened.state(), store.state());
    assert_eq!(reopened.theme(), Theme::Dark);

    let view = reopened.view("REPORT", today());
    assert_eq!(view.task_list.count, 1);
    assert_eq!(view.task_list.rows[0].title, "Write report");
}

#[test]
fn corrupt_state_file_loads_defaults() {
    let temp = tempdir().expect("tempdir");
    let backend = FileStore::open(temp.path()).expect("open file store");
    let path = backend.path_for(STATE_KEY).expect("state path");
    fs::write(&path, "{not json").expect("write corrupt blob");

    let mut store = Store::open(backend);
    assert!(store.state().tasks.is_empty());
    assert_eq!(store.state().current_view, View::Today);

    store
        .apply(
            Action::SetView {
                view: View::Upcoming,
            },
            today(),
        )
        .expect("set view");
    let raw = store
        .backend()
        .get(STATE_KEY)
        .expect("read")
        .expect("state written");
    assert!(raw.contains("\"currentView\":\"upcoming\""));
}
