use chrono::{TimeZone, Utc};
use countdown::clock::FixedClock;
use countdown::model::Configuration;
use countdown::store::countdowns::COLLECTION_KEY;
use countdown::store::fs_backend::FsBackend;
use countdown::store::{CountdownStore, StorageBackend};
use std::fs;
use tempfile::TempDir;

fn store_at(dir: &TempDir, quota: Option<usize>) -> CountdownStore<FsBackend> {
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap();
    CountdownStore::initialize(
        FsBackend::new(dir.path().join("storage")).with_quota(quota),
        Configuration::default_at(now),
        FixedClock::new(now),
    )
}

#[test]
fn collection_survives_restart() {
    let temp = TempDir::new().unwrap();

    let mut store = store_at(&temp, None);
    let trip = store.create("Trip");
    store.create("Party");
    store.switch_active(&trip);
    drop(store);

    let reopened = store_at(&temp, None);
    let names: Vec<&str> = reopened.countdowns().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["My Countdown", "Trip", "Party"]);
    assert_eq!(reopened.active_id(), Some(&trip));
}

#[test]
fn record_uses_web_client_field_names() {
    let temp = TempDir::new().unwrap();
    store_at(&temp, None);

    let raw = fs::read_to_string(temp.path().join("storage").join(format!("{}.json", COLLECTION_KEY)))
        .unwrap();
    assert!(raw.contains("\"activeCountdownId\""));
    assert!(raw.contains("\"targetDate\""));
    assert!(raw.contains("\"textStyle\""));
}

#[test]
fn corrupt_record_is_reseeded() {
    let temp = TempDir::new().unwrap();
    let backend = FsBackend::new(temp.path().join("storage"));
    backend.set_item(COLLECTION_KEY, "{not json").unwrap();

    let store = store_at(&temp, None);
    assert_eq!(store.countdowns().len(), 1);
    assert_eq!(store.active().unwrap().name, "My Countdown");
}

#[test]
fn quota_failure_keeps_memory_state_and_warns() {
    let temp = TempDir::new().unwrap();
    let mut store = store_at(&temp, Some(4_000));
    assert!(store.take_warnings().is_empty());

    let mut config = store.active().unwrap().settings.clone();
    config.text_style.content = "x".repeat(10_000);
    store.update_active(config);

    assert_eq!(store.active().unwrap().settings.text_style.content.len(), 10_000);
    assert!(store.has_unsaved_changes());
    let warnings = store.take_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("Storage is full"));

    drop(store);
    let reopened = store_at(&temp, Some(4_000));
    assert_eq!(
        reopened.active().unwrap().settings.text_style.content,
        "Countdown to Adventure"
    );
}
