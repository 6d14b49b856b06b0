use chrono::{Duration, Utc};
use tempfile::tempdir;

use tipple_core::limits::{evaluate_store, warning_lines};
use tipple_core::storage::{DrinkStatus, DrinkStore, Gender, NewDrink, NewProfile, SqliteStore};

#[test]
fn test_open_creates_parent_dirs_and_persists() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("tipple.db");

    let id = {
        let mut store = SqliteStore::open(&path).expect("open should succeed");
        store
            .create_profile(&NewProfile::new("Sam", Gender::Male, 75.0))
            .expect("create profile");
        store
            .add(&NewDrink::new("IPA", "Beer", 12.0).with_quantity(2), 1)
            .expect("add should succeed")
    };
    assert!(path.exists());

    let store = SqliteStore::open(&path).expect("reopen should succeed");
    let profile = store.profile().expect("query profile").expect("profile exists");
    assert_eq!(profile.name, "Sam");
    assert_eq!(profile.gender, Gender::Male);

    let entries = store.list(profile.id).expect("list should succeed");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, id);
    assert_eq!(entries[0].status, DrinkStatus::Pending);
    assert_eq!(entries[0].total_oz(), 24.0);
}

#[test]
fn test_consume_then_evaluate_flow() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("tipple.db");
    let mut store = SqliteStore::open(&path).expect("open should succeed");
    let profile = store
        .save_profile(&NewProfile::new("Sam", Gender::Male, 75.0))
        .expect("save profile");

    let beer = store
        .add(&NewDrink::new("IPA", "Beer", 12.0).with_quantity(2), profile.id)
        .expect("add beer");
    let whiskey = store
        .add(&NewDrink::new("Rye", "Whiskey", 1.5), profile.id)
        .expect("add whiskey");

    let (summary, warnings) = evaluate_store(&store, &profile).expect("evaluate");
    assert_eq!(summary.weekly_oz, 0.0);
    assert_eq!(warning_lines(&warnings), vec!["Within safe consumption limits"]);

    store.mark_consumed(beer).expect("consume beer");
    store.mark_consumed(whiskey).expect("consume whiskey");

    let (summary, warnings) = evaluate_store(&store, &profile).expect("evaluate");
    assert_eq!(summary.weekly_oz, 25.5);
    assert_eq!(summary.last_hours_oz, 25.5);
    let lines = warning_lines(&warnings);
    assert_eq!(lines[0], "WEEKLY LIMIT EXCEEDED: 25.5/14oz");
    assert!(lines.iter().any(|l| l.starts_with("DAILY LIMIT EXCEEDED")));
    assert!(lines.iter().any(|l| l.starts_with("BINGE WARNING")));
}

#[test]
fn test_backdated_consumption_leaves_binge_window() {
    let dir = tempdir().expect("tempdir");
    let mut store = SqliteStore::open(&dir.path().join("tipple.db")).expect("open");
    let added = Utc::now() - Duration::days(2);
    let id = store
        .add(&NewDrink::new("Merlot", "Wine", 5.0).with_added_at(added), 1)
        .expect("add");
    store
        .mark_consumed_at(id, added + Duration::hours(1))
        .expect("consume");

    let summary = store.summary(1).expect("summary");
    assert_eq!(summary.weekly_oz, 5.0);
    assert_eq!(summary.last_hours_oz, 0.0);
    assert!(store.check_integrity().is_ok());
}
