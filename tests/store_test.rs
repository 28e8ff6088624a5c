// Integration tests: SQLite store CRUD.

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use sleeptrack::{SleepSession, SleepStore, SqliteStore, QUALITY_UNRATED};

fn test_store() -> SqliteStore {
    let _ = env_logger::builder().is_test(true).try_init();
    SqliteStore::open_in_memory().unwrap()
}

#[tokio::test]
async fn insert_assigns_monotonic_ids() {
    let store = test_store();
    let now = Utc::now();

    let first = store.insert_session(&SleepSession::begin(now)).await.unwrap();
    let second = store
        .insert_session(&SleepSession::begin(now + Duration::hours(1)))
        .await
        .unwrap();

    assert!(second > first);
}

#[tokio::test]
async fn latest_and_by_id_return_matching_rows() {
    let store = test_store();
    let now = Utc::now();

    let first_id = store.insert_session(&SleepSession::begin(now)).await.unwrap();
    let second_id = store
        .insert_session(&SleepSession::begin(now + Duration::hours(1)))
        .await
        .unwrap();

    let latest = store.latest_session().await.unwrap().unwrap();
    assert_eq!(latest.id, Some(second_id));

    let fetched = store.session_by_id(first_id).await.unwrap().unwrap();
    assert_eq!(fetched.id, Some(first_id));
    assert_eq!(fetched.quality, QUALITY_UNRATED);
    assert!(fetched.is_open());

    assert!(store.session_by_id(second_id + 100).await.unwrap().is_none());
}

#[tokio::test]
async fn empty_store_lookups_return_none() {
    let store = test_store();

    assert!(store.latest_session().await.unwrap().is_none());
    assert!(store.all_sessions().await.unwrap().is_empty());
}

#[tokio::test]
async fn all_sessions_ordered_newest_first() {
    let store = test_store();
    let now = Utc::now();

    let mut ids = Vec::new();
    for offset in 0..3 {
        let id = store
            .insert_session(&SleepSession::begin(now + Duration::days(offset)))
            .await
            .unwrap();
        ids.push(id);
    }

    let sessions = store.all_sessions().await.unwrap();
    let listed: Vec<i64> = sessions.iter().filter_map(|s| s.id).collect();
    ids.reverse();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn update_persists_end_time_and_quality() {
    let store = test_store();
    let now = Utc::now();

    let id = store.insert_session(&SleepSession::begin(now)).await.unwrap();
    let mut session = store.session_by_id(id).await.unwrap().unwrap();
    session.ended_at = session.started_at + Duration::hours(7);
    session.quality = 4;
    store.update_session(&session).await.unwrap();

    let reloaded = store.session_by_id(id).await.unwrap().unwrap();
    assert!(!reloaded.is_open());
    assert_eq!(reloaded.quality, 4);
    assert_eq!(reloaded.duration(), Duration::hours(7));
}

#[tokio::test]
async fn delete_all_leaves_store_empty() {
    let store = test_store();
    let now = Utc::now();

    store.insert_session(&SleepSession::begin(now)).await.unwrap();
    store.insert_session(&SleepSession::begin(now)).await.unwrap();

    store.delete_all_sessions().await.unwrap();

    assert!(store.all_sessions().await.unwrap().is_empty());
    assert!(store.latest_session().await.unwrap().is_none());
}

#[tokio::test]
async fn on_disk_store_survives_reopen() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("sleep.db");

    let id = {
        let store = SqliteStore::open(db_path.clone()).unwrap();
        store
            .insert_session(&SleepSession::begin(Utc::now()))
            .await
            .unwrap()
    };

    let reopened = SqliteStore::open(db_path).unwrap();
    let session = reopened.session_by_id(id).await.unwrap().unwrap();
    assert_eq!(session.id, Some(id));
}
