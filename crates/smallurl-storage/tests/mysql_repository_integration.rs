//! Runs the repository contract against a real MySQL server.
//!
//! These tests start a container and need a Docker daemon:
//! `cargo test -p smallurl-storage -- --ignored`.

use std::sync::Arc;
use std::time::Duration;

use smallurl_core::ShortId;
use smallurl_storage::{MySqlRepository, ReadRepository, Repository, StorageError, UrlRecord};
use smallurl_test_infra::MySqlDatabase;

struct Fixture {
    _db: MySqlDatabase,
    repo: MySqlRepository,
}

impl Fixture {
    async fn start() -> Self {
        let db = MySqlDatabase::start().await.expect("start mysql");
        let repo = MySqlRepository::new(db.pool().clone());
        repo.ensure_schema().await.expect("create schema");

        Self { _db: db, repo }
    }
}

fn id(value: &str) -> ShortId {
    ShortId::new_unchecked(value)
}

fn record(url: &str, short_id: &str) -> UrlRecord {
    UrlRecord::new(url, id(short_id))
}

#[tokio::test]
#[ignore = "requires docker"]
async fn save_and_find_by_short_id() {
    let fixture = Fixture::start().await;

    let saved = fixture
        .repo
        .save(record("https://example.com", "abc123"))
        .await
        .unwrap();

    let got = fixture.repo.find_by_short_id(&id("abc123")).await.unwrap();
    assert_eq!(got.long_url, "https://example.com");
    assert_eq!(got.short_id, id("abc123"));
    assert_eq!(
        got.create_time.as_millisecond(),
        saved.create_time.as_millisecond()
    );
}

#[tokio::test]
#[ignore = "requires docker"]
async fn find_by_long_url_returns_earliest_record() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .save(record("https://example.com", "first"))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    fixture
        .repo
        .save(record("https://example.com", "second"))
        .await
        .unwrap();

    let got = fixture
        .repo
        .find_by_long_url("https://example.com")
        .await
        .unwrap();
    assert_eq!(got.short_id, id("first"));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn save_conflicts_when_short_id_already_exists() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .save(record("https://one.example", "abc123"))
        .await
        .unwrap();

    let err = fixture
        .repo
        .save(record("https://two.example", "abc123"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::UniqueViolation(_)));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn short_ids_differing_only_in_case_do_not_collide() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .save(record("https://lower.example", "abc"))
        .await
        .unwrap();
    fixture
        .repo
        .save(record("https://upper.example", "ABC"))
        .await
        .unwrap();

    let got = fixture.repo.find_by_short_id(&id("ABC")).await.unwrap();
    assert_eq!(got.long_url, "https://upper.example");
}

#[tokio::test]
#[ignore = "requires docker"]
async fn lookups_miss_with_not_found() {
    let fixture = Fixture::start().await;

    let err = fixture
        .repo
        .find_by_short_id(&id("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));

    let err = fixture
        .repo
        .find_by_long_url("https://missing.example")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn racing_saves_on_one_id_have_a_single_winner() {
    let fixture = Fixture::start().await;
    let repo = Arc::new(fixture.repo.clone());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.save(record(&format!("https://racer{i}.example"), "race"))
                    .await
            })
        })
        .collect();

    let mut wins = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => wins += 1,
            Err(StorageError::UniqueViolation(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(wins, 1);
}
