//! Integration tests for the image repository against in-memory SQLite.

use picvault_core::image::{ImageFilter, ImageRecord, ImageRepository as _};
use picvault_db::{ImageRepository, connect, migrate};
use sea_orm::DatabaseConnection;

async fn setup_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:")
        .await
        .expect("Failed to connect to database");
    migrate(&db).await.expect("Failed to run migrations");
    db
}

fn record(image_id: &str, title: &str, description: &str) -> ImageRecord {
    ImageRecord {
        image_id: image_id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        storage_url: format!("memory:///{image_id}.jpg"),
    }
}

async fn seeded_repo() -> ImageRepository {
    let repo = ImageRepository::new(setup_db().await);
    for r in [
        record("1", "Sunset", "A beautiful sunset"),
        record("2", "Mountain", "A scenic mountain view"),
        record("3", "Sunrise", "Morning over the mountain"),
        record("4", "sunflower", "A field of flowers"),
        record("5", "100% real_cat", "cat photo"),
    ] {
        repo.put(r).await.expect("Failed to put record");
    }
    repo
}

#[tokio::test]
async fn test_put_and_get() {
    let repo = ImageRepository::new(setup_db().await);
    let rec = record("abc", "Sunset", "A beautiful sunset");

    repo.put(rec.clone()).await.expect("Failed to put record");

    let found = repo.get("abc").await.expect("Failed to get record");
    assert_eq!(found, Some(rec));
}

#[tokio::test]
async fn test_get_missing() {
    let repo = ImageRepository::new(setup_db().await);
    assert_eq!(repo.get("missing").await.expect("get"), None);
}

#[tokio::test]
async fn test_put_replaces_existing() {
    let repo = ImageRepository::new(setup_db().await);
    repo.put(record("abc", "Old", "old")).await.expect("put");
    repo.put(record("abc", "New", "new")).await.expect("put");

    let found = repo.get("abc").await.expect("get").expect("present");
    assert_eq!(found.title, "New");
    assert_eq!(repo.scan(&ImageFilter::default()).await.expect("scan").len(), 1);
}

#[tokio::test]
async fn test_delete() {
    let repo = ImageRepository::new(setup_db().await);
    repo.put(record("abc", "t", "d")).await.expect("put");

    assert!(repo.delete("abc").await.expect("delete"));
    assert!(!repo.delete("abc").await.expect("delete"));
    assert_eq!(repo.get("abc").await.expect("get"), None);
}

#[tokio::test]
async fn test_scan_unfiltered_respects_limit() {
    let repo = seeded_repo().await;

    let all = repo.scan(&ImageFilter::default()).await.expect("scan");
    assert_eq!(all.len(), 5);

    let limited = repo
        .scan(&ImageFilter::default().with_limit(2))
        .await
        .expect("scan");
    assert_eq!(limited.len(), 2);

    let none = repo
        .scan(&ImageFilter::default().with_limit(0))
        .await
        .expect("scan");
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_scan_title_filter_is_case_sensitive() {
    let repo = seeded_repo().await;

    let images = repo
        .scan(&ImageFilter::default().with_title("Sun"))
        .await
        .expect("scan");
    let mut ids: Vec<_> = images.iter().map(|r| r.image_id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, ["1", "3"]);
}

#[tokio::test]
async fn test_scan_description_filter() {
    let repo = seeded_repo().await;

    let images = repo
        .scan(&ImageFilter::default().with_description("mountain"))
        .await
        .expect("scan");
    let mut ids: Vec<_> = images.iter().map(|r| r.image_id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, ["2", "3"]);
}

#[tokio::test]
async fn test_scan_filters_and_combined() {
    let repo = seeded_repo().await;

    let images = repo
        .scan(
            &ImageFilter::default()
                .with_title("Sun")
                .with_description("mountain"),
        )
        .await
        .expect("scan");
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].image_id, "3");
}

#[tokio::test]
async fn test_scan_filtered_limit() {
    let repo = seeded_repo().await;

    let images = repo
        .scan(&ImageFilter::default().with_title("Sun").with_limit(1))
        .await
        .expect("scan");
    assert_eq!(images.len(), 1);
}

#[tokio::test]
async fn test_scan_wildcards_are_literal() {
    let repo = seeded_repo().await;

    let percent = repo
        .scan(&ImageFilter::default().with_title("0% r"))
        .await
        .expect("scan");
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].image_id, "5");

    let underscore = repo
        .scan(&ImageFilter::default().with_title("_"))
        .await
        .expect("scan");
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].image_id, "5");
}
