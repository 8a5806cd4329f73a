//! `BooksRepository` against a real PostgreSQL database.
//!
//! Needs `DATABASE_URL`; run with: cargo test -- --ignored

use chrono::NaiveDate;
use sqlx::PgPool;

use bookshelf_server::{
    models::{Book, Lifecycle},
    repository::{BookGateway, BooksRepository},
};

fn book(title: &str) -> Book {
    Book {
        lifecycle: Lifecycle::default(),
        title: title.to_string(),
        author: "author".to_string(),
        published_date: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
        image_url: "image_url".to_string(),
        description: "description".to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn create_assigns_identity(pool: PgPool) {
    let repo = BooksRepository::new(pool);

    let created = repo.create(book("first")).await.unwrap();
    let id = created.id().expect("identity assigned on insert");
    assert!(created.lifecycle.created_at.is_some());
    assert!(!created.is_deleted());

    let read = repo.read_by_id(id).await.unwrap();
    assert_eq!(read.title, "first");
    assert_eq!(read.published_date, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn list_is_ordered_and_skips_deleted(pool: PgPool) {
    let repo = BooksRepository::new(pool);
    assert!(repo.list_all().await.unwrap().is_empty());

    let a = repo.create(book("a")).await.unwrap();
    let b = repo.create(book("b")).await.unwrap();
    let c = repo.create(book("c")).await.unwrap();
    repo.delete(b.id().unwrap()).await.unwrap();

    let ids: Vec<Option<i64>> = repo.list_all().await.unwrap().iter().map(Book::id).collect();
    assert_eq!(ids, vec![a.id(), c.id()]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn update_overwrites_fields(pool: PgPool) {
    let repo = BooksRepository::new(pool);
    let created = repo.create(book("old")).await.unwrap();

    let mut changed = book("new");
    changed.lifecycle.id = created.id();
    repo.update(changed).await.unwrap();

    let read = repo.read_by_id(created.id().unwrap()).await.unwrap();
    assert_eq!(read.title, "new");
    assert_eq!(read.id(), created.id());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn missing_rows_are_not_found(pool: PgPool) {
    let repo = BooksRepository::new(pool);

    assert!(repo.read_by_id(999).await.unwrap_err().is_not_found());
    assert!(repo.delete(999).await.unwrap_err().is_not_found());

    let mut missing = book("missing");
    missing.lifecycle.id = Some(999);
    assert!(repo.update(missing).await.unwrap_err().is_not_found());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn soft_deleted_rows_stay_in_table(pool: PgPool) {
    let repo = BooksRepository::new(pool.clone());
    let id = repo.create(book("gone")).await.unwrap().id().unwrap();

    repo.delete(id).await.unwrap();
    assert!(repo.delete(id).await.unwrap_err().is_not_found());
    assert!(repo.read_by_id(id).await.unwrap_err().is_not_found());

    let deleted_at: Option<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT deleted_at FROM books WHERE id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(deleted_at.is_some());
}
