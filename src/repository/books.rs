//! Books repository for database operations.
//!
//! Soft-deleted rows (`deleted_at IS NOT NULL`) are invisible to every
//! operation here: they are never listed, read, updated or deleted again.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
};

/// Persistence operations on books.
///
/// Failures surface as `AppError::NotFound` when no live row matches and
/// `AppError::Database` for anything the store reports. Nothing is retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookGateway: Send + Sync {
    /// All live books ordered by id
    async fn list_all(&self) -> AppResult<Vec<Book>>;

    async fn read_by_id(&self, id: i64) -> AppResult<Book>;

    /// Insert the book and return it with its assigned identity
    async fn create(&self, book: Book) -> AppResult<Book>;

    /// Overwrite the fields of an existing book. `book.lifecycle.id` must be set.
    async fn update(&self, book: Book) -> AppResult<()>;

    /// Mark the book as soft-deleted
    async fn delete(&self, id: i64) -> AppResult<()>;
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

#[async_trait]
impl BookGateway for BooksRepository {
    async fn list_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, created_at, updated_at, deleted_at,
                   title, author, published_date, image_url, description
            FROM books
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn read_by_id(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            SELECT id, created_at, updated_at, deleted_at,
                   title, author, published_date, image_url, description
            FROM books
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    async fn create(&self, book: Book) -> AppResult<Book> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, published_date, image_url, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id, created_at, updated_at, deleted_at,
                      title, author, published_date, image_url, description
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.published_date)
        .bind(&book.image_url)
        .bind(&book.description)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, book: Book) -> AppResult<()> {
        let id = book
            .id()
            .ok_or_else(|| AppError::Internal("Book id is not set".to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $1, author = $2, published_date = $3,
                image_url = $4, description = $5, updated_at = $6
            WHERE id = $7 AND deleted_at IS NULL
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.published_date)
        .bind(&book.image_url)
        .bind(&book.description)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE books SET deleted_at = $1 WHERE id = $2 AND deleted_at IS NULL",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
