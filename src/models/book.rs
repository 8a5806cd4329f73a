//! Book model and its two transport projections.
//!
//! `Book` is the persisted shape. `BookForm` is what clients submit and
//! `BookDto` is what the server returns. Both projections carry the
//! published date as `YYYY-MM-DD` text.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;

/// Textual date format shared by forms and DTOs
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Common lifecycle columns of a persisted record.
///
/// `id` stays `None` until the store assigns it on insert. A set
/// `deleted_at` means the record is soft-deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct Lifecycle {
    pub id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
    #[sqlx(flatten)]
    pub lifecycle: Lifecycle,
    pub title: String,
    pub author: String,
    pub published_date: NaiveDate,
    pub image_url: String,
    pub description: String,
}

impl Book {
    pub fn id(&self) -> Option<i64> {
        self.lifecycle.id
    }

    pub fn is_deleted(&self) -> bool {
        self.lifecycle.deleted_at.is_some()
    }

    pub fn to_dto(&self) -> BookDto {
        BookDto {
            id: self.lifecycle.id.unwrap_or_default(),
            title: self.title.clone(),
            author: self.author.clone(),
            published_date: self.published_date.format(DATE_FORMAT).to_string(),
            image_url: self.image_url.clone(),
            description: self.description.clone(),
        }
    }
}

/// Map a list of books to DTOs, keeping order
pub fn to_dtos(books: &[Book]) -> Vec<BookDto> {
    books.iter().map(Book::to_dto).collect()
}

/// Book as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Publication date (YYYY-MM-DD)
    #[schema(example = "2020-01-02")]
    pub published_date: String,
    pub image_url: String,
    pub description: String,
}

/// Create / update book request.
///
/// Carries no identity: updates take it from the path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    /// Publication date (YYYY-MM-DD)
    #[schema(example = "2020-01-02")]
    pub published_date: String,
    pub image_url: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid published date {value:?}, expected YYYY-MM-DD")]
pub struct DateParseError {
    pub value: String,
}

/// Parse a `YYYY-MM-DD` date. Non-canonical spellings such as `2020-1-2`
/// are refused so the text survives a round trip unchanged.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| date.format(DATE_FORMAT).to_string() == value)
        .ok_or_else(|| DateParseError {
            value: value.to_string(),
        })
}

impl BookForm {
    /// Build an unsaved `Book` (no identity) from the form
    pub fn to_model(&self) -> Result<Book, DateParseError> {
        let published_date = parse_date(&self.published_date)?;

        Ok(Book {
            lifecycle: Lifecycle::default(),
            title: self.title.clone(),
            author: self.author.clone(),
            published_date,
            image_url: self.image_url.clone(),
            description: self.description.clone(),
        })
    }
}
