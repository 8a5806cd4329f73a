//! Book catalog service
//!
//! Business boundary between the HTTP handlers and the gateway: handlers
//! only see forms and DTOs, the gateway only sees `Book` records.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::book::{to_dtos, BookDto, BookForm},
    repository::BookGateway,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookService: Send + Sync {
    /// Validate and store a new book
    async fn create(&self, form: BookForm) -> AppResult<BookDto>;

    async fn get_by_id(&self, id: i64) -> AppResult<BookDto>;

    async fn list(&self) -> AppResult<Vec<BookDto>>;

    /// Replace the book `id` with the form contents
    async fn update(&self, id: i64, form: BookForm) -> AppResult<()>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

#[derive(Clone)]
pub struct CatalogService {
    gateway: Arc<dyn BookGateway>,
}

impl CatalogService {
    pub fn new(gateway: Arc<dyn BookGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl BookService for CatalogService {
    async fn create(&self, form: BookForm) -> AppResult<BookDto> {
        let book = form.to_model()?;
        let created = self.gateway.create(book).await?;
        Ok(created.to_dto())
    }

    async fn get_by_id(&self, id: i64) -> AppResult<BookDto> {
        let book = self.gateway.read_by_id(id).await?;
        Ok(book.to_dto())
    }

    async fn list(&self) -> AppResult<Vec<BookDto>> {
        let books = self.gateway.list_all().await?;
        Ok(to_dtos(&books))
    }

    async fn update(&self, id: i64, form: BookForm) -> AppResult<()> {
        let mut book = form.to_model()?;
        book.lifecycle.id = Some(id);
        self.gateway.update(book).await
    }

    /// Missing and already-deleted books both come back as `NotFound`
    /// straight from the gateway; no separate existence check is made.
    async fn delete(&self, id: i64) -> AppResult<()> {
        self.gateway.delete(id).await
    }
}
