//! Shared helpers for the integration tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, Response},
    Router,
};
use chrono::Utc;
use tower::ServiceExt;

use bookshelf_server::{
    api::create_router,
    error::{AppError, AppResult},
    models::Book,
    repository::BookGateway,
    services::{CatalogService, Services},
    AppState,
};

#[derive(Default)]
struct Store {
    next_id: i64,
    rows: Vec<Book>,
}

/// `BookGateway` kept in memory, with the same soft-delete rules as the
/// Postgres repository.
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    store: Arc<Mutex<Store>>,
}

impl InMemoryGateway {
    /// Every row, soft-deleted ones included
    pub fn rows(&self) -> Vec<Book> {
        self.store.lock().unwrap().rows.clone()
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

#[async_trait]
impl BookGateway for InMemoryGateway {
    async fn list_all(&self) -> AppResult<Vec<Book>> {
        let store = self.store.lock().unwrap();
        Ok(store.rows.iter().filter(|b| !b.is_deleted()).cloned().collect())
    }

    async fn read_by_id(&self, id: i64) -> AppResult<Book> {
        let store = self.store.lock().unwrap();
        store
            .rows
            .iter()
            .find(|b| b.id() == Some(id) && !b.is_deleted())
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, mut book: Book) -> AppResult<Book> {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let now = Utc::now();
        book.lifecycle.id = Some(store.next_id);
        book.lifecycle.created_at = Some(now);
        book.lifecycle.updated_at = Some(now);
        book.lifecycle.deleted_at = None;
        store.rows.push(book.clone());
        Ok(book)
    }

    async fn update(&self, book: Book) -> AppResult<()> {
        let id = book
            .id()
            .ok_or_else(|| AppError::Internal("Book id is not set".to_string()))?;
        let mut store = self.store.lock().unwrap();
        let row = store
            .rows
            .iter_mut()
            .find(|b| b.id() == Some(id) && !b.is_deleted())
            .ok_or_else(|| not_found(id))?;

        row.title = book.title;
        row.author = book.author;
        row.published_date = book.published_date;
        row.image_url = book.image_url;
        row.description = book.description;
        row.lifecycle.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut store = self.store.lock().unwrap();
        let row = store
            .rows
            .iter_mut()
            .find(|b| b.id() == Some(id) && !b.is_deleted())
            .ok_or_else(|| not_found(id))?;
        row.lifecycle.deleted_at = Some(Utc::now());
        Ok(())
    }
}

/// Full router wired to a real `CatalogService` over the in-memory gateway
pub fn build_test_app(gateway: InMemoryGateway) -> Router {
    let services = Services {
        books: Arc::new(CatalogService::new(Arc::new(gateway))),
    };
    create_router(AppState {
        services: Arc::new(services),
    })
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Response<Body> {
    let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
