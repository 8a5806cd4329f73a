//! Book endpoints

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::book::{BookDto, BookForm},
    AppState,
};

use super::respond::{
    parse_request_body, respond_error, respond_json, ApiError, ApiResult, PathId,
    ERR_DATA_ACCESS, ERR_DATA_CREATION, ERR_DATA_UPDATE, ERR_FORM_DECODING,
};

/// Map a service error to a response. `message` is used for the 500 case.
fn service_error(err: AppError, message: &'static str) -> ApiError {
    if err.is_validation() {
        respond_error(&err, StatusCode::UNPROCESSABLE_ENTITY, ERR_FORM_DECODING)
    } else if err.is_not_found() {
        tracing::warn!(error = %err, "book not found");
        ApiError::empty(StatusCode::NOT_FOUND)
    } else {
        respond_error(&err, StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = Vec<BookDto>),
        (status = 500, description = "Data access failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> ApiResult {
    let books = state
        .services
        .books
        .list()
        .await
        .map_err(|e| service_error(e, ERR_DATA_ACCESS))?;

    respond_json(StatusCode::OK, &books)
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookForm,
    responses(
        (status = 201, description = "Book created"),
        (status = 422, description = "Invalid form", body = crate::error::ErrorResponse),
        (status = 500, description = "Data creation failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(State(state): State<AppState>, body: Bytes) -> ApiResult {
    let form: BookForm = parse_request_body(&body, StatusCode::UNPROCESSABLE_ENTITY)?;

    let book = state
        .services
        .books
        .create(form)
        .await
        .map_err(|e| service_error(e, ERR_DATA_CREATION))?;

    tracing::info!("New book created: {}", book.id);
    Ok(StatusCode::CREATED.into_response())
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = u64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDto),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Invalid ID"),
        (status = 500, description = "Data access failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(State(state): State<AppState>, PathId(id): PathId) -> ApiResult {
    let book = state
        .services
        .books
        .get_by_id(id)
        .await
        .map_err(|e| service_error(e, ERR_DATA_ACCESS))?;

    respond_json(StatusCode::OK, &book)
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = u64, Path, description = "Book ID")),
    request_body = BookForm,
    responses(
        (status = 202, description = "Book updated"),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Invalid ID or form", body = crate::error::ErrorResponse),
        (status = 500, description = "Data update failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    PathId(id): PathId,
    body: Bytes,
) -> ApiResult {
    let form: BookForm = parse_request_body(&body, StatusCode::UNPROCESSABLE_ENTITY)?;

    state
        .services
        .books
        .update(id, form)
        .await
        .map_err(|e| service_error(e, ERR_DATA_UPDATE))?;

    tracing::info!("Book updated: {}", id);
    Ok(StatusCode::ACCEPTED.into_response())
}

/// Delete a book (soft delete)
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = u64, Path, description = "Book ID")),
    responses(
        (status = 202, description = "Book deleted"),
        (status = 404, description = "Book not found or already deleted"),
        (status = 422, description = "Invalid ID"),
        (status = 500, description = "Data access failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(State(state): State<AppState>, PathId(id): PathId) -> ApiResult {
    state
        .services
        .books
        .delete(id)
        .await
        .map_err(|e| service_error(e, ERR_DATA_ACCESS))?;

    tracing::info!("Book deleted: {}", id);
    Ok(StatusCode::ACCEPTED.into_response())
}
