//! Shared request/response helpers for the API handlers

use std::collections::HashMap;
use std::fmt::Display;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::{header::CONTENT_TYPE, request::Parts, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{AppError, ErrorResponse};

pub const ERR_DATA_ACCESS: &str = "data access failure";
pub const ERR_JSON_CREATION: &str = "json creation failure";
pub const ERR_DATA_CREATION: &str = "data creation failure";
pub const ERR_FORM_DECODING: &str = "form decoding failure";
pub const ERR_DATA_UPDATE: &str = "data update failure";

/// An HTTP failure: a status with an optional `{"error": ...}` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: Option<&'static str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self {
            status,
            message: Some(message),
        }
    }

    /// Status only, empty body
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            message: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.message {
            Some(message) => (
                self.status,
                Json(ErrorResponse {
                    error: message.to_string(),
                }),
            )
                .into_response(),
            None => self.status.into_response(),
        }
    }
}

pub type ApiResult = Result<Response, ApiError>;

/// Log `err` at warn level and build the error response.
///
/// Only `message` reaches the client, the underlying error stays in the logs.
pub fn respond_error(err: &dyn Display, status: StatusCode, message: &'static str) -> ApiError {
    tracing::warn!(error = %err, status = status.as_u16(), "{}", message);
    ApiError::new(status, message)
}

/// Decode a JSON request body; failures become `status` with a decoding error body
pub fn parse_request_body<T: DeserializeOwned>(
    body: &[u8],
    status: StatusCode,
) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| respond_error(&e, status, ERR_FORM_DECODING))
}

/// Serialize `value` as the JSON response body
pub fn respond_json<T: Serialize>(status: StatusCode, value: &T) -> ApiResult {
    match serde_json::to_vec(value).map_err(AppError::from) {
        Ok(body) => Ok((
            status,
            [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            body,
        )
            .into_response()),
        Err(e) => Err(respond_error(
            &e,
            StatusCode::INTERNAL_SERVER_ERROR,
            ERR_JSON_CREATION,
        )),
    }
}

/// Parse a positive record identity. Zero and values beyond `i64::MAX` are refused.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .and_then(|id| i64::try_from(id).ok())
}

/// Extractor for the `{id}` path parameter.
///
/// Rejects with 422 and an empty body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::info!("can not parse ID: {}", e);
                ApiError::empty(StatusCode::UNPROCESSABLE_ENTITY)
            })?;

        let raw = params.get("id").map(String::as_str).unwrap_or_default();
        parse_id(raw).map(PathId).ok_or_else(|| {
            tracing::info!("can not parse ID: {:?}", raw);
            ApiError::empty(StatusCode::UNPROCESSABLE_ENTITY)
        })
    }
}
