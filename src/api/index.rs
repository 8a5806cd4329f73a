//! Root liveness probe

use axum::{
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS},
        HeaderValue,
    },
    response::IntoResponse,
};

const GREETING: &str = "Hello, world!";

pub async fn index() -> impl IntoResponse {
    (
        [
            (CONTENT_LENGTH, HeaderValue::from(GREETING.len())),
            (
                CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        ],
        GREETING,
    )
}
