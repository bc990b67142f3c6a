use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use pagetext_core::PagetextError;

use crate::template;

/// Failure shown to the user as an error page.
#[derive(Debug)]
pub enum WebError {
    BadRequest(String),
    PayloadTooLarge(String),
    NotFound,
    Internal(String),
}

impl From<PagetextError> for WebError {
    fn from(err: PagetextError) -> Self {
        match err {
            PagetextError::Pdf(_) | PagetextError::InvalidRange { .. } => {
                WebError::BadRequest(err.to_string())
            }
            PagetextError::Io(_) | PagetextError::Config(_) => WebError::Internal(err.to_string()),
        }
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        WebError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            WebError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            WebError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            WebError::NotFound => (
                StatusCode::NOT_FOUND,
                "Document not found. It may have expired; upload it again.".to_string(),
            ),
            WebError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, template::render_error(&message)).into_response()
    }
}
