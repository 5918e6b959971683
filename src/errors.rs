use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Unknown configuration page: {0}")]
    PageNotFound(String),

    #[error("Invalid or missing CSRF token")]
    InvalidCsrfToken,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::PageNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCsrfToken => StatusCode::FORBIDDEN,
            AppError::Template(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::PageNotFound(_) => (status, "Not Found").into_response(),
            AppError::InvalidCsrfToken => (status, "Invalid or missing CSRF token").into_response(),
            e => {
                tracing::error!(%e, "Request failed");
                (status, "Internal Server Error").into_response()
            }
        }
    }
}
