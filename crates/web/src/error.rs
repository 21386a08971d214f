//! Unified error handling.
//!
//! Provides an `AppError` type for route handlers. Most failure classes in
//! this application are recovered locally (storage problems become empty
//! state, remote failures become sample data) and rejected logins get their
//! own redirect path, so handlers reach for `AppError` only for genuinely
//! unanswerable requests: unknown recipes and unknown categories.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        (status, self.to_string()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
