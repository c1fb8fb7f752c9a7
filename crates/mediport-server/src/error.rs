//! Request-level error type mapping to HTTP status codes.
//!
//! Validation failures are not errors at this layer; they re-render the
//! originating form with a message and a 200 status. `PageError` covers the
//! two failure modes that do change the status: the database being
//! unreachable at the start of a request (503) and a query failing after a
//! connection was acquired (500).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mediport_db::{QueryError, SessionError};
use thiserror::Error;

use crate::pages;

/// Errors a route handler can surface as an HTTP error response.
#[derive(Debug, Error)]
pub enum PageError {
    /// No database connection could be acquired for this request.
    #[error("database unavailable: {0}")]
    Unavailable(String),

    /// The request's query or task failed after acquisition.
    #[error("internal server error: {0}")]
    Internal(String),
}

impl From<SessionError> for PageError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Unavailable(_) => PageError::Unavailable(e.to_string()),
            SessionError::Released => PageError::Internal(e.to_string()),
        }
    }
}

impl From<QueryError> for PageError {
    fn from(e: QueryError) -> Self {
        PageError::Internal(e.to_string())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            PageError::Unavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "The database is currently unavailable. Please try again later.",
            ),
            PageError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong while handling your request.",
            ),
        };

        tracing::error!(status = %status, "request failed: {self}");

        (status, pages::error_page(status, message)).into_response()
    }
}
