//! Error types for wotw-site
//!
//! Every failure reaches the visitor as the same generic 500 page; the
//! details only go to the log.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::page::render_error_page;

/// Handler error type
#[derive(Debug, Error)]
pub enum SiteError {
    /// Reseed or page load failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// wotw-common error
    #[error("Common error: {0}")]
    Common(#[from] wotw_common::Error),
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");

        let body = render_error_page(
            "Internal Server Error",
            "The server encountered an internal error and was unable to complete your request.",
        );

        (StatusCode::INTERNAL_SERVER_ERROR, Html(body.into_string())).into_response()
    }
}

/// Result type for handlers
pub type SiteResult<T> = Result<T, SiteError>;
