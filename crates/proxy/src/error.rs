//! Unified error handling with Sentry integration.
//!
//! Every failure of `POST /create-draft-order` becomes an [`AppError`], which
//! renders as `{"success": false, "error": "<message>"}`. Server-side errors
//! are captured to Sentry before responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::orders::ValidationError;
use crate::shopify::ShopifyError;

/// Application-level error type for the proxy.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request failed validation for the configured mode.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Request body could not be read (malformed JSON, wrong content type).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Cross-origin request from an origin outside the allow-list.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found on the back-store.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A lookup preceding draft order creation failed.
    #[error("{message}: {source}")]
    Lookup {
        /// Client-facing message; upstream detail is only logged.
        message: &'static str,
        source: ShopifyError,
    },

    /// Draft order creation failed upstream.
    #[error("Shopify error: {0}")]
    Upstream(#[from] ShopifyError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Lookup { .. } | Self::Upstream(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message returned to the caller.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::BadRequest(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Internal(msg) => msg.clone(),
            Self::Lookup { message, .. } => (*message).to_string(),
            Self::Upstream(err) => err.detail(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = ErrorBody {
            success: false,
            error: self.message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
