//! HTTP route handlers for the proxy.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! POST /create-draft-order     - Create a draft order, returns its invoice URL
//! ```

pub mod draft_orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the proxy.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/create-draft-order", post(draft_orders::create))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check Shopify.
async fn health() -> &'static str {
    "ok"
}
