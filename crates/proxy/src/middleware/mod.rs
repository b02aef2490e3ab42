//! HTTP middleware stack for the proxy.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with `request_id`, status, latency)
//! 3. Request ID (add unique ID to each request and response)
//! 4. Preflight guard (403 for preflights from unlisted origins)
//! 5. `CorsLayer` (answer allowed preflights, add CORS response headers)

pub mod cors;
pub mod request_id;

pub use cors::{cors_layer, preflight_guard_middleware};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
