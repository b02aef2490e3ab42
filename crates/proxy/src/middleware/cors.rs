//! Cross-origin access for the front-store.
//!
//! Only origins on the configured allow-list may call the proxy from a
//! browser. Allowed preflights are answered by `tower_http`'s `CorsLayer`;
//! preflights from any other origin are refused with 403 before reaching it.

use axum::{
    extract::{Request, State},
    http::{
        HeaderMap, Method,
        header::{ACCESS_CONTROL_REQUEST_METHOD, CONTENT_TYPE, ORIGIN},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::CorsConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Build the CORS layer for the allow-listed origins.
///
/// Allows `POST` with a `Content-Type` request header. Responses to
/// requests from other origins carry no `Access-Control-Allow-Origin`.
#[must_use]
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.allowed_origins.iter().cloned()))
        .allow_methods([Method::POST])
        .allow_headers([CONTENT_TYPE])
}

/// Reject CORS preflights whose origin is not allow-listed.
///
/// Non-preflight requests pass through untouched.
pub async fn preflight_guard_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if is_preflight(request.method(), request.headers()) {
        let allowed = request
            .headers()
            .get(ORIGIN)
            .is_some_and(|origin| state.config().cors.allows(origin));

        if !allowed {
            let origin = request
                .headers()
                .get(ORIGIN)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("<none>");
            tracing::warn!(origin = %origin, "Preflight from unlisted origin");
            return AppError::Forbidden("Origin not allowed".to_string()).into_response();
        }
    }

    next.run(request).await
}

fn is_preflight(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS && headers.contains_key(ACCESS_CONTROL_REQUEST_METHOD)
}
