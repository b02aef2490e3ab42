//! Draft order proxy library.
//!
//! A single-endpoint service in front of the Shopify Admin API:
//! `POST /create-draft-order` validates a small JSON body, optionally looks
//! up a product or the shop currency, creates a draft order over REST or
//! GraphQL, and returns the draft order's invoice URL. The request fields
//! and upstream calls are selected at startup by [`orders::OrderMode`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod orders;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;
pub mod telemetry;

use std::time::Duration;

use axum::{
    Router,
    http::{Request, Response},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use state::AppState;

/// Build the application router with its full middleware stack.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .layer(middleware::cors_layer(&state.config().cors))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::preflight_guard_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
