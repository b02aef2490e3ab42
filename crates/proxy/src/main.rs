//! Draft order proxy binary.
//!
//! Serves `POST /create-draft-order` for the front-store on port 3000.
//!
//! # Security
//!
//! This binary holds a Shopify Admin API token with write access to the
//! back-store's orders. Browsers may only reach it from the origins listed
//! in `CORS_ALLOWED_ORIGINS`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use draft_order_proxy::config::ProxyConfig;
use draft_order_proxy::state::AppState;
use draft_order_proxy::telemetry;

#[tokio::main]
async fn main() {
    let config = ProxyConfig::from_env().expect("Failed to load configuration");

    // Sentry first so the tracing layer picks up the client
    let _sentry_guard = telemetry::init_sentry(&config);
    telemetry::init_tracing(config.log_format);

    tracing::info!(
        mode = %config.orders.mode,
        line_pricing = ?config.orders.line_pricing,
        currency = config.orders.currency.as_ref().map_or("shop", |c| c.as_str()),
        store = %config.shopify.store,
        api_version = %config.shopify.api_version,
        allowed_origins = config.cors.allowed_origins.len(),
        sentry = config.sentry_dsn.is_some(),
        "Configuration loaded"
    );

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "draft-order-proxy listening");

    axum::serve(listener, draft_order_proxy::app(AppState::new(config)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Resolve on Ctrl+C, or on SIGTERM where available.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
