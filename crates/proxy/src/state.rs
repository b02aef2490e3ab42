//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::shopify::AdminClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the immutable configuration and the
/// Shopify Admin API client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ProxyConfig,
    shopify: AdminClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ProxyConfig) -> Self {
        let shopify = AdminClient::new(&config.shopify);

        Self {
            inner: Arc::new(AppStateInner { config, shopify }),
        }
    }

    /// Get a reference to the proxy configuration.
    #[must_use]
    pub fn config(&self) -> &ProxyConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Admin API client.
    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }
}
