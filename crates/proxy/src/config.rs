//! Proxy configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_STORE` - Back-store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_API_TOKEN` - Admin API access token
//!
//! ## Optional
//! - `SHOPIFY_API_VERSION` - API version (default: 2025-04)
//! - `PROXY_HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 3000)
//! - `CORS_ALLOWED_ORIGINS` - Comma-separated front-store origins
//!   (default: <https://sxnav0-cj.myshopify.com>)
//! - `DRAFT_ORDER_MODE` - One of `rest-product-handle` (default),
//!   `rest-custom-item`, `graphql-variant`, `graphql-custom-item`
//! - `DRAFT_ORDER_LINE_PRICING` - `unit` (default) or `total`
//! - `DRAFT_ORDER_DEFAULT_TITLE` - Custom line item title (default: Custom Order)
//! - `DRAFT_ORDER_CURRENCY` - Currency for GraphQL prices (default: shop currency)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.0)
//! - `LOG_FORMAT` - `text` (default) or `json`

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use draft_proxy_core::{CurrencyCode, LineTitle};
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::orders::{LinePricing, OrderMode};

const DEFAULT_ALLOWED_ORIGIN: &str = "https://sxnav0-cj.myshopify.com";
const DEFAULT_LINE_TITLE: &str = "Custom Order";
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Proxy application configuration.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shopify Admin API configuration
    pub shopify: ShopifyAdminConfig,
    /// Draft order shaping
    pub orders: OrderConfig,
    /// Cross-origin allow-list
    pub cors: CorsConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
    /// Log output format
    pub log_format: LogFormat,
}

/// Log line format of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One flattened JSON object per event.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected text or json (got {other:?})")),
        }
    }
}

/// Shopify Admin API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyAdminConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: String,
    /// Base URL requests are issued against (`https://{store}/`)
    pub base_url: Url,
    /// Shopify API version (e.g., 2025-04)
    pub api_version: String,
    /// Admin API access token (write access to orders)
    pub access_token: SecretString,
}

impl std::fmt::Debug for ShopifyAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyAdminConfig")
            .field("store", &self.store)
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// How requests are turned into draft orders.
#[derive(Debug, Clone)]
pub struct OrderConfig {
    /// Required fields and upstream sequence
    pub mode: OrderMode,
    /// Pricing of custom line items
    pub line_pricing: LinePricing,
    /// Title used when a custom-item request has none
    pub default_title: LineTitle,
    /// Fixed currency for GraphQL prices; looked up from the shop when unset
    pub currency: Option<CurrencyCode>,
}

impl OrderConfig {
    /// Settings for `mode` with every other option at its default.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in default title.
    pub fn for_mode(mode: OrderMode) -> Result<Self, ConfigError> {
        Ok(Self {
            mode,
            line_pricing: LinePricing::default(),
            default_title: LineTitle::parse(DEFAULT_LINE_TITLE).map_err(|e| {
                ConfigError::InvalidEnvVar("DRAFT_ORDER_DEFAULT_TITLE".to_string(), e.to_string())
            })?,
            currency: None,
        })
    }
}

/// Cross-origin resource sharing configuration.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Exact origins (`scheme://host[:port]`) allowed to call the proxy
    pub allowed_origins: Vec<HeaderValue>,
}

impl CorsConfig {
    /// Whether `origin` is on the allow-list.
    #[must_use]
    pub fn allows(&self, origin: &HeaderValue) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }
}

impl ProxyConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the access token fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("PROXY_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PROXY_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;

        let shopify = ShopifyAdminConfig::from_env()?;
        let orders = OrderConfig::from_env()?;
        let cors = CorsConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.0);
        let log_format = get_optional_env("LOG_FORMAT")
            .map(|s| s.parse::<LogFormat>())
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("LOG_FORMAT".to_string(), e))?
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            shopify,
            orders,
            cors,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
            log_format,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyAdminConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let store = get_required_env("SHOPIFY_STORE")?;
        let base_url = store_base_url(&store)?;

        Ok(Self {
            store,
            base_url,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", "2025-04"),
            access_token: get_validated_secret("SHOPIFY_API_TOKEN")?,
        })
    }
}

impl OrderConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mode = get_optional_env("DRAFT_ORDER_MODE")
            .map(|s| s.parse::<OrderMode>())
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("DRAFT_ORDER_MODE".to_string(), e.to_string()))?
            .unwrap_or_default();
        let line_pricing = get_optional_env("DRAFT_ORDER_LINE_PRICING")
            .map(|s| s.parse::<LinePricing>())
            .transpose()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("DRAFT_ORDER_LINE_PRICING".to_string(), e.to_string())
            })?
            .unwrap_or_default();
        let default_title =
            LineTitle::parse(&get_env_or_default("DRAFT_ORDER_DEFAULT_TITLE", DEFAULT_LINE_TITLE))
                .map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "DRAFT_ORDER_DEFAULT_TITLE".to_string(),
                        e.to_string(),
                    )
                })?;
        let currency = get_optional_env("DRAFT_ORDER_CURRENCY")
            .map(|s| CurrencyCode::parse(&s))
            .transpose()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("DRAFT_ORDER_CURRENCY".to_string(), e.to_string())
            })?;

        Ok(Self {
            mode,
            line_pricing,
            default_title,
            currency,
        })
    }
}

impl CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = get_env_or_default("CORS_ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGIN);
        let allowed_origins = parse_origins(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar("CORS_ALLOWED_ORIGINS".to_string(), e))?;
        Ok(Self { allowed_origins })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Build the API base URL from a store domain.
///
/// Accepts a bare domain or a full `https://` URL.
fn store_base_url(store: &str) -> Result<Url, ConfigError> {
    let invalid =
        |reason: String| ConfigError::InvalidEnvVar("SHOPIFY_STORE".to_string(), reason);

    let store = store.trim();
    let mut url = if store.contains("://") {
        Url::parse(store)
    } else {
        Url::parse(&format!("https://{store}"))
    }
    .map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("must be an http(s) URL or a domain".to_string()));
    }
    match url.host_str() {
        Some(host) if host.contains('.') && !host.starts_with('.') && !host.ends_with('.') => {}
        _ => return Err(invalid("must be a domain".to_string())),
    }

    url.set_path("/");
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Parse a comma-separated origin list into normalized header values.
fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, String> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let url = Url::parse(s).map_err(|e| format!("{s:?}: {e}"))?;
            if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
                return Err(format!("{s:?}: origin must be an http(s) URL"));
            }
            HeaderValue::from_str(&url.origin().ascii_serialization())
                .map_err(|e| format!("{s:?}: {e}"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err("at least one origin is required".to_string());
    }
    Ok(origins)
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real access tokens are random hex)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the token issued by Shopify."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
