//! Shopify Admin API client (REST and GraphQL).
//!
//! # Security
//!
//! The Admin API access token grants write access to the back-store's
//! orders. It is held in a `SecretString` and only ever sent in the
//! `X-Shopify-Access-Token` header.
//!
//! # Architecture
//!
//! - [`AdminClient`] owns the `reqwest::Client` and the endpoint layout
//! - `rest` covers product lookup, shop currency, and REST draft orders
//! - `graphql` covers the `draftOrderCreate` mutation
//! - [`types`] holds the request/response shapes of both APIs
//!
//! No retries are attempted: every upstream failure is surfaced as a
//! [`ShopifyError`] for the caller to map.

mod client;
mod graphql;
mod rest;
pub mod types;

pub use client::AdminClient;
pub use rest::ProductLookup;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Admin API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// REST endpoint answered with a non-success status.
    #[error("Shopify returned {status}: {}", .messages.join("; "))]
    Status {
        /// HTTP status of the upstream response.
        status: StatusCode,
        /// Messages extracted from the response's `errors` field.
        messages: Vec<String>,
    },

    /// GraphQL query returned top-level errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// Mutation returned `userErrors` (e.g., invalid input).
    #[error("User errors: {}", format_user_errors(.0))]
    UserErrors(Vec<UserError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Access token was rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A success response lacked a field we rely on.
    #[error("Missing field in response: {0}")]
    MissingField(&'static str),
}

impl ShopifyError {
    /// Upstream error text without the variant prefix, as returned to callers.
    ///
    /// Multiple messages are joined with `"; "`.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Status { status, messages } if messages.is_empty() => status
                .canonical_reason()
                .unwrap_or("Upstream request failed")
                .to_string(),
            Self::Status { messages, .. } => messages.join("; "),
            Self::GraphQL(errors) => format_graphql_errors(errors),
            Self::UserErrors(errors) => format_user_errors(errors),
            Self::MissingField("invoice_url" | "invoiceUrl") => {
                "Draft order created without an invoice URL".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
}

/// A `userErrors` entry from a mutation payload.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct UserError {
    /// Path to the offending input field, if any.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    /// Error message.
    pub message: String,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}
