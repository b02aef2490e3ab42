//! Admin API HTTP plumbing shared by the REST and GraphQL calls.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::instrument;
use url::Url;

use crate::config::ShopifyAdminConfig;

use super::{GraphQLError, ShopifyError};

/// Header carrying the Admin API access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Shopify Admin API client.
///
/// Cheap to clone; all clones share one connection pool. Requests use the
/// `reqwest` defaults (no explicit timeout, no retries).
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    base_url: Url,
    api_version: String,
    access_token: SecretString,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

/// Only `message` is read; `locations`, `path` and `extensions` may be
/// absent or `null`.
#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
}

impl AdminClient {
    /// Create a new Admin API client.
    #[must_use]
    pub fn new(config: &ShopifyAdminConfig) -> Self {
        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_version: config.api_version.clone(),
                access_token: config.access_token.clone(),
            }),
        }
    }

    /// Build the URL of a versioned Admin API resource, e.g. `draft_orders.json`.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::Url` if the resulting URL is invalid.
    pub fn endpoint(&self, resource: &str) -> Result<Url, ShopifyError> {
        let path = format!("admin/api/{}/{resource}", self.inner.api_version);
        Ok(self.inner.base_url.join(&path)?)
    }

    // =========================================================================
    // REST Execution
    // =========================================================================

    /// Issue an authenticated `GET` and decode the JSON body.
    pub(super) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ShopifyError> {
        let response = self
            .inner
            .client
            .get(url)
            .header(ACCESS_TOKEN_HEADER, self.inner.access_token.expose_secret())
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Issue an authenticated JSON `POST` and decode the JSON body.
    pub(super) async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, ShopifyError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .inner
            .client
            .post(url)
            .header(ACCESS_TOKEN_HEADER, self.inner.access_token.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL operation against `graphql.json`.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::RateLimited` if we're being rate limited.
    /// Returns `ShopifyError::GraphQL` if the response carries top-level errors.
    /// Returns `ShopifyError::Http` on network failures.
    #[instrument(skip(self, query, variables))]
    pub(super) async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ShopifyError> {
        let endpoint = self.endpoint("graphql.json")?;
        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let graphql_response: GraphQLResponse<T> = self.post_json(endpoint, &body).await?;

        // Check for GraphQL errors
        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            let converted_errors: Vec<GraphQLError> = errors
                .into_iter()
                .map(|e| GraphQLError { message: e.message })
                .collect();
            return Err(ShopifyError::GraphQL(converted_errors));
        }

        graphql_response.data.ok_or_else(|| {
            ShopifyError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
            }])
        })
    }
}

/// Map non-success responses to `ShopifyError`, passing successes through.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ShopifyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // Check for rate limiting
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        return Err(ShopifyError::RateLimited(retry_after));
    }

    let text = response.text().await.unwrap_or_default();
    let messages = serde_json::from_str::<serde_json::Value>(&text)
        .map(|body| body.get("errors").map(error_messages).unwrap_or_default())
        .unwrap_or_default();

    tracing::error!(status = %status, body = %text, "Shopify request failed");

    if status == reqwest::StatusCode::UNAUTHORIZED {
        let message = if messages.is_empty() {
            "Invalid or expired access token".to_string()
        } else {
            messages.join("; ")
        };
        return Err(ShopifyError::Unauthorized(message));
    }

    Err(ShopifyError::Status { status, messages })
}

/// Flatten a REST `errors` value into readable messages.
///
/// Shopify returns a plain string, a list, or an object mapping field names
/// to message lists. Object entries become `"field: message"`, except for
/// `base` which carries record-level messages. GraphQL-shaped objects with a
/// string `message` yield that message alone.
pub(crate) fn error_messages(errors: &serde_json::Value) -> Vec<String> {
    use serde_json::Value;

    match errors {
        Value::Null => vec![],
        Value::String(message) => vec![message.clone()],
        Value::Array(items) => items.iter().flat_map(error_messages).collect(),
        Value::Object(fields) => match fields.get("message") {
            Some(Value::String(message)) => vec![message.clone()],
            _ => fields
                .iter()
                .flat_map(|(field, value)| {
                    error_messages(value).into_iter().map(move |message| {
                        if field == "base" {
                            message
                        } else {
                            format!("{field}: {message}")
                        }
                    })
                })
                .collect(),
        },
        other => vec![other.to_string()],
    }
}
