//! `POST /create-draft-order` handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::orders::OrderRequest;
use crate::services;
use crate::state::AppState;

/// Successful response body.
#[derive(Debug, Serialize)]
pub struct DraftOrderCreated {
    pub success: bool,
    /// Invoice URL of the created draft order.
    pub url: String,
}

/// Create a draft order from the request body.
///
/// A body that is not a JSON object (or not sent as `application/json`) is
/// answered with a 400 in the same `{success, error}` shape as validation
/// failures.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<DraftOrderCreated>> {
    let Json(body) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let request = parse_order_request(body)?;

    let url = services::create_draft_order(&state, &request).await?;

    Ok(Json(DraftOrderCreated { success: true, url }))
}

/// Decode the body as an [`OrderRequest`], accepting only a JSON object.
///
/// serde would otherwise bind a JSON array to the struct fields by position.
fn parse_order_request(body: Value) -> Result<OrderRequest> {
    if !body.is_object() {
        return Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    }
    serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_order_request_object() {
        let request = parse_order_request(json!({"price": "5.00", "quantity": 3})).unwrap();
        assert_eq!(request.price, Some(json!("5.00")));
        assert_eq!(request.quantity, Some(json!(3)));
    }

    #[test]
    fn test_parse_order_request_rejects_non_objects() {
        for body in [json!(["5.00", 3]), json!("price"), json!(12), json!(null)] {
            let err = parse_order_request(body.clone()).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{body}");
        }
    }
}
