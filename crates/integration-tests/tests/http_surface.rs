//! Integration tests for the HTTP surface: health, CORS, request IDs, and
//! malformed bodies.

#![allow(clippy::unwrap_used)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use draft_order_proxy::middleware::REQUEST_ID_HEADER;
use draft_order_proxy::orders::OrderMode;
use draft_order_proxy_integration_tests::{ALLOWED_ORIGIN, StubShopify, TestApp};
use serde_json::json;

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri("/create-draft-order")
        .header("origin", origin)
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let shopify = StubShopify::start().await;
    let app = TestApp::new(&shopify, OrderMode::default());

    let response = app
        .send(Request::get("/health").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!("ok"));
    assert!(shopify.requests().is_empty());
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_preflight_from_allowed_origin() {
    let shopify = StubShopify::start().await;
    let app = TestApp::new(&shopify, OrderMode::RestCustomItem);

    let response = app.send(preflight(ALLOWED_ORIGIN)).await;

    assert!(response.status.is_success());
    assert_eq!(
        response.headers["access-control-allow-origin"],
        ALLOWED_ORIGIN
    );
    let methods = response.headers["access-control-allow-methods"]
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
    let headers = response.headers["access-control-allow-headers"]
        .to_str()
        .unwrap();
    assert!(headers.to_ascii_lowercase().contains("content-type"));
}

#[tokio::test]
async fn test_preflight_from_other_origin_is_forbidden() {
    let shopify = StubShopify::start().await;
    let app = TestApp::new(&shopify, OrderMode::RestCustomItem);

    let response = app.send(preflight("https://evil.example.net")).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body,
        json!({"success": false, "error": "Origin not allowed"})
    );
    assert!(
        response
            .headers
            .get("access-control-allow-origin")
            .is_none()
    );
}

#[tokio::test]
async fn test_simple_request_from_other_origin_gets_no_cors_headers() {
    let shopify = StubShopify::start().await.respond(
        Method::POST,
        "draft_orders.json",
        StatusCode::CREATED,
        json!({"draft_order": {"invoice_url": "https://back-store.myshopify.com/i/1"}}),
    );
    let app = TestApp::new(&shopify, OrderMode::RestCustomItem);

    let response = app
        .send(
            Request::post("/create-draft-order")
                .header("origin", "https://evil.example.net")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"price": "1.00", "quantity": 1}"#))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response
            .headers
            .get("access-control-allow-origin")
            .is_none()
    );
}

#[tokio::test]
async fn test_simple_request_from_allowed_origin_gets_cors_headers() {
    let shopify = StubShopify::start().await;
    let app = TestApp::new(&shopify, OrderMode::RestCustomItem);

    let response = app
        .send(
            Request::post("/create-draft-order")
                .header("origin", ALLOWED_ORIGIN)
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers["access-control-allow-origin"],
        ALLOWED_ORIGIN
    );
}

// =============================================================================
// Request IDs
// =============================================================================

#[tokio::test]
async fn test_every_response_has_request_id() {
    let shopify = StubShopify::start().await;
    let app = TestApp::new(&shopify, OrderMode::RestCustomItem);

    let ok = app
        .send(Request::get("/health").body(Body::empty()).unwrap())
        .await;
    let rejected = app.post_json("/create-draft-order", json!({})).await;
    let forbidden = app.send(preflight("https://evil.example.net")).await;

    for response in [ok, rejected, forbidden] {
        assert!(response.headers.contains_key(REQUEST_ID_HEADER));
    }
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let shopify = StubShopify::start().await;
    let app = TestApp::new(&shopify, OrderMode::RestCustomItem);

    let response = app
        .send(
            Request::get("/health")
                .header(REQUEST_ID_HEADER, "edge-7f3a")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.headers[REQUEST_ID_HEADER], "edge-7f3a");
}

// =============================================================================
// Malformed Bodies
// =============================================================================

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let shopify = StubShopify::start().await;
    let app = TestApp::new(&shopify, OrderMode::RestCustomItem);

    let response = app
        .send(
            Request::post("/create-draft-order")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"price": "1.00", "quantity"#))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert!(response.body["error"].is_string());
    assert!(shopify.requests().is_empty());
}

#[tokio::test]
async fn test_missing_content_type_is_bad_request() {
    let shopify = StubShopify::start().await;
    let app = TestApp::new(&shopify, OrderMode::RestCustomItem);

    let response = app
        .send(
            Request::post("/create-draft-order")
                .body(Body::from(r#"{"price": "1.00", "quantity": 1}"#))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_non_object_body_is_bad_request() {
    let shopify = StubShopify::start().await;
    let app = TestApp::new(&shopify, OrderMode::RestCustomItem);

    let response = app.post_json("/create-draft-order", json!([1, 2])).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_positional_array_body_is_not_forwarded() {
    let shopify = StubShopify::start().await.respond(
        Method::POST,
        "draft_orders.json",
        StatusCode::CREATED,
        json!({"draft_order": {"invoice_url": "https://back-store.myshopify.com/i/1"}}),
    );
    let app = TestApp::new(&shopify, OrderMode::RestCustomItem);

    let response = app
        .post_json("/create-draft-order", json!(["5.00", 3]))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        json!({"success": false, "error": "Request body must be a JSON object"})
    );
    assert!(shopify.requests().is_empty());
}
