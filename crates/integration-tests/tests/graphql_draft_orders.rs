//! Integration tests for the GraphQL modes: variant and custom item.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use draft_order_proxy::orders::OrderMode;
use draft_order_proxy_integration_tests::{StubShopify, TestApp, is_generated_name, proxy_config};
use draft_proxy_core::CurrencyCode;
use serde_json::{Value, json};

const INVOICE_URL: &str = "https://back-store.myshopify.com/12345/invoices/gql";

fn shop(currency: &str) -> Value {
    json!({"shop": {"id": 1, "currency": currency}})
}

fn created() -> Value {
    json!({
        "data": {
            "draftOrderCreate": {
                "draftOrder": {"id": "gid://shopify/DraftOrder/1", "invoiceUrl": INVOICE_URL},
                "userErrors": []
            }
        }
    })
}

#[tokio::test]
async fn test_variant_with_shop_currency() {
    let shopify = StubShopify::start()
        .await
        .respond(Method::GET, "shop.json", StatusCode::OK, shop("EUR"))
        .respond(Method::POST, "graphql.json", StatusCode::OK, created());
    let app = TestApp::new(&shopify, OrderMode::GraphqlVariant);

    let response = app
        .post_json(
            "/create-draft-order",
            json!({"variant_id": "39072856", "quantity": 3, "price": 9.5}),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"success": true, "url": INVOICE_URL}));

    let requests = shopify.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].resource, "shop.json");
    assert_eq!(requests[1].resource, "graphql.json");

    let body = &requests[1].body;
    assert!(
        body["query"]
            .as_str()
            .unwrap()
            .contains("draftOrderCreate(input: $input)")
    );

    let input = &body["variables"]["input"];
    assert_eq!(input["useCustomerDefaultAddress"], true);
    assert!(is_generated_name(input["name"].as_str().unwrap()));
    assert_eq!(
        input["lineItems"],
        json!([{
            "variantId": "gid://shopify/ProductVariant/39072856",
            "quantity": 3,
            "priceOverride": {"amount": "9.50", "currencyCode": "EUR"}
        }])
    );
}

#[tokio::test]
async fn test_configured_currency_skips_shop_lookup() {
    let shopify = StubShopify::start()
        .await
        .respond(Method::POST, "graphql.json", StatusCode::OK, created());
    let mut config = proxy_config(&shopify, OrderMode::GraphqlCustomItem);
    config.orders.currency = Some(CurrencyCode::parse("GBP").unwrap());
    let app = TestApp::with_config(config);

    let response = app
        .post_json("/create-draft-order", json!({"price": "10.00", "quantity": 2}))
        .await;

    assert_eq!(response.status, StatusCode::OK);

    let requests = shopify.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].body["variables"]["input"]["lineItems"],
        json!([{
            "title": "Custom Order",
            "quantity": 2,
            "originalUnitPriceWithCurrency": {"amount": "10.00", "currencyCode": "GBP"}
        }])
    );
}

#[tokio::test]
async fn test_user_errors_are_joined() {
    let shopify = StubShopify::start()
        .await
        .respond(Method::GET, "shop.json", StatusCode::OK, shop("USD"))
        .respond(
            Method::POST,
            "graphql.json",
            StatusCode::OK,
            json!({
                "data": {
                    "draftOrderCreate": {
                        "draftOrder": null,
                        "userErrors": [
                            {"field": ["lineItems", "0", "variantId"], "message": "Variant is invalid"},
                            {"field": null, "message": "Draft order could not be created"}
                        ]
                    }
                }
            }),
        );
    let app = TestApp::new(&shopify, OrderMode::GraphqlVariant);

    let response = app
        .post_json(
            "/create-draft-order",
            json!({"variant_id": 1, "quantity": 1, "price": "1.00"}),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        json!({
            "success": false,
            "error": "Variant is invalid; Draft order could not be created"
        })
    );
}

#[tokio::test]
async fn test_top_level_errors_are_joined() {
    let shopify = StubShopify::start()
        .await
        .respond(Method::GET, "shop.json", StatusCode::OK, shop("USD"))
        .respond(
            Method::POST,
            "graphql.json",
            StatusCode::OK,
            json!({
                "data": null,
                "errors": [
                    {"message": "Throttled"},
                    {"message": "Access denied", "locations": [{"line": 2, "column": 3}]}
                ]
            }),
        );
    let app = TestApp::new(&shopify, OrderMode::GraphqlCustomItem);

    let response = app
        .post_json("/create-draft-order", json!({"price": "1.00", "quantity": 1}))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Throttled; Access denied");
}

#[tokio::test]
async fn test_null_error_locations_and_path_are_accepted() {
    let shopify = StubShopify::start()
        .await
        .respond(Method::GET, "shop.json", StatusCode::OK, shop("USD"))
        .respond(
            Method::POST,
            "graphql.json",
            StatusCode::OK,
            json!({
                "data": null,
                "errors": [{"message": "Throttled", "locations": null, "path": null}]
            }),
        );
    let app = TestApp::new(&shopify, OrderMode::GraphqlCustomItem);

    let response = app
        .post_json("/create-draft-order", json!({"price": "1.00", "quantity": 1}))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        json!({"success": false, "error": "Throttled"})
    );
}

#[tokio::test]
async fn test_rejected_query_reports_graphql_messages() {
    let shopify = StubShopify::start()
        .await
        .respond(Method::GET, "shop.json", StatusCode::OK, shop("USD"))
        .respond(
            Method::POST,
            "graphql.json",
            StatusCode::BAD_REQUEST,
            json!({
                "errors": [
                    {
                        "message": "Parse error on \"}\" (RCURLY) at [1, 2]",
                        "locations": [{"line": 1, "column": 2}]
                    },
                    {"message": "Second"}
                ]
            }),
        );
    let app = TestApp::new(&shopify, OrderMode::GraphqlCustomItem);

    let response = app
        .post_json("/create-draft-order", json!({"price": "1.00", "quantity": 1}))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body["error"],
        "Parse error on \"}\" (RCURLY) at [1, 2]; Second"
    );
}

#[tokio::test]
async fn test_shop_currency_lookup_failure() {
    let shopify = StubShopify::start().await.respond(
        Method::GET,
        "shop.json",
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"errors": "Internal Server Error"}),
    );
    let app = TestApp::new(&shopify, OrderMode::GraphqlCustomItem);

    let response = app
        .post_json("/create-draft-order", json!({"price": "1.00", "quantity": 1}))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Failed to lookup shop currency");
    assert!(shopify.requests_to("graphql.json").is_empty());
}

#[tokio::test]
async fn test_variant_mode_requires_variant_id() {
    let shopify = StubShopify::start().await;
    let app = TestApp::new(&shopify, OrderMode::GraphqlVariant);

    let response = app
        .post_json("/create-draft-order", json!({"price": "1.00", "quantity": 1}))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "variant_id, quantity & price required"
    );

    let response = app
        .post_json(
            "/create-draft-order",
            json!({"variant_id": "gid://shopify/Product/1", "price": "1.00", "quantity": 1}),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert!(shopify.requests().is_empty());
}
