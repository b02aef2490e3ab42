//! Wire types for the Admin API endpoints the proxy calls.
//!
//! Field names follow the upstream APIs: `snake_case` for REST,
//! `camelCase` for GraphQL.

use serde::{Deserialize, Serialize};

// =============================================================================
// REST: draft orders
// =============================================================================

/// Body of `POST /admin/api/{version}/draft_orders.json`.
#[derive(Debug, Clone, Serialize)]
pub struct RestDraftOrderRequest {
    pub draft_order: RestDraftOrder,
}

/// Draft order fields sent over REST.
#[derive(Debug, Clone, Serialize)]
pub struct RestDraftOrder {
    pub line_items: Vec<RestLineItem>,
    pub name: String,
    pub use_customer_default_address: bool,
}

/// A REST draft order line item: either a catalog variant or a custom item.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RestLineItem {
    Variant {
        variant_id: u64,
        quantity: u32,
        price: String,
    },
    Custom {
        title: String,
        quantity: u32,
        price: String,
    },
}

#[derive(Debug, Deserialize)]
pub(super) struct RestDraftOrderResponse {
    pub draft_order: RestDraftOrderCreated,
}

#[derive(Debug, Deserialize)]
pub(super) struct RestDraftOrderCreated {
    #[serde(default)]
    pub invoice_url: Option<String>,
}

// =============================================================================
// REST: lookups
// =============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<RestProduct>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RestProduct {
    #[serde(default)]
    pub variants: Vec<RestVariant>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RestVariant {
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct ShopResponse {
    pub shop: RestShop,
}

#[derive(Debug, Deserialize)]
pub(super) struct RestShop {
    #[serde(default)]
    pub currency: Option<String>,
}

// =============================================================================
// GraphQL: draftOrderCreate
// =============================================================================

/// `DraftOrderInput` for the `draftOrderCreate` mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderInput {
    pub name: String,
    pub use_customer_default_address: bool,
    pub line_items: Vec<DraftOrderLineItemInput>,
}

/// `DraftOrderLineItemInput`: a variant with a price override, or a custom
/// item with its own unit price.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderLineItemInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_override: Option<MoneyInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_unit_price_with_currency: Option<MoneyInput>,
}

/// `MoneyInput`: decimal amount as a string plus currency code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyInput {
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DraftOrderCreateData {
    pub draft_order_create: Option<DraftOrderCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DraftOrderCreatePayload {
    pub draft_order: Option<GraphQLDraftOrder>,
    #[serde(default)]
    pub user_errors: Vec<super::UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GraphQLDraftOrder {
    #[serde(default)]
    pub id: Option<String>,
    pub invoice_url: Option<String>,
}
