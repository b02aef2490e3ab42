//! Draft order modes, request validation, and payload shaping.
//!
//! # Modes
//!
//! The proxy is deployed in one [`OrderMode`], fixed at startup. The mode
//! decides which request fields are required and which upstream calls are
//! made:
//!
//! ```text
//! rest-product-handle  product_handle, quantity, price  products.json → draft_orders.json
//! rest-custom-item     quantity, price [, title]                         draft_orders.json
//! graphql-variant      variant_id, quantity, price      (shop.json) →   draftOrderCreate
//! graphql-custom-item  quantity, price [, title]        (shop.json) →   draftOrderCreate
//! ```

mod payload;
mod request;

pub use payload::{DraftOrder, LineItem, draft_order_name};
pub use request::{OrderRequest, OrderTarget, ValidatedOrder, ValidationError};

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// Which Admin API creates the draft order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamApi {
    Rest,
    GraphQL,
}

/// The configured variant of the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderMode {
    /// Look the product up by handle, then create a REST draft order for
    /// its first variant.
    #[default]
    RestProductHandle,
    /// Create a REST draft order with a custom line item.
    RestCustomItem,
    /// Create a GraphQL draft order for a variant with a price override.
    GraphqlVariant,
    /// Create a GraphQL draft order with a custom line item.
    GraphqlCustomItem,
}

impl OrderMode {
    /// All modes, in documentation order.
    pub const ALL: [Self; 4] = [
        Self::RestProductHandle,
        Self::RestCustomItem,
        Self::GraphqlVariant,
        Self::GraphqlCustomItem,
    ];

    /// Configuration name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RestProductHandle => "rest-product-handle",
            Self::RestCustomItem => "rest-custom-item",
            Self::GraphqlVariant => "graphql-variant",
            Self::GraphqlCustomItem => "graphql-custom-item",
        }
    }

    /// API used to create the draft order.
    #[must_use]
    pub const fn api(self) -> UpstreamApi {
        match self {
            Self::RestProductHandle | Self::RestCustomItem => UpstreamApi::Rest,
            Self::GraphqlVariant | Self::GraphqlCustomItem => UpstreamApi::GraphQL,
        }
    }

    /// Human-readable list of required request fields.
    #[must_use]
    pub const fn required_fields(self) -> &'static str {
        match self {
            Self::RestProductHandle => "product_handle, quantity & price",
            Self::GraphqlVariant => "variant_id, quantity & price",
            Self::RestCustomItem | Self::GraphqlCustomItem => "quantity & price",
        }
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing an [`OrderMode`] or [`LinePricing`] from configuration.
#[derive(Debug, Error)]
#[error("unknown value {value:?} (expected one of: {expected})")]
pub struct ParseSettingError {
    value: String,
    expected: &'static str,
}

impl FromStr for OrderMode {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSettingError {
                value: s.to_string(),
                expected: "rest-product-handle, rest-custom-item, graphql-variant, graphql-custom-item",
            })
    }
}

/// How a custom line item is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinePricing {
    /// `quantity` units at `price` each.
    #[default]
    Unit,
    /// A single unit priced at `price × quantity`, titled `"<title> x<quantity>"`.
    Total,
}

impl FromStr for LinePricing {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unit" => Ok(Self::Unit),
            "total" => Ok(Self::Total),
            other => Err(ParseSettingError {
                value: other.to_string(),
                expected: "unit, total",
            }),
        }
    }
}
