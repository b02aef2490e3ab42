//! Shaping a validated order into REST and GraphQL draft order payloads.

use draft_proxy_core::{CurrencyCode, LineTitle, Price, PriceError, Quantity, VariantId};
use rand::Rng;

use super::LinePricing;
use crate::shopify::types::{
    DraftOrderInput, DraftOrderLineItemInput, MoneyInput, RestDraftOrder, RestDraftOrderRequest,
    RestLineItem,
};

/// Generate a draft order name of the form `ORDER N#<n>`, `n` in `1000..=9999`.
pub fn draft_order_name<R: Rng>(rng: &mut R) -> String {
    let number: u16 = rng.random_range(1000..=9999);
    format!("ORDER N#{number}")
}

/// The single line item of a draft order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItem {
    /// A catalog variant sold at `price` per unit.
    Variant {
        variant_id: VariantId,
        quantity: Quantity,
        price: Price,
    },
    /// A custom item sold at `price` per unit.
    Custom {
        title: LineTitle,
        quantity: Quantity,
        price: Price,
    },
}

impl LineItem {
    /// A variant line item.
    #[must_use]
    pub const fn variant(variant_id: VariantId, quantity: Quantity, price: Price) -> Self {
        Self::Variant {
            variant_id,
            quantity,
            price,
        }
    }

    /// A custom line item priced according to `pricing`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::TooLarge`] if the line total overflows.
    pub fn custom(
        title: LineTitle,
        quantity: Quantity,
        price: Price,
        pricing: LinePricing,
    ) -> Result<Self, PriceError> {
        match pricing {
            LinePricing::Unit => Ok(Self::Custom {
                title,
                quantity,
                price,
            }),
            LinePricing::Total => Ok(Self::Custom {
                title: title.with_quantity(quantity),
                quantity: Quantity::ONE,
                price: price.times(quantity)?,
            }),
        }
    }
}

/// A draft order ready to be sent upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftOrder {
    pub name: String,
    pub line: LineItem,
}

impl DraftOrder {
    /// Body for `POST draft_orders.json`.
    #[must_use]
    pub fn to_rest(&self) -> RestDraftOrderRequest {
        let line_item = match &self.line {
            LineItem::Variant {
                variant_id,
                quantity,
                price,
            } => RestLineItem::Variant {
                variant_id: variant_id.as_u64(),
                quantity: quantity.get(),
                price: price.to_string(),
            },
            LineItem::Custom {
                title,
                quantity,
                price,
            } => RestLineItem::Custom {
                title: title.to_string(),
                quantity: quantity.get(),
                price: price.to_string(),
            },
        };

        RestDraftOrderRequest {
            draft_order: RestDraftOrder {
                line_items: vec![line_item],
                name: self.name.clone(),
                use_customer_default_address: true,
            },
        }
    }

    /// `DraftOrderInput` for `draftOrderCreate`, with prices in `currency`.
    #[must_use]
    pub fn to_graphql(&self, currency: &CurrencyCode) -> DraftOrderInput {
        let money = |price: &Price| MoneyInput {
            amount: price.to_string(),
            currency_code: currency.to_string(),
        };

        let line_item = match &self.line {
            LineItem::Variant {
                variant_id,
                quantity,
                price,
            } => DraftOrderLineItemInput {
                variant_id: Some(variant_id.to_gid()),
                quantity: quantity.get(),
                price_override: Some(money(price)),
                ..Default::default()
            },
            LineItem::Custom {
                title,
                quantity,
                price,
            } => DraftOrderLineItemInput {
                title: Some(title.to_string()),
                quantity: quantity.get(),
                original_unit_price_with_currency: Some(money(price)),
                ..Default::default()
            },
        };

        DraftOrderInput {
            name: self.name.clone(),
            use_customer_default_address: true,
            line_items: vec![line_item],
        }
    }
}
