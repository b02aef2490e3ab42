//! Inbound `POST /create-draft-order` body and its validation.

use draft_proxy_core::{
    LineTitle, Price, PriceError, ProductHandle, Quantity, QuantityError, TextError, VariantId,
    VariantIdError,
};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::OrderMode;

/// Raw request body.
///
/// Fields are kept as JSON values so that numbers and numeric strings are
/// both accepted, and so a wrongly-typed field yields a field-specific
/// message rather than a generic deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub variant_id: Option<Value>,
    #[serde(default)]
    pub product_handle: Option<Value>,
}

/// Why a request was rejected with 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent, null, or an empty string.
    #[error("{required} required")]
    Missing {
        /// The mode's required field list.
        required: &'static str,
    },

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Quantity(#[from] QuantityError),

    #[error(transparent)]
    VariantId(#[from] VariantIdError),

    #[error(transparent)]
    Text(#[from] TextError),

    /// A text field was given a non-string JSON value.
    #[error("{field} must be a string")]
    NotAString {
        /// Name of the field.
        field: &'static str,
    },
}

/// What the draft order's line item refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderTarget {
    /// A product to resolve to its first variant.
    ProductHandle(ProductHandle),
    /// A known variant.
    Variant(VariantId),
    /// A custom line item.
    Custom(LineTitle),
}

/// A request that passed validation for the active mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub price: Price,
    pub quantity: Quantity,
    pub target: OrderTarget,
}

impl OrderRequest {
    /// Validate the request for `mode`.
    ///
    /// Presence of every required field is checked before any field is
    /// parsed, so a request missing several fields gets a single message
    /// naming all of them. In custom-item modes an absent `title` falls
    /// back to `default_title`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Missing` when a required field is absent,
    /// or the field's parse error when one is present but invalid.
    pub fn validate(
        &self,
        mode: OrderMode,
        default_title: &LineTitle,
    ) -> Result<ValidatedOrder, ValidationError> {
        let missing = ValidationError::Missing {
            required: mode.required_fields(),
        };

        let target_field = match mode {
            OrderMode::RestProductHandle => Some(self.product_handle.as_ref()),
            OrderMode::GraphqlVariant => Some(self.variant_id.as_ref()),
            OrderMode::RestCustomItem | OrderMode::GraphqlCustomItem => None,
        };

        let (Some(price), Some(quantity)) = (
            present(self.price.as_ref()),
            present(self.quantity.as_ref()),
        ) else {
            return Err(missing);
        };
        let target_value = match target_field {
            Some(field) => Some(present(field).ok_or(missing)?),
            None => None,
        };

        let price = Price::parse(&numeric_text(price).ok_or(PriceError::NotANumber)?)?;
        let quantity =
            Quantity::parse(&numeric_text(quantity).ok_or(QuantityError::NotAnInteger)?)?;

        let target = match (mode, target_value) {
            (OrderMode::RestProductHandle, Some(value)) => {
                OrderTarget::ProductHandle(ProductHandle::parse(text(value, "product_handle")?)?)
            }
            (OrderMode::GraphqlVariant, Some(value)) => OrderTarget::Variant(VariantId::parse(
                &numeric_text(value).ok_or(VariantIdError::Invalid)?,
            )?),
            _ => match present(self.title.as_ref()) {
                Some(value) => OrderTarget::Custom(LineTitle::parse(text(value, "title")?)?),
                None => OrderTarget::Custom(default_title.clone()),
            },
        };

        Ok(ValidatedOrder {
            price,
            quantity,
            target,
        })
    }
}

/// A field counts as present unless absent, `null`, or an empty/blank string.
fn present(field: Option<&Value>) -> Option<&Value> {
    match field? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        value => Some(value),
    }
}

/// Render a JSON number or string as text for numeric parsing.
fn numeric_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text<'a>(value: &'a Value, field: &'static str) -> Result<&'a str, ValidationError> {
    value
        .as_str()
        .ok_or(ValidationError::NotAString { field })
}
