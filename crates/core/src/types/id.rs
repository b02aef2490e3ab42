//! Shopify product variant IDs.
//!
//! The REST Admin API addresses variants by their numeric ID, the GraphQL
//! Admin API by a global ID (`gid://shopify/ProductVariant/<n>`). Both forms
//! are accepted on input and either can be produced on output.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Global ID prefix for product variants.
const VARIANT_GID_PREFIX: &str = "gid://shopify/ProductVariant/";

/// Errors that can occur when parsing a [`VariantId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VariantIdError {
    /// The input is empty.
    #[error("variant_id cannot be empty")]
    Empty,
    /// The input is neither a positive integer nor a variant global ID.
    #[error("variant_id must be a numeric ID or a ProductVariant global ID")]
    Invalid,
}

/// A product variant ID.
///
/// ```
/// use draft_proxy_core::VariantId;
///
/// let id = VariantId::parse("gid://shopify/ProductVariant/42").unwrap();
/// assert_eq!(id, VariantId::parse("42").unwrap());
/// assert_eq!(id.to_gid(), "gid://shopify/ProductVariant/42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(u64);

impl VariantId {
    /// Create a `VariantId` from a numeric ID.
    ///
    /// # Errors
    ///
    /// Returns [`VariantIdError::Invalid`] for zero.
    pub const fn new(id: u64) -> Result<Self, VariantIdError> {
        if id == 0 {
            return Err(VariantIdError::Invalid);
        }
        Ok(Self(id))
    }

    /// Parse a `VariantId` from a numeric string or a global ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or not a valid variant ID.
    pub fn parse(s: &str) -> Result<Self, VariantIdError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(VariantIdError::Empty);
        }

        let digits = s.strip_prefix(VARIANT_GID_PREFIX).unwrap_or(s);
        let id = digits
            .parse::<u64>()
            .map_err(|_| VariantIdError::Invalid)?;
        Self::new(id)
    }

    /// Get the underlying numeric ID.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Render as a GraphQL global ID.
    #[must_use]
    pub fn to_gid(&self) -> String {
        format!("{VARIANT_GID_PREFIX}{}", self.0)
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
