//! Line item building blocks: quantities, product handles, and titles.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The input is not a whole number.
    #[error("quantity must be a whole number")]
    NotAnInteger,
    /// The quantity is zero or negative.
    #[error("quantity must be at least 1")]
    TooSmall,
    /// The quantity does not fit the upstream integer type.
    #[error("quantity must be at most {max}")]
    TooLarge {
        /// Maximum allowed quantity.
        max: u32,
    },
}

/// Number of units on a line item, always at least one.
///
/// ```
/// use draft_proxy_core::Quantity;
///
/// assert_eq!(Quantity::parse("2").unwrap().get(), 2);
/// assert!(Quantity::parse("0").is_err());
/// assert!(Quantity::parse("2.5").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// Largest quantity accepted (the Admin API uses signed 32-bit integers).
    #[allow(clippy::cast_sign_loss)]
    pub const MAX: u32 = i32::MAX as u32;

    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a `Quantity` from an integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is below 1 or above [`Self::MAX`].
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value < 1 {
            return Err(QuantityError::TooSmall);
        }
        u32::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(QuantityError::TooLarge { max: Self::MAX })
    }

    /// Parse a `Quantity` from a string of decimal digits.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a whole number or out of range.
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| QuantityError::NotAnInteger)?;
        Self::new(value)
    }

    /// Returns the quantity as an integer.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors shared by the free-text wrappers ([`ProductHandle`], [`LineTitle`]).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// The input is empty after trimming.
    #[error("{field} cannot be empty")]
    Empty {
        /// Name of the field being parsed.
        field: &'static str,
    },
    /// The input is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Name of the field being parsed.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
    },
}

const MAX_TEXT_LENGTH: usize = 255;

fn parse_text(s: &str, field: &'static str) -> Result<String, TextError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TextError::Empty { field });
    }
    if s.chars().count() > MAX_TEXT_LENGTH {
        return Err(TextError::TooLong {
            field,
            max: MAX_TEXT_LENGTH,
        });
    }
    Ok(s.to_owned())
}

/// A product handle (URL slug) on the back-store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductHandle(String);

impl ProductHandle {
    /// Parse a `ProductHandle`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is empty or longer than 255 characters.
    pub fn parse(s: &str) -> Result<Self, TextError> {
        parse_text(s, "product_handle").map(Self)
    }

    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Title of a custom (non-catalog) line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineTitle(String);

impl LineTitle {
    /// Parse a `LineTitle`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is empty or longer than 255 characters.
    pub fn parse(s: &str) -> Result<Self, TextError> {
        parse_text(s, "title").map(Self)
    }

    /// Title with a quantity suffix, used when a whole order is billed as one line.
    #[must_use]
    pub fn with_quantity(&self, quantity: Quantity) -> Self {
        Self(format!("{} x{quantity}", self.0))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
