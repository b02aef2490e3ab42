//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::line::Quantity;

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a number")]
    NotANumber,
    /// The amount is zero or negative.
    #[error("price must be greater than zero")]
    NotPositive,
    /// The amount overflows decimal arithmetic.
    #[error("price is too large")]
    TooLarge,
}

/// A unit price in the shop's currency.
///
/// The amount is kept at the precision it was given with, but is always
/// rendered with exactly two decimal places, rounding half away from zero
/// (`"10"` becomes `"10.00"`, `"1.125"` becomes `"1.13"`). That is the
/// format the Admin API returns and accepts for money fields.
///
/// ## Examples
///
/// ```
/// use draft_proxy_core::Price;
///
/// assert_eq!(Price::parse("10").unwrap().to_string(), "10.00");
/// assert_eq!(Price::parse(" 4.5 ").unwrap().to_string(), "4.50");
/// assert_eq!(Price::parse("1.125").unwrap().to_string(), "1.13");
/// assert!(Price::parse("free").is_err());
/// assert!(Price::parse("-1.00").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Parse a `Price` from a decimal string.
    ///
    /// Scientific notation (`"1e2"`) is accepted since JSON numbers may be
    /// rendered that way.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, is not a decimal number,
    /// or is not strictly positive.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount = Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map_err(|_| PriceError::NotANumber)?;

        Self::new(amount)
    }

    /// Create a `Price` from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotPositive`] if the amount is zero or negative,
    /// or would render as `0.00`.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount <= Decimal::ZERO || cents(amount).is_zero() {
            return Err(PriceError::NotPositive);
        }
        Ok(Self(amount.normalize()))
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::TooLarge`] on decimal overflow.
    pub fn times(&self, quantity: Quantity) -> Result<Self, PriceError> {
        self.0
            .checked_mul(Decimal::from(quantity.get()))
            .map(|amount| Self(amount.normalize()))
            .ok_or(PriceError::TooLarge)
    }
}

/// Round to two decimal places with the scale fixed at 2.
fn cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", cents(self.0))
    }
}

/// Errors that can occur when parsing a [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyCodeError {
    /// The input is not three ASCII letters.
    #[error("currency code must be three letters (got {0:?})")]
    Invalid(String),
}

/// ISO 4217 currency code, stored upper-case.
///
/// ```
/// use draft_proxy_core::CurrencyCode;
///
/// assert_eq!(CurrencyCode::parse("eur").unwrap().as_str(), "EUR");
/// assert!(CurrencyCode::parse("EURO").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse a `CurrencyCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error unless the trimmed input is exactly three ASCII letters.
    pub fn parse(s: &str) -> Result<Self, CurrencyCodeError> {
        let code = s.trim();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(CurrencyCodeError::Invalid(s.to_owned()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_renders_two_decimals() {
        assert_eq!(Price::parse("10.00").unwrap().to_string(), "10.00");
        assert_eq!(Price::parse("10").unwrap().to_string(), "10.00");
        assert_eq!(Price::parse("0.5").unwrap().to_string(), "0.50");
    }

    #[test]
    fn test_price_rounds_to_cents() {
        assert_eq!(Price::parse("1.125").unwrap().to_string(), "1.13");
        assert_eq!(Price::parse("1.124").unwrap().to_string(), "1.12");
        assert_eq!(Price::parse("19.999").unwrap().to_string(), "20.00");
        assert_eq!(Price::parse("1.125").unwrap().amount().to_string(), "1.125");
    }

    #[test]
    fn test_price_rejects_sub_cent_amounts() {
        assert_eq!(Price::parse("0.004"), Err(PriceError::NotPositive));
        assert_eq!(Price::parse("0.005").unwrap().to_string(), "0.01");
    }

    #[test]
    fn test_price_scientific_notation() {
        assert_eq!(Price::parse("1e2").unwrap().to_string(), "100.00");
    }

    #[test]
    fn test_price_rejects_garbage() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("   "), Err(PriceError::Empty));
        assert_eq!(Price::parse("ten"), Err(PriceError::NotANumber));
        assert_eq!(Price::parse("10,00"), Err(PriceError::NotANumber));
    }

    #[test]
    fn test_price_rejects_non_positive() {
        assert_eq!(Price::parse("0"), Err(PriceError::NotPositive));
        assert_eq!(Price::parse("0.00"), Err(PriceError::NotPositive));
        assert_eq!(Price::parse("-3"), Err(PriceError::NotPositive));
    }

    #[test]
    fn test_price_times_quantity() {
        let price = Price::parse("10.00").unwrap();
        let quantity = Quantity::new(3).unwrap();
        assert_eq!(price.times(quantity).unwrap().to_string(), "30.00");

        let price = Price::parse("2.25").unwrap();
        let quantity = Quantity::new(2).unwrap();
        assert_eq!(price.times(quantity).unwrap().to_string(), "4.50");

        let price = Price::parse("1.125").unwrap();
        let quantity = Quantity::new(3).unwrap();
        assert_eq!(price.times(quantity).unwrap().to_string(), "3.38");

        let quantity = Quantity::new(2).unwrap();
        let price = Price::new(Decimal::MAX).unwrap();
        assert_eq!(price.times(quantity), Err(PriceError::TooLarge));
    }

    #[test]
    fn test_currency_code() {
        assert_eq!(CurrencyCode::parse("usd").unwrap().as_str(), "USD");
        assert_eq!(CurrencyCode::parse(" GBP ").unwrap().to_string(), "GBP");
        assert!(CurrencyCode::parse("US").is_err());
        assert!(CurrencyCode::parse("U$D").is_err());
        assert!(CurrencyCode::parse("").is_err());
    }
}
