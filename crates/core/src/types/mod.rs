//! Core types for the draft-order proxy.
//!
//! Every inbound field is parsed into one of these wrappers before any
//! upstream call is made.

pub mod id;
pub mod line;
pub mod price;

pub use id::{VariantId, VariantIdError};
pub use line::{LineTitle, ProductHandle, Quantity, QuantityError, TextError};
pub use price::{CurrencyCode, CurrencyCodeError, Price, PriceError};
