//! Business logic services for the proxy.
//!
//! # Services
//!
//! - `draft_orders` - Validate a request, run the mode's upstream calls, and
//!   return the invoice URL

pub mod draft_orders;

pub use draft_orders::create_draft_order;
