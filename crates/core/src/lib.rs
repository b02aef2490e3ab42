//! Draft-order proxy core - shared domain types.
//!
//! This crate provides the validated value types the proxy builds draft
//! orders from. It contains only types - no I/O, no HTTP clients - so the
//! parsing rules can be tested in isolation.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for prices, quantities, IDs, and titles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
