//! Storefront and producer flows composed from the `lax-core` utilities.
//!
//! Everything here is a consumer of the loose-typed core: products, carts,
//! and credentials travel as [`lax_core::Value`]s, flows take their state
//! as explicit parameters and return new values instead of mutating, and
//! user-facing boundaries report structured outcomes rather than raising.
//!
//! # Example
//!
//! ```
//! use lax_commerce::cart::{add_to_cart, interact_with_cart};
//! use lax_core::{val, Value};
//!
//! let product = val!({ "id": 1, "name": "Apple", "price": 0.5 });
//! let cart = add_to_cart(&product, &val!([]))?;
//! let view = interact_with_cart(&cart, &Value::from(1.0), &Value::from(2.0))?;
//! assert_eq!(view.total_price, 1.5);
//! # Ok::<(), lax_commerce::CommerceError>(())
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod db;
mod error;
pub mod outcome;
pub mod producer;

pub use error::CommerceError;
pub use outcome::{Outcome, Validation};
