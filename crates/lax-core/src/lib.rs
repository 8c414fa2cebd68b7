//! Loose-typed utility core: a dynamic [`Value`] model with the
//! coercion-heavy helpers built on top of it.
//!
//! The crate mirrors the permissive semantics of a dynamically typed
//! storefront stack: numbers coerce from strings (`to_number`), deep paths
//! resolve softly (`get`), collections iterate uniformly whether they are
//! arrays, objects, or strings (`filter`/`map`/`reduce`), and free text
//! tokenizes into words (`words`). Coercion never raises — failures come
//! back as `NaN`, `Undefined`, or an empty container — while a non-callable
//! iteratee is a real error.
//!
//! # Example
//!
//! ```
//! use lax_core::{get, to_number, val, Value};
//!
//! let product = val!({ "name": "Apple", "price": "0.5" });
//! assert_eq!(get(&product, "name"), Value::from("Apple"));
//! assert_eq!(to_number(&get(&product, "price")), Value::Number(0.5));
//! assert_eq!(get(&product, "stock.count"), Value::Undefined);
//! ```

pub mod collection;
pub mod error;
pub mod lang;
pub mod number;
pub mod object;
pub mod path;
pub mod string;
pub mod value;

pub use collection::{cast_array, compact, filter, map, reduce};
pub use error::ValueError;
pub use lang::{eq, is_array_like_object, is_empty};
pub use number::{add, ceil, to_f64, to_number};
pub use object::{assoc, get, get_or};
pub use path::{Path, Segment};
pub use string::{capitalize, to_text, words};
pub use value::{FunctionValue, Key, NativeFn, Symbol, Value};

/// One-stop imports for callers that use the whole surface.
pub mod prelude {
    pub use crate::collection::{cast_array, compact, filter, map, reduce};
    pub use crate::error::ValueError;
    pub use crate::lang::{eq, is_array_like_object, is_empty};
    pub use crate::number::{add, ceil, to_f64, to_number};
    pub use crate::object::{assoc, get, get_or};
    pub use crate::path::{Path, Segment};
    pub use crate::string::{capitalize, to_text, words};
    pub use crate::val;
    pub use crate::value::{FunctionValue, Key, Symbol, Value};
}

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
