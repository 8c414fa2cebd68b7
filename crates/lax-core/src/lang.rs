//! Language-level predicates: `eq`, `is_empty`, `is_array_like_object`.

use std::rc::Rc;

use crate::value::{Key, Value};

/// SameValueZero equality.
///
/// `NaN` equals `NaN` and `0` equals `-0`; primitives compare by value and
/// containers by reference identity, so two distinct objects with identical
/// shape are NOT equal. There is no cross-type coercion: `1` and `"1"` are
/// unequal.
///
/// ```
/// use lax_core::{eq, Value};
/// assert!(eq(&Value::Number(f64::NAN), &Value::Number(f64::NAN)));
/// assert!(eq(&Value::Number(0.0), &Value::Number(-0.0)));
/// assert!(!eq(&Value::Number(1.0), &Value::from("1")));
/// ```
pub fn eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) => true,
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y || (x.is_nan() && y.is_nan()),
        // a boxed string wrapper collapses into String in this model, so
        // wrapper-vs-primitive equality is equality of text
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => Rc::ptr_eq(x, y),
        (Value::Object(x), Value::Object(y)) => Rc::ptr_eq(x, y),
        (Value::Map(x), Value::Map(y)) => Rc::ptr_eq(x, y),
        (Value::Set(x), Value::Set(y)) => Rc::ptr_eq(x, y),
        (Value::Function(x), Value::Function(y)) => x.same_identity(y),
        _ => false,
    }
}

/// Generalized emptiness.
///
/// Nullish values and all primitives (numbers including `0`, booleans,
/// symbols) are empty. Strings, arrays, maps, and sets are empty at length
/// zero. Objects are empty when they carry no own string-keyed entries —
/// symbol-keyed entries do not count, while an own `toString` entry does.
/// Functions are empty unless they carry own string-keyed properties.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => true,
        Value::Bool(_) | Value::Number(_) | Value::Symbol(_) => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Map(entries) => entries.is_empty(),
        Value::Set(items) => items.is_empty(),
        Value::Object(map) => !map.keys().any(|k| matches!(k, Key::Str(_))),
        Value::Function(f) => !f.props().keys().any(|k| matches!(k, Key::Str(_))),
    }
}

/// True for object-like values with an element count: arrays here. Strings
/// are array-like but not object-like, so they do not qualify.
pub fn is_array_like_object(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}
