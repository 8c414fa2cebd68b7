//! The dynamically-typed value model.
//!
//! `Value` is a tagged union covering every runtime type the permissive
//! utility semantics can observe: the two "absent" values (`Undefined` and
//! `Null`), primitives, symbols, and the container kinds (arrays, plain
//! objects, maps, sets) plus callable function values. Containers are
//! `Rc`-shared so cloning is cheap and reference identity is observable,
//! which [`crate::lang::eq`] relies on.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A symbol: a process-unique key that never collides with string keys.
///
/// Two `Symbol`s are equal only when one is a clone of the other; the
/// description is informational.
#[derive(Debug, Clone)]
pub struct Symbol {
    id: u64,
    description: Rc<str>,
}

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

impl Symbol {
    /// Create a fresh symbol with the given description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: Rc::from(description.into()),
        }
    }

    /// The symbol's description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

/// An object property key: either a string or a symbol.
///
/// Symbol-keyed entries are invisible to string paths and do not count as
/// "own enumerable string-keyed" content (see [`crate::lang::is_empty`]).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Key {
    Str(String),
    Symbol(Symbol),
}

impl Key {
    /// The string form of the key, if it is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Symbol(_) => None,
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<Symbol> for Key {
    fn from(s: Symbol) -> Self {
        Key::Symbol(s)
    }
}

/// Signature of a native function value.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, ValueError>;

/// A callable value with its own (string/symbol keyed) properties.
#[derive(Clone)]
pub struct FunctionValue {
    f: Rc<NativeFn>,
    props: Rc<BTreeMap<Key, Value>>,
}

impl FunctionValue {
    pub fn new(f: impl Fn(&[Value]) -> Result<Value, ValueError> + 'static) -> Self {
        Self {
            f: Rc::new(f),
            props: Rc::new(BTreeMap::new()),
        }
    }

    /// Attach own properties to the function.
    pub fn with_props<K: Into<Key>>(mut self, entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        self.props = Rc::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        );
        self
    }

    /// Invoke the function.
    pub fn call(&self, args: &[Value]) -> Result<Value, ValueError> {
        (self.f)(args)
    }

    /// Own properties carried by the function.
    pub fn props(&self) -> &BTreeMap<Key, Value> {
        &self.props
    }

    /// Reference identity with another function value.
    pub fn same_identity(&self, other: &FunctionValue) -> bool {
        Rc::ptr_eq(&self.f, &other.f)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.props.is_empty() {
            write!(f, "Function(<native>)")
        } else {
            write!(f, "Function(<native>, props: {:?})", self.props)
        }
    }
}

/// A loosely-typed runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Symbol(Symbol),
    Array(Rc<Vec<Value>>),
    Object(Rc<BTreeMap<Key, Value>>),
    Map(Rc<Vec<(Value, Value)>>),
    Set(Rc<Vec<Value>>),
    Function(FunctionValue),
}

impl Value {
    /// Build an array value.
    pub fn array(items: impl IntoIterator<Item = Value>) -> Value {
        Value::Array(Rc::new(items.into_iter().collect()))
    }

    /// Build an object value from key/value entries.
    pub fn object<K: Into<Key>>(entries: impl IntoIterator<Item = (K, Value)>) -> Value {
        Value::Object(Rc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Build a map value (insertion-ordered key/value pairs).
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Value {
        Value::Map(Rc::new(entries.into_iter().collect()))
    }

    /// Build a set value.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Value {
        Value::Set(Rc::new(items.into_iter().collect()))
    }

    /// Build a function value from a native closure.
    pub fn function(f: impl Fn(&[Value]) -> Result<Value, ValueError> + 'static) -> Value {
        Value::Function(FunctionValue::new(f))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `null` or `undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Loose truthiness: everything is truthy except `undefined`, `null`,
    /// `false`, `0`, `NaN`, and the empty string.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// The runtime type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
            Value::Function(_) => "function",
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<Key, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up an own property on an object or function value.
    pub fn own_entry(&self, key: &Key) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            Value::Function(f) => f.props().get(key),
            _ => None,
        }
    }
}

/// Structural equality, used by tests and collection internals.
///
/// This is NOT the SameValueZero relation of [`crate::lang::eq`]: here `NaN`
/// is unequal to itself (plain `f64` semantics) and containers compare by
/// content, not identity. Functions compare by identity either way.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.same_identity(b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(items))
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(Rc::new(items.into_iter().map(Value::from).collect()))
            }
            serde_json::Value::Object(map) => Value::Object(Rc::new(
                map.into_iter()
                    .map(|(k, v)| (Key::Str(k), Value::from(v)))
                    .collect(),
            )),
        }
    }
}

/// JSON cannot carry `undefined`, symbols, functions, maps, or sets; those
/// become `null`, matching what stringification drops in the source model.
impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Undefined | Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && *n >= i64::MIN as f64 && *n <= i64::MAX as f64
                {
                    serde_json::Value::Number((*n as i64).into())
                } else {
                    serde_json::Number::from_f64(*n)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null)
                }
            }
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .filter_map(|(k, v)| {
                        k.as_str().map(|k| (k.to_string(), serde_json::Value::from(v)))
                    })
                    .collect(),
            ),
            Value::Symbol(_) | Value::Map(_) | Value::Set(_) | Value::Function(_) => {
                serde_json::Value::Null
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        serde_json::Value::from(&v)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_json::Value::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Value::from(serde_json::Value::deserialize(deserializer)?))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::string::to_text(self))
    }
}

/// Build a [`Value`] from JSON-shaped literal syntax.
///
/// ```
/// use lax_core::val;
/// let product = val!({ "id": 1, "name": "Apple", "tags": ["fresh", "juicy"] });
/// ```
#[macro_export]
macro_rules! val {
    ($($json:tt)+) => {
        $crate::Value::from($crate::__private::serde_json::json!($($json)+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::val;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Undefined.is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());

        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(-1.5).is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(Value::array([]).is_truthy());
        assert!(val!({}).is_truthy());
    }

    #[test]
    fn test_symbols_are_unique() {
        let a = Symbol::new("key");
        let b = Symbol::new("key");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.description(), "key");
    }

    #[test]
    fn test_val_macro_round_trip() {
        let v = val!({ "a": [1, 2.5, null, true, "x"] });
        let items = v.own_entry(&Key::from("a")).and_then(Value::as_array);
        let items = items.expect("array entry");
        assert_eq!(items[0], Value::Number(1.0));
        assert_eq!(items[1], Value::Number(2.5));
        assert_eq!(items[2], Value::Null);
        assert_eq!(items[3], Value::Bool(true));
        assert_eq!(items[4], Value::from("x"));
    }

    #[test]
    fn test_structural_equality_is_deep() {
        assert_eq!(val!({ "a": 1 }), val!({ "a": 1 }));
        assert_ne!(val!({ "a": 1 }), val!({ "a": 2 }));
        assert_eq!(val!([1, [2, 3]]), val!([1, [2, 3]]));
    }

    #[test]
    fn test_function_identity() {
        let f = Value::function(|_| Ok(Value::Null));
        let g = Value::function(|_| Ok(Value::Null));
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
    }

    #[test]
    fn test_serde_round_trip() {
        let v = val!({ "name": "Apple", "price": 2.5, "tags": ["fresh"] });
        let json = serde_json::to_string(&v).expect("serialize");
        let back: Value = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(v, back);
    }

    #[test]
    fn test_undefined_serializes_as_null() {
        let json = serde_json::to_value(Value::Undefined).expect("serialize");
        assert_eq!(json, serde_json::Value::Null);
    }

    #[test]
    fn test_own_entry_on_function_props() {
        let f = FunctionValue::new(|_| Ok(Value::Null)).with_props([("tag", Value::from("x"))]);
        let v = Value::Function(f);
        assert_eq!(v.own_entry(&Key::from("tag")), Some(&Value::from("x")));
        assert_eq!(v.own_entry(&Key::from("missing")), None);
    }
}
