//! Generalized iteration primitives: `filter`, `map`, `reduce`, plus the
//! small array helpers `compact` and `cast_array`.
//!
//! Collections are arrays, plain objects (own string-keyed entries), or
//! strings (sequences of characters). Nullish and scalar inputs iterate as
//! empty; sources are never mutated. Iteratees are function values; errors
//! they raise propagate unchanged.

use crate::error::ValueError;
use crate::value::{FunctionValue, Key, Value};

/// The (key, value) entries a collection iterates over: indices for arrays
/// and strings, own string keys for objects.
fn entries(collection: &Value) -> Vec<(Value, Value)> {
    match collection {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (Value::from(i), v.clone()))
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, v)| match k {
                Key::Str(k) => Some((Value::from(k.as_str()), v.clone())),
                Key::Symbol(_) => None,
            })
            .collect(),
        Value::String(s) => s
            .chars()
            .enumerate()
            .map(|(i, c)| (Value::from(i), Value::String(c.to_string())))
            .collect(),
        _ => Vec::new(),
    }
}

fn as_callable<'a>(value: &'a Value) -> Result<&'a FunctionValue, ValueError> {
    match value {
        Value::Function(f) => Ok(f),
        other => Err(ValueError::NotCallable(other.type_name().to_string())),
    }
}

/// New array of the elements for which `predicate(value, key_or_index,
/// collection)` is truthy. Nullish collections filter to an empty array.
///
/// ```
/// use lax_core::{filter, val, Value};
/// let evens = filter(
///     &val!([1, 2, 3]),
///     &Value::function(|args| Ok(Value::Bool(args[0].as_f64().unwrap_or(f64::NAN) % 2.0 == 0.0))),
/// ).unwrap();
/// assert_eq!(evens, val!([2]));
/// ```
pub fn filter(collection: &Value, predicate: &Value) -> Result<Value, ValueError> {
    let predicate = as_callable(predicate)?;
    let mut kept = Vec::new();
    for (key, value) in entries(collection) {
        if predicate
            .call(&[value.clone(), key, collection.clone()])?
            .is_truthy()
        {
            kept.push(value);
        }
    }
    Ok(Value::array(kept))
}

/// New array of `iteratee(value, key_or_index, collection)` results, same
/// length as the source. Nullish collections map to an empty array; a
/// non-callable iteratee is an error. A call-context object (`this`) has no
/// equivalent here — capture it in the iteratee closure instead.
pub fn map(collection: &Value, iteratee: &Value) -> Result<Value, ValueError> {
    let iteratee = as_callable(iteratee)?;
    let mut out = Vec::new();
    for (key, value) in entries(collection) {
        out.push(iteratee.call(&[value, key, collection.clone()])?);
    }
    Ok(Value::array(out))
}

/// Left-to-right fold with `iteratee(accumulator, value, key_or_index,
/// collection)`.
///
/// Without a seed the first element seeds the accumulator and iteration
/// starts at the second; an empty collection with no seed folds to
/// `Undefined`. The iteratee is never invoked for an effectively empty
/// collection.
pub fn reduce(
    collection: &Value,
    iteratee: &Value,
    accumulator: Option<Value>,
) -> Result<Value, ValueError> {
    let iteratee = as_callable(iteratee)?;
    let mut iter = entries(collection).into_iter();
    let mut acc = match accumulator {
        Some(seed) => seed,
        None => match iter.next() {
            Some((_, first)) => first,
            None => return Ok(Value::Undefined),
        },
    };
    for (key, value) in iter {
        acc = iteratee.call(&[acc, value, key, collection.clone()])?;
    }
    Ok(acc)
}

/// New array without the falsey elements (`false`, `0`, `NaN`, `""`,
/// `null`, `undefined`). Non-array inputs compact to an empty array.
pub fn compact(collection: &Value) -> Value {
    match collection {
        Value::Array(items) => Value::array(items.iter().filter(|v| v.is_truthy()).cloned()),
        _ => Value::array([]),
    }
}

/// Wrap a non-array value in a single-element array; arrays pass through.
pub fn cast_array(value: &Value) -> Value {
    match value {
        Value::Array(_) => value.clone(),
        other => Value::array([other.clone()]),
    }
}
