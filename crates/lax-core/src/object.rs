//! Safe deep access into object graphs: `get`, `get_or`, `assoc`.

use std::rc::Rc;

use crate::path::{Path, Segment};
use crate::value::{Key, Value};

/// Resolve a path against an object graph, yielding `Undefined` when any
/// step is missing or non-traversable.
///
/// ```
/// use lax_core::{get, val, Value};
/// let object = val!({ "a": [{ "b": { "c": 3 } }] });
/// assert_eq!(get(&object, "a[0].b.c"), Value::Number(3.0));
/// assert_eq!(get(&object, "a[1].b.c"), Value::Undefined);
/// ```
pub fn get(object: &Value, path: impl Into<Path>) -> Value {
    get_or(object, path, Value::Undefined)
}

/// Like [`get`], but yields `default` for missing paths (or when the stored
/// value itself is `Undefined`). Never mutates `object`.
pub fn get_or(object: &Value, path: impl Into<Path>, default: Value) -> Value {
    let path = path.into();
    let mut current = object;
    for segment in path.segments() {
        let next = match (current, segment) {
            (Value::Object(map), Segment::Key(k)) => map.get(&Key::Str(k.clone())),
            (Value::Object(map), Segment::Symbol(s)) => map.get(&Key::Symbol(s.clone())),
            (Value::Array(items), seg) => seg.as_index().and_then(|i| items.get(i)),
            (Value::Function(f), Segment::Key(k)) => f.props().get(&Key::Str(k.clone())),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return default,
        }
    }
    if current.is_undefined() {
        default
    } else {
        current.clone()
    }
}

/// Non-mutating single-entry update: a copy of `object` with `key` set to
/// `value`. Non-object inputs produce a fresh single-entry object.
pub fn assoc(object: &Value, key: impl Into<Key>, value: Value) -> Value {
    let mut map = match object {
        Value::Object(map) => (**map).clone(),
        _ => Default::default(),
    };
    map.insert(key.into(), value);
    Value::Object(Rc::new(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::val;
    use crate::value::Symbol;

    #[test]
    fn test_get_nested_property() {
        let object = val!({ "a": [{ "b": { "c": 3 } }] });
        assert_eq!(get(&object, "a[0].b.c"), Value::Number(3.0));
        assert_eq!(get(&object, ["a", "0", "b", "c"]), Value::Number(3.0));
    }

    #[test]
    fn test_get_direct_and_array_elements() {
        let object = val!({ "a": 1, "b": 2 });
        assert_eq!(get(&object, "a"), Value::Number(1.0));
        assert_eq!(get(&object, "b"), Value::Number(2.0));

        let object = val!({ "a": [1, 2, 3] });
        assert_eq!(get(&object, "a[1]"), Value::Number(2.0));
        assert_eq!(get(&object, "a[5]"), Value::Undefined);
    }

    #[test]
    fn test_get_broken_paths() {
        let object = val!({ "a": [{ "b": { "c": 3 } }] });
        assert_eq!(get(&object, "a.b.c"), Value::Undefined);
        assert_eq!(get(&object, "a[1].b.c"), Value::Undefined);

        let object = val!({ "a": { "b": { "c": 3 } } });
        assert_eq!(get(&object, "a.b.d"), Value::Undefined);
    }

    #[test]
    fn test_get_deep_structures() {
        let object = val!({ "a": { "b": { "c": { "d": { "e": "value" } } } } });
        assert_eq!(get(&object, "a.b.c.d.e"), Value::from("value"));

        let store = val!({
            "department": { "produce": { "products": [{ "name": "Apple" }] } }
        });
        assert_eq!(
            get(&store, "department.produce.products[0].name"),
            Value::from("Apple")
        );
    }

    #[test]
    fn test_get_non_traversable_roots() {
        assert_eq!(get(&Value::Null, "a.b.c"), Value::Undefined);
        assert_eq!(get(&Value::Undefined, "a.b.c"), Value::Undefined);
        assert_eq!(get(&Value::from(42.0), "a.b.c"), Value::Undefined);
        assert_eq!(
            get_or(&Value::from("string"), "a", Value::from("default")),
            Value::from("default")
        );
    }

    #[test]
    fn test_get_default_fallback() {
        let object = val!({ "a": 1 });
        assert_eq!(
            get_or(&object, "b", Value::from("default")),
            Value::from("default")
        );
        // a stored undefined also falls back
        let object = Value::object([("a", Value::Undefined)]);
        assert_eq!(
            get_or(&object, "a", Value::from("default")),
            Value::from("default")
        );
    }

    #[test]
    fn test_get_empty_string_path() {
        let object = Value::object([("", Value::from("value"))]);
        assert_eq!(get(&object, ""), Value::from("value"));
        assert_eq!(get(&val!({ "a": 1 }), ""), Value::Undefined);
    }

    #[test]
    fn test_get_symbol_segments() {
        let sym = Symbol::new("b");
        let inner = Value::object([(sym.clone(), Value::from("value"))]);
        let object = Value::object([("a", inner)]);
        let path = Path::from([Segment::from("a"), Segment::from(sym)]);
        assert_eq!(get(&object, path), Value::from("value"));
    }

    #[test]
    fn test_get_mixed_array_object_elements() {
        let store = val!({
            "products": ["Fruits", { "id": 1, "name": "Apple" }]
        });
        assert_eq!(get(&store, "products[1].name"), Value::from("Apple"));
        assert_eq!(
            get_or(&store, "products[2].name", Value::from("Not Found")),
            Value::from("Not Found")
        );
    }

    #[test]
    fn test_assoc_does_not_mutate() {
        let original = val!({ "quantity": 1 });
        let updated = assoc(&original, "quantity", Value::from(2.0));
        assert_eq!(get(&original, "quantity"), Value::Number(1.0));
        assert_eq!(get(&updated, "quantity"), Value::Number(2.0));
    }

    #[test]
    fn test_assoc_on_non_object() {
        let fresh = assoc(&Value::Null, "a", Value::from(1.0));
        assert_eq!(get(&fresh, "a"), Value::Number(1.0));
    }
}
