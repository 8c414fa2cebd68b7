//! Catalog browsing and search.

use lax_core::{capitalize, compact, eq, filter, get, map, reduce, to_text, val, Value};

use crate::error::CommerceError;

/// Membership test shared by the catalog predicates: element membership for
/// arrays, substring containment for strings.
fn includes(container: &Value, needle: &Value) -> bool {
    match container {
        Value::Array(items) => items.iter().any(|item| eq(item, needle)),
        Value::String(s) => needle.as_str().map(|n| s.contains(n)).unwrap_or(false),
        _ => false,
    }
}

/// Products whose `category` contains `category`.
pub fn browse_product_catalog(
    products: &Value,
    category: &str,
) -> Result<Value, CommerceError> {
    let needle = Value::from(category);
    let predicate = Value::function(move |args| {
        Ok(Value::Bool(includes(&get(&args[0], "category"), &needle)))
    });
    let found = filter(products, &predicate)?;
    tracing::debug!(
        category,
        matches = found.as_array().map(|a| a.len()).unwrap_or(0),
        "catalog browse"
    );
    Ok(found)
}

/// Products whose name or description contains `search_key` as a whole
/// word. Matching is case-insensitive on both sides.
pub fn search_product(products: &Value, search_key: &str) -> Result<Value, CommerceError> {
    let key = search_key.to_lowercase();
    let predicate = Value::function(move |args| {
        let product = &args[0];
        let matches = |field: &str| {
            lax_core::words(&to_text(&get(product, field)), None)
                .iter()
                .any(|token| token.to_lowercase() == key)
        };
        Ok(Value::Bool(matches("name") || matches("description")))
    });
    Ok(filter(products, &predicate)?)
}

/// Property filters applied to a search result set.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Keep products priced at or above this.
    pub min_price: Option<f64>,
    /// Keep products carrying every one of these categories.
    pub categories: Option<Value>,
}

/// Narrow a result set by [`FilterOptions`], drop falsey entries, and
/// capitalize the display fields of what remains.
pub fn filter_search_results(
    products: &Value,
    options: &FilterOptions,
) -> Result<Value, CommerceError> {
    let mut narrowed = products.clone();

    if let Some(min_price) = options.min_price {
        let keep_priced = Value::function(move |args| {
            let mut kept: Vec<Value> = args[0].as_array().unwrap_or_default().to_vec();
            if lax_core::to_f64(&get(&args[1], "price")) >= min_price {
                kept.push(args[1].clone());
            }
            Ok(Value::array(kept))
        });
        narrowed = reduce(&narrowed, &keep_priced, Some(val!([])))?;
    }

    if let Some(categories) = options.categories.clone() {
        let requested = categories.as_array().map(|a| a.len()).unwrap_or(0);
        let has_all = Value::function(move |args| {
            let product_categories = get(&args[0], "category");
            let present = Value::function(move |inner| {
                Ok(Value::Bool(includes(&product_categories, &inner[0])))
            });
            let matched = filter(&categories, &present)?;
            Ok(Value::Bool(
                matched.as_array().map(|a| a.len()).unwrap_or(0) == requested,
            ))
        });
        narrowed = filter(&narrowed, &has_all)?;
    }

    let display = compact(&narrowed);
    let capitalized = Value::function(|args| {
        let product = &args[0];
        let name = capitalize(&to_text(&get(product, "name")));
        let description = capitalize(&to_text(&get(product, "description")));
        let product = lax_core::assoc(product, "name", Value::from(name));
        Ok(lax_core::assoc(&product, "description", Value::from(description)))
    });
    Ok(map(&display, &capitalized)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Value {
        val!([
            {
                "id": 1,
                "name": "Fresh Apples",
                "description": "crisp and sweet",
                "category": ["Fruits", "Organic"],
                "price": 2.5
            },
            {
                "id": 2,
                "name": "Carrots",
                "description": "2kg pack",
                "category": ["Vegetables"],
                "price": 1.2
            },
            {
                "id": 3,
                "name": "Dragon Fruit",
                "description": "exotic pitaya",
                "category": ["Fruits"],
                "price": 6.0
            }
        ])
    }

    #[test]
    fn test_browse_by_category() {
        let fruits = browse_product_catalog(&products(), "Fruits").unwrap();
        let names: Vec<Value> = fruits
            .as_array()
            .unwrap()
            .iter()
            .map(|p| get(p, "name"))
            .collect();
        assert_eq!(names, vec![Value::from("Fresh Apples"), Value::from("Dragon Fruit")]);

        let none = browse_product_catalog(&products(), "Dairy").unwrap();
        assert_eq!(none, val!([]));
    }

    #[test]
    fn test_search_matches_whole_words_case_insensitively() {
        let hit = search_product(&products(), "APPLES").unwrap();
        assert_eq!(hit.as_array().unwrap().len(), 1);
        assert_eq!(get(&hit.as_array().unwrap()[0], "id"), Value::Number(1.0));

        // description tokens count too
        let hit = search_product(&products(), "pitaya").unwrap();
        assert_eq!(get(&hit.as_array().unwrap()[0], "id"), Value::Number(3.0));

        // substrings of a word are not matches
        let miss = search_product(&products(), "app").unwrap();
        assert_eq!(miss, val!([]));
    }

    #[test]
    fn test_filter_by_min_price() {
        let options = FilterOptions {
            min_price: Some(2.0),
            categories: None,
        };
        let kept = filter_search_results(&products(), &options).unwrap();
        let ids: Vec<Value> = kept
            .as_array()
            .unwrap()
            .iter()
            .map(|p| get(p, "id"))
            .collect();
        assert_eq!(ids, vec![Value::Number(1.0), Value::Number(3.0)]);
    }

    #[test]
    fn test_filter_requires_every_category() {
        let options = FilterOptions {
            min_price: None,
            categories: Some(val!(["Fruits", "Organic"])),
        };
        let kept = filter_search_results(&products(), &options).unwrap();
        let ids: Vec<Value> = kept
            .as_array()
            .unwrap()
            .iter()
            .map(|p| get(p, "id"))
            .collect();
        assert_eq!(ids, vec![Value::Number(1.0)]);
    }

    #[test]
    fn test_filter_capitalizes_display_fields() {
        let options = FilterOptions::default();
        let shown = filter_search_results(&val!([{ "name": "red potatoes", "description": "PERFECT for mashing" }]), &options).unwrap();
        let product = &shown.as_array().unwrap()[0];
        assert_eq!(get(product, "name"), Value::from("Red potatoes"));
        assert_eq!(get(product, "description"), Value::from("Perfect for mashing"));
    }

    #[test]
    fn test_filter_drops_falsey_entries() {
        let sparse = Value::array([
            val!({ "name": "a", "description": "b" }),
            Value::Null,
            Value::Undefined,
        ]);
        let shown = filter_search_results(&sparse, &FilterOptions::default()).unwrap();
        assert_eq!(shown.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let source = products();
        filter_search_results(
            &source,
            &FilterOptions {
                min_price: Some(2.0),
                categories: Some(val!(["Fruits"])),
            },
        )
        .unwrap();
        assert_eq!(source, products());
    }
}
