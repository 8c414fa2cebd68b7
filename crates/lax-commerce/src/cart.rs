//! Shopping-cart flows. Carts are plain values: every operation takes a
//! cart in and hands a new cart back, the caller swaps its stored copy.

use serde::{Deserialize, Serialize};

use lax_core::{add, assoc, eq, get, get_or, reduce, to_f64, val, Value};

use crate::error::CommerceError;

/// A cart plus the running total the review screen shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartView {
    pub cart_items: Value,
    pub total_price: f64,
}

/// Add a selection (one product or an array of them) to the cart.
///
/// A product already present by `id` gets its quantity bumped with `add`;
/// new products enter with quantity 1 and defaulted name/price.
pub fn add_to_cart(selected: &Value, cart: &Value) -> Result<Value, CommerceError> {
    let to_add = lax_core::cast_array(selected);
    let mut items: Vec<Value> = cart.as_array().unwrap_or_default().to_vec();

    for product in to_add.as_array().unwrap_or_default() {
        let product_id = get(product, "id");
        match items.iter().position(|item| eq(&get(item, "id"), &product_id)) {
            Some(i) => {
                let bumped = add(&get(&items[i], "quantity"), &Value::from(1.0));
                items[i] = assoc(&items[i], "quantity", bumped);
            }
            None => {
                let entry = assoc(&val!({}), "id", product_id);
                let entry = assoc(
                    &entry,
                    "name",
                    get_or(product, "name", Value::from("Unknown Product")),
                );
                let entry = assoc(&entry, "price", get_or(product, "price", Value::from(0.0)));
                items.push(assoc(&entry, "quantity", Value::from(1.0)));
            }
        }
    }
    tracing::debug!(items = items.len(), "cart updated");
    Ok(Value::array(items))
}

/// Adjust one item's quantity by `quantity_change`, dropping it when the
/// result is zero or less, and recompute the total.
pub fn interact_with_cart(
    cart: &Value,
    product_id: &Value,
    quantity_change: &Value,
) -> Result<CartView, CommerceError> {
    let mut items: Vec<Value> = cart.as_array().unwrap_or_default().to_vec();

    if let Some(i) = items.iter().position(|item| eq(&get(item, "id"), product_id)) {
        let adjusted = add(&get(&items[i], "quantity"), quantity_change);
        if to_f64(&adjusted) <= 0.0 {
            items.remove(i);
        } else {
            items[i] = assoc(&items[i], "quantity", adjusted);
        }
    }

    let cart_items = Value::array(items);
    let total_price = cart_total(&cart_items)?;
    Ok(CartView {
        cart_items,
        total_price,
    })
}

/// Sum of `price * quantity` across the cart, folded with `add`.
pub(crate) fn cart_total(cart: &Value) -> Result<f64, CommerceError> {
    let line_total = Value::function(|args| {
        let item = &args[1];
        let line = to_f64(&get(item, "price")) * to_f64(&get(item, "quantity"));
        Ok(add(&args[0], &Value::from(line)))
    });
    let total = reduce(cart, &line_total, Some(val!(0)))?;
    Ok(to_f64(&total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> Value {
        val!({ "id": 1, "name": "Apple", "price": 0.5 })
    }

    #[test]
    fn test_add_single_product() {
        let cart = add_to_cart(&apple(), &val!([])).unwrap();
        assert_eq!(
            cart,
            val!([{ "id": 1, "name": "Apple", "price": 0.5, "quantity": 1 }])
        );
    }

    #[test]
    fn test_add_existing_product_bumps_quantity() {
        let cart = add_to_cart(&apple(), &val!([])).unwrap();
        let cart = add_to_cart(&apple(), &cart).unwrap();
        assert_eq!(get(&cart.as_array().unwrap()[0], "quantity"), Value::Number(2.0));
        assert_eq!(cart.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_add_array_of_products() {
        let selection = val!([
            { "id": 1, "name": "Apple", "price": 0.5 },
            { "id": 2, "name": "Banana", "price": 0.25 }
        ]);
        let cart = add_to_cart(&selection, &val!([])).unwrap();
        assert_eq!(cart.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_add_defaults_missing_fields() {
        let bare = val!({ "id": 7 });
        let cart = add_to_cart(&bare, &val!([])).unwrap();
        let entry = &cart.as_array().unwrap()[0];
        assert_eq!(get(entry, "name"), Value::from("Unknown Product"));
        assert_eq!(get(entry, "price"), Value::Number(0.0));
    }

    #[test]
    fn test_add_does_not_mutate_inputs() {
        let cart = val!([{ "id": 1, "name": "Apple", "price": 0.5, "quantity": 1 }]);
        add_to_cart(&apple(), &cart).unwrap();
        assert_eq!(
            get(&cart.as_array().unwrap()[0], "quantity"),
            Value::Number(1.0)
        );
    }

    #[test]
    fn test_interact_adjusts_quantity_and_total() {
        let cart = val!([{ "id": 1, "price": 10.99, "quantity": 1 }]);
        let view = interact_with_cart(&cart, &Value::from(1.0), &Value::from(2.0)).unwrap();
        assert_eq!(
            get(&view.cart_items.as_array().unwrap()[0], "quantity"),
            Value::Number(3.0)
        );
        assert!((view.total_price - 32.97).abs() < 1e-9);
    }

    #[test]
    fn test_interact_drops_item_at_zero() {
        let cart = val!([{ "id": 1, "price": 10.99, "quantity": 3 }]);
        let view = interact_with_cart(&cart, &Value::from(1.0), &Value::from(-3.0)).unwrap();
        assert_eq!(view.cart_items, val!([]));
        assert_eq!(view.total_price, 0.0);
    }

    #[test]
    fn test_interact_with_unknown_product_only_totals() {
        let cart = val!([{ "id": 1, "price": 2.0, "quantity": 2 }]);
        let view = interact_with_cart(&cart, &Value::from(9.0), &Value::from(1.0)).unwrap();
        assert_eq!(view.cart_items, cart);
        assert_eq!(view.total_price, 4.0);
    }

    #[test]
    fn test_interact_on_empty_cart() {
        let view = interact_with_cart(&val!([]), &Value::from(1.0), &Value::from(1.0)).unwrap();
        assert_eq!(view.cart_items, val!([]));
        assert_eq!(view.total_price, 0.0);
    }
}
