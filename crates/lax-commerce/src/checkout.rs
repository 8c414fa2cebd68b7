//! Checkout, payment, and order confirmation.
//!
//! The payment collaborator answers with a `"<amount> <currency-code>"`
//! string; parsing that pair is the only contract relied on here.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use lax_core::{ceil, filter, get, get_or, map, to_f64, to_number, to_text, val, Value};

use crate::cart::cart_total;
use crate::error::CommerceError;

/// The order summary a buyer accepts at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub cart_items: Value,
    /// Cart total rounded up to cents.
    pub total_price: f64,
    pub payment_info: Value,
}

/// Ledger entry for one processed payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub amount: f64,
    pub currency: String,
    pub status: String,
    /// RFC 3339 processing time.
    pub timestamp: String,
    pub payment_info: Value,
}

/// What the buyer is told after paying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub message: String,
    pub items_paid_for: Vec<String>,
    pub contact_method: String,
    pub contact_address: String,
}

/// A processed payment: the ledger side and the buyer side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub transaction: TransactionRecord,
    pub receipt: PaymentReceipt,
}

/// Confirmation shown once the order is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationDetails {
    pub confirmation_message: String,
    pub contact_method: String,
    pub contact_address: String,
    pub payment_status: String,
    pub ordered_items: Value,
}

/// Total the cart and round up to cents.
pub fn checkout(cart: &Value, payment_info: &Value) -> Result<OrderConfirmation, CommerceError> {
    let total = cart_total(cart)?;
    let rounded = to_f64(&ceil(&to_number(&Value::from(total)), 2));
    tracing::debug!(total = rounded, "checkout");
    Ok(OrderConfirmation {
        cart_items: cart.clone(),
        total_price: rounded,
        payment_info: payment_info.clone(),
    })
}

/// Process a payment collaborator response.
///
/// The amount is the response's first token, loosely coerced; the currency
/// code is the second token (`EUR` when absent). An unparseable amount
/// surfaces as `NaN` in the record rather than failing the flow.
pub fn make_payment(
    payment_info: &Value,
    payment_response: &str,
) -> Result<PaymentOutcome, CommerceError> {
    let mut tokens = payment_response.split_whitespace();
    let amount = to_f64(&to_number(&Value::from(tokens.next().unwrap_or_default())));
    let currency = tokens.next().unwrap_or("EUR").to_string();

    let transaction = TransactionRecord {
        amount,
        currency: currency.clone(),
        status: "successful".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        payment_info: payment_info.clone(),
    };

    let response_tokens = Value::array(
        payment_response
            .split(' ')
            .map(Value::from)
            .collect::<Vec<_>>(),
    );
    let numeric = Value::function(|args| {
        let token = args[0].as_str().unwrap_or_default();
        Ok(Value::Bool(
            !token.trim().is_empty() && !to_f64(&args[0]).is_nan(),
        ))
    });
    let paid_items = filter(&response_tokens, &numeric)?;
    let items_paid_for = paid_items
        .as_array()
        .unwrap_or_default()
        .iter()
        .map(to_text)
        .collect();

    let receipt = PaymentReceipt {
        message: format!(
            "Your payment of {} {} was successful.",
            to_text(&Value::from(amount)),
            currency
        ),
        items_paid_for,
        contact_method: "SMS".to_string(),
        contact_address: to_text(&get(payment_info, "phone_number")),
    };

    tracing::debug!(amount, %currency, "payment processed");
    Ok(PaymentOutcome {
        transaction,
        receipt,
    })
}

/// Build the placed-order confirmation, listing the ordered item names.
pub fn confirm_order_placement(
    order_details: &Value,
    payment_info: &Value,
) -> Result<ConfirmationDetails, CommerceError> {
    let items = get_or(order_details, "items", val!([]));
    let name_of = Value::function(|args| Ok(get(&args[0], "name")));
    let ordered_items = map(&items, &name_of)?;

    Ok(ConfirmationDetails {
        confirmation_message: "Your order has been successfully placed!".to_string(),
        contact_method: "SMS".to_string(),
        contact_address: to_text(&get(payment_info, "phone_number")),
        payment_status: "Payment successful".to_string(),
        ordered_items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment_info() -> Value {
        val!({ "phone_number": "+3912345678", "method": "card" })
    }

    #[test]
    fn test_checkout_rounds_total_up_to_cents() {
        let cart = val!([
            { "price": 10.99, "quantity": 2 },
            { "price": 15.99, "quantity": 1 }
        ]);
        let confirmation = checkout(&cart, &payment_info()).unwrap();
        assert_eq!(confirmation.total_price, 37.97);
        assert_eq!(confirmation.cart_items, cart);
    }

    #[test]
    fn test_checkout_empty_cart() {
        let confirmation = checkout(&val!([]), &payment_info()).unwrap();
        assert_eq!(confirmation.total_price, 0.0);
    }

    #[test]
    fn test_make_payment_parses_amount_and_currency() {
        let outcome = make_payment(&payment_info(), "25.50 EUR").unwrap();
        assert_eq!(outcome.transaction.amount, 25.5);
        assert_eq!(outcome.transaction.currency, "EUR");
        assert_eq!(outcome.transaction.status, "successful");
        assert_eq!(
            outcome.receipt.message,
            "Your payment of 25.5 EUR was successful."
        );
        assert_eq!(outcome.receipt.items_paid_for, vec!["25.50"]);
        assert_eq!(outcome.receipt.contact_method, "SMS");
        assert_eq!(outcome.receipt.contact_address, "+3912345678");
    }

    #[test]
    fn test_make_payment_defaults_currency() {
        let outcome = make_payment(&payment_info(), "10").unwrap();
        assert_eq!(outcome.transaction.currency, "EUR");
        assert_eq!(outcome.transaction.amount, 10.0);
    }

    #[test]
    fn test_make_payment_unparseable_amount_is_nan() {
        let outcome = make_payment(&payment_info(), "oops EUR").unwrap();
        assert!(outcome.transaction.amount.is_nan());
        assert!(outcome.receipt.items_paid_for.is_empty());
    }

    #[test]
    fn test_make_payment_timestamp_is_rfc3339() {
        let outcome = make_payment(&payment_info(), "5 EUR").unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&outcome.transaction.timestamp).is_ok());
    }

    #[test]
    fn test_confirm_order_placement_lists_item_names() {
        let order = val!({
            "items": [{ "name": "Apple" }, { "name": "Banana" }]
        });
        let details = confirm_order_placement(&order, &payment_info()).unwrap();
        assert_eq!(details.ordered_items, val!(["Apple", "Banana"]));
        assert_eq!(details.payment_status, "Payment successful");
        assert_eq!(details.contact_address, "+3912345678");
    }

    #[test]
    fn test_confirm_order_placement_without_items() {
        let details = confirm_order_placement(&val!({}), &payment_info()).unwrap();
        assert_eq!(details.ordered_items, val!([]));
    }
}
