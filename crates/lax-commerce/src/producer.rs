//! Producer-side flows: sign-in, product intake, and persistence.
//!
//! Credentials and the product database come in as explicit parameters;
//! nothing here reads ambient state. Boundary functions follow the
//! validate-catch-report convention: internal failures become a structured
//! `{ success: false, message }` instead of propagating.

use serde::{Deserialize, Serialize};

use lax_core::{
    add, assoc, capitalize, compact, eq, filter, get, get_or, is_array_like_object, to_f64,
    to_text, Value,
};

use crate::db::Database;
use crate::outcome::{Outcome, Validation};

/// [`Outcome`] of a product addition, carrying the new database value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAddition {
    pub success: bool,
    pub message: String,
    pub database: Value,
}

/// Check a producer's email and password against the credential list.
///
/// Matching is strict: a numeric password does not match its string form.
pub fn producer_login(email: &Value, password: &Value, credentials: &Value) -> Outcome {
    if !email.is_truthy() || !password.is_truthy() {
        return Outcome::fail("Invalid credentials");
    }

    let email = email.clone();
    let password = password.clone();
    let matches = Value::function(move |args| {
        let cred = &args[0];
        Ok(Value::Bool(
            eq(&get(cred, "email"), &email) && eq(&get(cred, "password"), &password),
        ))
    });
    match filter(credentials, &matches) {
        Ok(found) if !found.as_array().unwrap_or_default().is_empty() => {
            tracing::debug!("producer login accepted");
            Outcome::ok("Login successful. Access granted.")
        }
        Ok(_) => Outcome::fail("Invalid credentials"),
        Err(err) => {
            tracing::debug!(%err, "login check failed");
            Outcome::fail("Invalid credentials")
        }
    }
}

/// Add a product to the database value, returning the new database.
///
/// The stored product keeps the submitted attributes with a capitalized
/// name, a numeric price, and quantity seeded at one; blank entries are
/// compacted out of the database on the way.
pub fn add_new_product(product_info: &Value, database: &Value) -> ProductAddition {
    let required_present = ["name", "category", "price"]
        .iter()
        .all(|field| get(product_info, *field).is_truthy());
    if !required_present {
        return ProductAddition {
            success: false,
            message: "Missing required fields.".to_string(),
            database: database.clone(),
        };
    }

    let name = capitalize(&to_text(&get(product_info, "name")));
    let price = to_f64(&get(product_info, "price"));
    let product = assoc(product_info, "name", Value::from(name));
    let product = assoc(&product, "price", Value::from(price));
    let product = assoc(
        &product,
        "quantity",
        add(&Value::from(0.0), &Value::from(1.0)),
    );

    let mut records: Vec<Value> = compact(database)
        .as_array()
        .unwrap_or_default()
        .to_vec();
    records.push(product);

    ProductAddition {
        success: true,
        message: "Product added successfully.".to_string(),
        database: Value::array(records),
    }
}

/// Accept or reject a transmitted product payload on field truthiness.
pub fn request_transmission(product_data: &Value) -> Outcome {
    let complete = ["name", "description", "category", "price"]
        .iter()
        .all(|field| get(product_data, *field).is_truthy());
    if complete {
        Outcome::ok("Product added to the database.")
    } else {
        Outcome::fail("Invalid product data.")
    }
}

/// Validate a product submission: required fields, a positive numeric
/// price, and array-shaped categories.
pub fn validate_product_info(product_info: &Value) -> Validation {
    let required_present = ["name", "description", "category", "price"]
        .iter()
        .all(|field| get(product_info, *field).is_truthy());
    if !required_present {
        return Validation::fail("Required fields cannot be empty.");
    }

    match get(product_info, "price") {
        Value::Number(n) if !n.is_nan() && n > 0.0 => {}
        _ => return Validation::fail("Price should be a valid number greater than 0."),
    }

    if !is_array_like_object(&get(product_info, "category")) {
        return Validation::fail("Categories should be an array-like object.");
    }

    Validation::ok("Product information is valid.")
}

/// Bump the record's quantity and hand it to the database collaborator.
/// Returns the record as inserted.
pub fn add_product_to_database(product_details: &Value, db: &mut dyn Database) -> Value {
    let record = assoc(
        product_details,
        "quantity",
        add(&get(product_details, "quantity"), &Value::from(1.0)),
    );
    db.insert("products", record.clone());
    record
}

/// The name shown in the addition confirmation.
pub fn show_product_addition_confirmation(product_details: &Value) -> String {
    to_text(&get_or(
        product_details,
        "name",
        Value::from("New Product"),
    ))
}
