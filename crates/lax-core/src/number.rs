//! Numeric coercion and tolerant arithmetic: `to_number`, `add`, `ceil`.
//!
//! Coercion failure is represented by `NaN`, never by an error value.

use crate::value::{Key, Value};

/// Coerce a value to a number.
///
/// - `null` → `0`, `undefined` → `NaN`, booleans → `0`/`1`.
/// - Strings are trimmed and parsed: decimal and scientific notation, plus
///   `0x`/`0b`/`0o` prefixed literals (prefix and hex digits
///   case-insensitive). A sign in front of a prefixed literal is malformed
///   and yields `NaN`; the empty string yields `0`.
/// - An object with a callable `valueOf` entry converts through it. If the
///   entry exists but is not callable, the object passes through unchanged
///   (non-numeric). Objects without `valueOf`, arrays, maps, sets,
///   functions, and symbols yield `NaN`.
///
/// ```
/// use lax_core::{to_number, Value};
/// assert_eq!(to_number(&Value::from("0x1A")), Value::Number(26.0));
/// assert_eq!(to_number(&Value::Null), Value::Number(0.0));
/// ```
pub fn to_number(value: &Value) -> Value {
    match value {
        Value::Number(_) => value.clone(),
        Value::Bool(b) => Value::Number(if *b { 1.0 } else { 0.0 }),
        Value::Null => Value::Number(0.0),
        Value::Undefined => Value::Number(f64::NAN),
        Value::String(s) => Value::Number(parse_numeric(s)),
        Value::Object(map) => match map.get(&Key::from("valueOf")) {
            Some(Value::Function(f)) => match f.call(&[]) {
                Ok(converted) if !matches!(converted, Value::Object(_)) => to_number(&converted),
                // valueOf handing back another object, or failing, is a
                // coercion failure
                _ => Value::Number(f64::NAN),
            },
            // conversion explicitly disabled: pass the object through
            Some(_) => value.clone(),
            None => Value::Number(f64::NAN),
        },
        _ => Value::Number(f64::NAN),
    }
}

/// Coerce to a plain `f64`, mapping non-numeric results to `NaN`.
pub fn to_f64(value: &Value) -> f64 {
    match to_number(value) {
        Value::Number(n) => n,
        _ => f64::NAN,
    }
}

/// Tolerant addition.
///
/// `undefined` operands are treated as `0` (special-cased: plain
/// `to_number(undefined)` is `NaN`); everything else is coerced before
/// summation.
pub fn add(a: &Value, b: &Value) -> Value {
    let x = if a.is_undefined() { 0.0 } else { to_f64(a) };
    let y = if b.is_undefined() { 0.0 } else { to_f64(b) };
    Value::Number(x + y)
}

/// Precision is clamped to the largest exponent shift that stays
/// representable.
const MAX_PRECISION: i32 = 292;

/// Round up to `precision` decimal digits (negative precision rounds to
/// tens, hundreds, ...).
///
/// The operand is coerced first, so `null` ceils to `0` and a non-numeric
/// string to `NaN`. `NaN` and the infinities propagate unchanged, as do
/// magnitudes at or beyond `1e21` (outside the safe scaling range).
///
/// Scaling routes through exponential-notation string formatting instead of
/// naive multiplication, which would drift (`1.005 * 100 == 100.49999...`).
pub fn ceil(value: &Value, precision: i32) -> Value {
    let n = to_f64(value);
    if n.is_nan() || n.is_infinite() || n.abs() >= 1e21 {
        return Value::Number(n);
    }
    let precision = precision.clamp(-MAX_PRECISION, MAX_PRECISION);
    if precision == 0 {
        return Value::Number(n.ceil());
    }
    let shifted = shift_exponent(n, precision).ceil();
    Value::Number(shift_exponent(shifted, -precision))
}

/// Multiply by `10^by` exactly, by rewriting the decimal exponent of the
/// shortest string representation.
fn shift_exponent(n: f64, by: i32) -> f64 {
    let repr = format!("{:e}", n);
    match repr.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            format!("{}e{}", mantissa, exp + by)
                .parse()
                .unwrap_or(f64::NAN)
        }
        None => f64::NAN,
    }
}

fn parse_numeric(text: &str) -> f64 {
    let t = text.trim();
    if t.is_empty() {
        return 0.0;
    }
    // A leading sign before a radix prefix is malformed ("-0x14" is NaN).
    if let Some(rest) = t.strip_prefix(['+', '-']) {
        let lower = rest.get(..2).unwrap_or("");
        if matches!(lower, "0x" | "0X" | "0b" | "0B" | "0o" | "0O") {
            return f64::NAN;
        }
    }
    if let Some(digits) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        return parse_radix(digits, 16);
    }
    if let Some(digits) = t.strip_prefix("0b").or_else(|| t.strip_prefix("0B")) {
        return parse_radix(digits, 2);
    }
    if let Some(digits) = t.strip_prefix("0o").or_else(|| t.strip_prefix("0O")) {
        return parse_radix(digits, 8);
    }
    parse_decimal(t)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    u128::from_str_radix(digits, radix)
        .map(|n| n as f64)
        .unwrap_or(f64::NAN)
}

fn parse_decimal(t: &str) -> f64 {
    let (negative, magnitude) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };
    // Rust's float parser accepts "inf"/"infinity"/"nan" in any case; the
    // loose grammar only admits the exact spelling "Infinity".
    if magnitude.eq_ignore_ascii_case("inf") || magnitude.eq_ignore_ascii_case("infinity") {
        if magnitude == "Infinity" {
            return if negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
        }
        return f64::NAN;
    }
    if magnitude.eq_ignore_ascii_case("nan") {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}
