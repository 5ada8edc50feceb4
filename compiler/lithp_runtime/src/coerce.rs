//! Coercion table for value variants.
//!
//! | from \ to | Integer        | Float   | String | Atom |
//! |-----------|----------------|---------|--------|------|
//! | Integer   | self           | numeric | text   | -    |
//! | Float     | trunc toward 0 | self    | text   | -    |
//! | String    | parse          | parse   | self   | -    |
//! | Atom      | id             | -       | name   | self |
//!
//! String parsing accepts finite decimal text only.
//! Nothing coerces into an Atom; atoms come only from an atom table.
//! Containers coerce to their own type and nothing else, handled in
//! `Object::coerce`.

use lithp_ir::TypeTag;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::errors::{cannot_coerce, parse_failure, RuntimeResult};
use crate::object::Value;

/// Returns `true` if the table defines a conversion from `value` to `target`.
pub(crate) fn can_coerce(value: &Value, target: TypeTag) -> bool {
    match (value, target) {
        (Value::Integer(_), TypeTag::Integer | TypeTag::Float | TypeTag::String)
        | (Value::Float(_), TypeTag::Float | TypeTag::Integer | TypeTag::String)
        | (Value::String(_), TypeTag::String | TypeTag::Integer | TypeTag::Float)
        | (Value::Atom(_), TypeTag::Atom | TypeTag::Integer | TypeTag::String) => true,
        _ => false,
    }
}

/// Convert `value` to `target` per the table.
pub(crate) fn coerce(value: &Value, target: TypeTag) -> RuntimeResult<Value> {
    let from = value.type_tag();
    if from == target {
        return Ok(value.clone());
    }
    match (value, target) {
        (Value::Integer(n), TypeTag::Float) => n
            .to_f64()
            .filter(|f| f.is_finite())
            .map(Value::Float)
            .ok_or_else(|| cannot_coerce(from, target)),
        (Value::Integer(n), TypeTag::String) => Ok(Value::string(&n.to_string())),
        (Value::Float(f), TypeTag::Integer) => truncate_float(*f)
            .map(Value::integer)
            .ok_or_else(|| cannot_coerce(from, target)),
        (Value::Float(f), TypeTag::String) => Ok(Value::string(&format_float(*f))),
        (Value::String(s), TypeTag::Integer) => parse_integer(s).map(Value::integer),
        (Value::String(s), TypeTag::Float) => parse_float(s).map(Value::Float),
        (Value::Atom(a), TypeTag::Integer) => Ok(Value::integer(BigInt::from(a.id().index()))),
        (Value::Atom(a), TypeTag::String) => Ok(Value::string(a.name())),
        _ => Err(cannot_coerce(from, target)),
    }
}

/// Decimal text of a float, as used for String coercion and rendering.
pub fn format_float(f: f64) -> String {
    f.to_string()
}

/// Float to integer, truncating toward zero. `None` for NaN and infinities.
fn truncate_float(f: f64) -> Option<BigInt> {
    if f.is_finite() {
        BigInt::from_f64(f.trunc())
    } else {
        None
    }
}

/// Parse an optionally signed run of ASCII digits.
///
/// Surrounding whitespace, digit separators and radix prefixes are
/// rejected.
fn parse_integer(text: &str) -> RuntimeResult<BigInt> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(parse_failure(text, TypeTag::Integer));
    }
    text.parse::<BigInt>()
        .map_err(|_| parse_failure(text, TypeTag::Integer))
}

/// Parse decimal (or exponent) float text using Rust's `f64` grammar.
///
/// Only finite results are accepted: `inf`, `NaN` and literals that
/// overflow to infinity fail like any other malformed text.
fn parse_float(text: &str) -> RuntimeResult<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .ok_or_else(|| parse_failure(text, TypeTag::Float))
}
