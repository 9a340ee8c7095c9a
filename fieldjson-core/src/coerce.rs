//! Scalar coercion rules shared by the marshal cast path and scalar
//! hydration.
//!
//! Conversions are deliberately lenient, matching loose host-language
//! casts rather than strict parsing: numeric strings parse by prefix,
//! whole-number floats truncate, and booleans follow truthiness with
//! `""` and `"0"` false. Feeding a collection into a string or numeric
//! target is a type mismatch.

use serde_json::{Number, Value};

use fieldjson_model::Kind;

use crate::error::{Error, Result};

/// Coerces a wire value to a scalar target kind.
///
/// `record` and `field` only feed error messages. A non-scalar target
/// is a configuration error.
pub(crate) fn coerce(record: &str, field: &str, value: &Value, target: Kind) -> Result<Value> {
    match target {
        Kind::String => to_string_value(record, field, value),
        Kind::Integer => to_integer_value(record, field, value),
        Kind::Float => to_float_value(record, field, value),
        Kind::Boolean => Ok(Value::Bool(truthy(value))),
        _ => Err(Error::configuration(
            record,
            field,
            format!("unable to handle serializing to {target:?}"),
        )),
    }
}

fn to_string_value(record: &str, field: &str, value: &Value) -> Result<Value> {
    match value {
        Value::Null => Ok(Value::String(String::new())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::String(s) => Ok(Value::String(s.clone())),
        other => Err(Error::mismatch(record, field, Kind::String, Kind::of(other))),
    }
}

fn to_integer_value(record: &str, field: &str, value: &Value) -> Result<Value> {
    let out = match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(u) = n.as_u64() {
                i64::try_from(u).unwrap_or(i64::MAX)
            } else {
                // truncating conversion; saturates at the i64 bounds
                n.as_f64().unwrap_or(0.0) as i64
            }
        }
        Value::String(s) => int_prefix(s),
        other => {
            return Err(Error::mismatch(
                record,
                field,
                Kind::Integer,
                Kind::of(other),
            ));
        }
    };
    Ok(Value::from(out))
}

fn to_float_value(record: &str, field: &str, value: &Value) -> Result<Value> {
    let out = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => float_prefix(s),
        other => {
            return Err(Error::mismatch(record, field, Kind::Float, Kind::of(other)));
        }
    };
    Ok(Number::from_f64(out)
        .map(Value::Number)
        .unwrap_or(Value::Null))
}

/// Truthiness of any wire value: null, `false`, numeric zero, `""`,
/// `"0"`, and empty collections are false; everything else is true.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i != 0
            } else if let Some(u) = n.as_u64() {
                u != 0
            } else {
                n.as_f64().is_some_and(|f| f != 0.0)
            }
        }
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}

/// Base-10 integer parse of a string's leading integer, ignoring any
/// trailing garbage. No digits yields 0; overflow saturates.
fn int_prefix(text: &str) -> i64 {
    let t = text.trim();
    let (negative, rest) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return 0;
    }
    match rest[..end].parse::<i64>() {
        Ok(v) => {
            if negative {
                -v
            } else {
                v
            }
        }
        Err(_) => {
            if negative {
                i64::MIN
            } else {
                i64::MAX
            }
        }
    }
}

/// Floating-point parse of a string's leading number, ignoring any
/// trailing garbage. No digits yields 0.0.
fn float_prefix(text: &str) -> f64 {
    let t = text.trim();
    let bytes = t.as_bytes();
    let mut end = 0;
    let mut saw_digit = false;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        saw_digit = true;
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            saw_digit = true;
            frac_end += 1;
        }
        if frac_end > end + 1 || saw_digit {
            end = frac_end;
        }
    }
    if !saw_digit {
        return 0.0;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digit_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digit_start {
            end = exp_end;
        }
    }
    t[..end].parse::<f64>().unwrap_or(0.0)
}
