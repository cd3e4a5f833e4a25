//! Lenient scalar coercions. Every numeric or string field read from an
//! untrusted payload goes through one of these.

use serde_json::Value;

use crate::model::EmployeeId;

/// Numeric reading of a JSON scalar. `None` stands for "not a number".
fn as_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok()
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}

pub(crate) fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !*b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Ids must be non-zero integers. Zero, NaN, fractions and anything that does
/// not read as a number are rejected.
pub fn coerce_id(v: Option<&Value>) -> Option<EmployeeId> {
    let f = as_number(v?)?;
    if !f.is_finite() || f == 0.0 || f.fract() != 0.0 {
        return None;
    }
    if f < i64::MIN as f64 || f >= i64::MAX as f64 {
        return None;
    }
    Some(EmployeeId(f as i64))
}

/// Report counts: missing, non-numeric, negative or non-finite values read as
/// 0; fractions are truncated.
pub fn coerce_count(v: Option<&Value>) -> u64 {
    match v.and_then(as_number) {
        Some(f) if f.is_finite() && f > 0.0 => f.trunc().min(u64::MAX as f64) as u64,
        _ => 0,
    }
}

/// String form of a scalar. Arrays and objects have none.
pub(crate) fn stringify_scalar(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Optional display field: falsy values are absent, other scalars are
/// stringified.
pub fn coerce_optional_string(v: Option<&Value>) -> Option<String> {
    let v = v?;
    if is_falsy(v) {
        return None;
    }
    stringify_scalar(v)
}
