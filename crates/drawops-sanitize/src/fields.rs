//! Typed field readers over untrusted JSON objects
//!
//! Numeric fields are strict: only JSON numbers count. Block indices on
//! arrows are the one place a string or float is coerced.

use serde_json::{Map, Value};

pub(crate) type Object = Map<String, Value>;

/// Saturate into `[0, 1]`; NaN has no position
pub(crate) fn clamp_unit(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(0.0, 1.0))
    }
}

/// JSON number as `f64`; literals beyond the `f64` range saturate to ±∞
pub(crate) fn number(value: &Value) -> Option<f64> {
    let Value::Number(n) = value else {
        return None;
    };
    n.as_f64().or_else(|| n.to_string().parse().ok())
}

/// Normalized coordinate, clamped, or `None` when absent or non-numeric
pub(crate) fn unit_interval(obj: &Object, key: &str) -> Option<f64> {
    obj.get(key).and_then(number).and_then(clamp_unit)
}

/// Finite number, unclamped
pub(crate) fn finite_number(obj: &Object, key: &str) -> Option<f64> {
    obj.get(key)
        .and_then(number)
        .filter(|v| v.is_finite())
}

/// Owned string field
pub(crate) fn string(obj: &Object, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Non-negative JSON integer, no coercion
pub(crate) fn strict_index(obj: &Object, key: &str) -> Option<usize> {
    obj.get(key)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
}

/// Why a value could not become a block index
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum IndexError {
    Missing,
    Negative(i64),
    NotInteger(String),
}

impl IndexError {
    pub(crate) fn detail(&self) -> String {
        match self {
            IndexError::Missing => "missing".to_string(),
            IndexError::Negative(v) => format!("{v} is negative"),
            IndexError::NotInteger(v) => format!("{v} is not an integer"),
        }
    }
}

/// Coerce a block index
///
/// Accepts JSON integers, finite floats (truncated toward zero) and strings
/// holding an integer. The result must be non-negative.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn coerce_index(value: Option<&Value>) -> Result<usize, IndexError> {
    let signed = match value {
        None | Some(Value::Null) => return Err(IndexError::Missing),
        Some(value @ Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                return usize::try_from(v).map_err(|_| IndexError::NotInteger(n.to_string()));
            }
            if let Some(v) = n.as_i64() {
                v
            } else {
                match number(value) {
                    Some(f) if f.is_finite() => f.trunc() as i64,
                    _ => return Err(IndexError::NotInteger(n.to_string())),
                }
            }
        }
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| IndexError::NotInteger(format!("{s:?}")))?,
        Some(other) => return Err(IndexError::NotInteger(other.to_string())),
    };

    if signed < 0 {
        return Err(IndexError::Negative(signed));
    }
    usize::try_from(signed).map_err(|_| IndexError::NotInteger(signed.to_string()))
}
