//! Lenient JSON decoding
//!
//! Strict parse first; if that fails, retry on the span between the first
//! `{` and the last `}` to shed commentary the model added around the
//! object. The decoded value must then carry the candidate list.

use crate::error::{json_type_name, DecodeError};
use serde_json::Value;

/// Key holding the candidate list
pub const OPERATIONS_KEY: &str = "operations";

/// Legacy alias for [`OPERATIONS_KEY`]
pub const LEGACY_OPS_KEY: &str = "ops";

/// Decode fence-stripped text into a JSON value
///
/// # Errors
/// Returns [`DecodeError::Empty`] for blank input and
/// [`DecodeError::InvalidJson`] (carrying the strict parse error) when
/// neither strategy parses.
pub fn decode_payload(text: &str) -> Result<Value, DecodeError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }

    let strict_err = match serde_json::from_str::<Value>(text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    match object_span(text) {
        Some(span) => serde_json::from_str(span).map_err(|_| DecodeError::InvalidJson(strict_err)),
        None => Err(DecodeError::InvalidJson(strict_err)),
    }
}

/// Pull the candidate list out of a decoded payload
///
/// An object contributes its `operations` value when that key is present,
/// otherwise its `ops` value; a bare list is the candidate list itself.
///
/// # Errors
/// Returns error for any other shape
pub fn extract_candidates(payload: Value) -> Result<Vec<Value>, DecodeError> {
    match payload {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            let key = if map.contains_key(OPERATIONS_KEY) {
                OPERATIONS_KEY
            } else {
                LEGACY_OPS_KEY
            };
            match map.remove(key) {
                Some(Value::Array(items)) => Ok(items),
                Some(other) => Err(DecodeError::missing_operations(key, json_type_name(&other))),
                None => Err(DecodeError::missing_operations(OPERATIONS_KEY, "absent")),
            }
        }
        other => Err(DecodeError::UnexpectedShape {
            found: json_type_name(&other),
        }),
    }
}

/// Decode text straight to the candidate list
///
/// # Errors
/// Returns error if either [`decode_payload`] or [`extract_candidates`] fails
pub fn decode_candidates(text: &str) -> Result<Vec<Value>, DecodeError> {
    extract_candidates(decode_payload(text)?)
}

/// Span from the first `{` to the last `}`, inclusive
fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
