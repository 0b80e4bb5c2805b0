//! Error types for the sanitization pipeline
//!
//! Neither type ever reaches a caller of [`crate::sanitize`]:
//! - [`DecodeError`]: the whole payload was unusable, mapped to zero operations
//! - [`RejectReason`]: one candidate was dropped, the rest keep going
//!
//! Both surface only through [`crate::SanitizeReport`] and logs.

use drawops_model::OpKind;
use serde::Serialize;

/// Why a payload produced no candidate list
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Nothing left after fence stripping
    #[error("response is empty")]
    Empty,

    /// Neither the text nor its `{...}` span parsed as JSON
    #[error("invalid json: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Top-level value is neither an object nor a list
    #[error("unexpected top-level {found}, expected an object or a list")]
    UnexpectedShape { found: &'static str },

    /// `operations`/`ops` key missing or not a list
    #[error("operations list not found: {key} is {found}")]
    MissingOperations { key: &'static str, found: &'static str },
}

impl DecodeError {
    /// Create missing-operations error
    pub(crate) fn missing_operations(key: &'static str, found: &'static str) -> Self {
        Self::MissingOperations { key, found }
    }
}

/// Why one candidate operation was dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// Candidate is not a JSON object
    #[error("candidate is {found}, expected an object")]
    NotAnObject { found: &'static str },

    /// Neither `op` nor `kind` holds a string
    #[error("missing op discriminator")]
    MissingDiscriminator,

    /// Discriminator names no known operation
    #[error("unknown operation kind: '{value}'")]
    UnknownKind { value: String },

    /// Per-kind cap already reached
    #[error("{kind} cap of {cap} reached")]
    KindCapReached { kind: OpKind, cap: usize },

    /// Batch total already reached
    #[error("total cap of {cap} reached")]
    TotalCapReached { cap: usize },

    /// Required field absent or mistyped
    #[error("{kind} requires {field}")]
    MissingField { kind: OpKind, field: &'static str },

    /// Enumerated field holds an unknown value
    #[error("{kind} has invalid {field}: '{value}'")]
    InvalidVariant {
        kind: OpKind,
        field: &'static str,
        value: String,
    },

    /// Block index is not a non-negative integer
    #[error("{kind} has invalid {field} index: {detail}")]
    InvalidIndex {
        kind: OpKind,
        field: &'static str,
        detail: String,
    },

    /// Block index names no accepted block
    #[error("{kind} {field} index {index} out of range for {blocks} accepted blocks")]
    IndexOutOfRange {
        kind: OpKind,
        field: &'static str,
        index: usize,
        blocks: usize,
    },

    /// Stroke path kept too few points
    #[error("stroke path has {found} valid points, needs {required}")]
    TooFewPoints { found: usize, required: usize },
}

impl RejectReason {
    /// Create invalid-index error
    pub(crate) fn invalid_index(kind: OpKind, field: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidIndex {
            kind,
            field,
            detail: detail.into(),
        }
    }

    /// Create invalid-variant error
    pub(crate) fn invalid_variant(kind: OpKind, field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidVariant {
            kind,
            field,
            value: value.into(),
        }
    }
}

/// JSON type name for diagnostics
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
