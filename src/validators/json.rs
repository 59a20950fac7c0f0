//! Strict JSON decoding for JSON-shaped flags.
//!
//! Flags such as `--tables-list` and `--source-conn` are kept as raw strings
//! by the grammar and decoded here by whichever assembly step consumes them.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// A flag value that is not valid JSON, or not JSON of the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid JSON '{value}': {reason}")]
pub struct JsonArgError {
    /// The original argument string
    pub value: String,
    /// The decoder's explanation
    pub reason: String,
}

/// Decode an argument as JSON, returning the decoded structure unchanged.
pub fn get_json_arg(raw: &str) -> Result<Value, JsonArgError> {
    decode_json_arg(raw)
}

/// Decode an argument straight into a typed structure.
///
/// Shape mismatches (an object where a list was expected) are reported the
/// same way as syntax errors.
pub fn decode_json_arg<T: DeserializeOwned>(raw: &str) -> Result<T, JsonArgError> {
    serde_json::from_str(raw).map_err(|e| JsonArgError {
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
