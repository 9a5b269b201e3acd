//! Decoding of gateway response bodies.
//!
//! A body is either a failure (`{"error": ..., "code": ...}` with a non-empty
//! `error`) or an arbitrary success payload. Emptiness follows the gateway's
//! loose rules: `null`, `false`, `0`, `""`, `"0"`, `[]` and `{}` all count as empty.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::constants::TOKEN_EXPIRED;

/// Error body reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiFailure {
    #[serde(deserialize_with = "non_empty_text")]
    pub error: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub code: String,
}

impl ApiFailure {
    /// Exact match against the expired-token sentinel pair.
    pub fn is_token_expired(&self) -> bool {
        (self.code.as_str(), self.error.as_str()) == TOKEN_EXPIRED
    }
}

/// A decoded, non-empty response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Failure(ApiFailure),
    Success(Value),
}

impl ApiResponse {
    /// Decode a raw body. `None` when the body is not JSON (including invalid UTF-8) or is empty.
    pub fn decode(body: impl AsRef<[u8]>) -> Option<Self> {
        let value: Value = serde_json::from_slice(body.as_ref()).unwrap_or(Value::Null);
        if is_empty_value(&value) {
            return None;
        }
        // Derived structs also accept sequences; only objects can carry an error.
        if !value.is_object() {
            return Some(Self::Success(value));
        }
        serde_json::from_value(value).ok()
    }
}

/// Loose emptiness check applied to whole bodies and to the `error` field.
pub(crate) fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn text_of(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn non_empty_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if is_empty_value(&value) {
        return Err(D::Error::custom("empty error field"));
    }
    Ok(text_of(value))
}

fn loose_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Value::deserialize(deserializer).map(text_of)
}
