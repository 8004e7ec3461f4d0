//! Structured payload values exchanged with the agent
//!
//! Request params and decoded response bodies have no fixed schema, so they
//! are carried as [`serde_json::Value`] trees. Map key order is preserved
//! end to end (`serde_json` with `preserve_order`).

use serde_json::Value;

/// Arbitrary structured payload submitted to or decoded from the agent.
pub type Payload = Value;

/// Normalize every map key in a decoded payload to its canonical in-process
/// form (ASCII lower case), recursing through nested maps and sequences.
///
/// Only the case of key identifiers changes; values, key order, and nesting
/// are carried through untouched.
#[must_use]
pub fn canonicalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter().map(|(key, value)| (key.to_ascii_lowercase(), canonicalize_keys(value))).collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize_keys).collect()),
        other => other,
    }
}

/// Extract the human-readable message from an error response body.
///
/// Attempts to parse the body as JSON and read its `message` field; falls
/// back to the raw body text when parsing fails or the field is absent.
#[must_use]
pub fn response_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|parsed| parsed.get("message").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.to_owned())
}
