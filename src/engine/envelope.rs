/// Top-level classification of raw input
///
/// Turns raw text into a single request candidate or a batch of them. A
/// document that does not parse, or an empty batch, short-circuits the whole
/// pipeline with exactly one error envelope.

use serde_json::Value;

use crate::protocol::{ErrorObject, ResponseEnvelope};

/// The shape of a successfully parsed input
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// One candidate; the reply is a single envelope
    Single(Value),
    /// A non-empty array of candidates; the reply is an array
    Batch(Vec<Value>),
}

/// Parse and classify raw input
pub fn classify(raw: &str) -> Result<Envelope, ResponseEnvelope> {
    classify_slice(raw.as_bytes())
}

/// Parse and classify raw bytes. Input that is not UTF-8 is a parse error.
pub fn classify_slice(raw: &[u8]) -> Result<Envelope, ResponseEnvelope> {
    let value: Value = serde_json::from_slice(raw)
        .map_err(|e| ResponseEnvelope::error(None, ErrorObject::parse_error(e.to_string())))?;

    match value {
        Value::Array(items) if items.is_empty() => Err(ResponseEnvelope::error(
            None,
            ErrorObject::invalid_request(Some("empty batch".to_string())),
        )),
        Value::Array(items) => Ok(Envelope::Batch(items)),
        other => Ok(Envelope::Single(other)),
    }
}

/// A notification is a non-empty object without an `id` member
pub fn is_notification(candidate: &Value) -> bool {
    match candidate {
        Value::Object(fields) => !fields.is_empty() && !fields.contains_key("id"),
        _ => false,
    }
}
