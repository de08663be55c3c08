/// Response envelopes and the final reply shape

use serde::Serialize;
use serde_json::Value;

use super::error::{ErrorCode, ErrorObject};
use super::types::{RequestId, JSONRPC_VERSION};

/// The outcome member of an envelope
///
/// Flattened into the envelope so that exactly one of `result` or `error`
/// ever appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Payload {
    Result(Value),
    Error(ErrorObject),
}

/// JSON-RPC 2.0 response object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    /// Always "2.0"
    pub jsonrpc: String,
    #[serde(flatten)]
    pub payload: Payload,
    /// Serialized as `null` when the request id could not be determined
    pub id: Option<RequestId>,
}

impl ResponseEnvelope {
    /// Create a successful response
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            payload: Payload::Result(result),
            id,
        }
    }

    /// Create an error response
    pub fn error(id: Option<RequestId>, error: ErrorObject) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            payload: Payload::Error(error),
            id,
        }
    }

    /// Shorthand for an error response whose `data` is a reason string
    pub fn failure(id: Option<RequestId>, code: ErrorCode, reason: impl Into<String>) -> Self {
        Self::error(id, ErrorObject::with_reason(code, reason))
    }

    pub fn is_error(&self) -> bool {
        matches!(self.payload, Payload::Error(_))
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.payload {
            Payload::Result(value) => Some(value),
            Payload::Error(_) => None,
        }
    }

    pub fn error_object(&self) -> Option<&ErrorObject> {
        match &self.payload {
            Payload::Error(error) => Some(error),
            Payload::Result(_) => None,
        }
    }

    /// Numeric error code, if this is an error response
    pub fn error_code(&self) -> Option<i64> {
        self.error_object().map(|e| e.code)
    }
}

/// Everything the pipeline can answer with for one input
///
/// "No reply at all" is modelled as `Option<Reply>::None` by the engine, so
/// it never collapses into an empty batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Single(ResponseEnvelope),
    Batch(Vec<ResponseEnvelope>),
}

impl Reply {
    /// All envelopes in order, regardless of shape
    pub fn envelopes(&self) -> &[ResponseEnvelope] {
        match self {
            Reply::Single(envelope) => std::slice::from_ref(envelope),
            Reply::Batch(envelopes) => envelopes,
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, Reply::Batch(_))
    }
}
