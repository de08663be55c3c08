/// Core wire types shared by requests and responses

use serde::Serialize;
use serde_json::{Number, Value};

/// The only protocol version this crate speaks
pub const JSONRPC_VERSION: &str = "2.0";

/// A request identifier
///
/// JSON-RPC only allows strings and numbers here. Anything else is rejected
/// by the validator and answered with a `null` id. Numbers keep their exact
/// source text, so large integer ids echo back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(Number),
    String(String),
}

impl RequestId {
    /// Extract an id from a raw JSON value, if it has an acceptable type
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(RequestId::Number(n.clone())),
            Value::String(s) => Some(RequestId::String(s.clone())),
            _ => None,
        }
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        RequestId::Number(n.into())
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::String(s.to_string())
    }
}
