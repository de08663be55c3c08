/// JSON-RPC error taxonomy
///
/// The six error conditions a response envelope can carry. The set is closed:
/// every failure detected while classifying, validating or dispatching a
/// request maps onto exactly one of these.

use serde::Serialize;
use serde_json::Value;

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    /// Parse error - Invalid JSON was received
    pub const PARSE_ERROR: i64 = -32700;
    /// Invalid Request - The JSON sent is not a valid Request object
    pub const INVALID_REQUEST: i64 = -32600;
    /// Method not found - The method does not exist or is not callable
    pub const METHOD_NOT_FOUND: i64 = -32601;
    /// Invalid params - Method exists but the parameters do not fit it
    pub const INVALID_PARAMS: i64 = -32602;
    /// Internal error - The method faulted while running
    pub const INTERNAL_ERROR: i64 = -32603;
    /// Server error - Reserved for application errors raised by methods
    pub const SERVER_ERROR: i64 = -32000;
}

/// One of the six fixed error descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    ServerError,
}

impl ErrorCode {
    pub fn code(&self) -> i64 {
        match self {
            ErrorCode::ParseError => error_codes::PARSE_ERROR,
            ErrorCode::InvalidRequest => error_codes::INVALID_REQUEST,
            ErrorCode::MethodNotFound => error_codes::METHOD_NOT_FOUND,
            ErrorCode::InvalidParams => error_codes::INVALID_PARAMS,
            ErrorCode::InternalError => error_codes::INTERNAL_ERROR,
            ErrorCode::ServerError => error_codes::SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::InvalidRequest => "Invalid Request",
            ErrorCode::MethodNotFound => "Method not found",
            ErrorCode::InvalidParams => "Invalid params",
            ErrorCode::InternalError => "Internal error",
            ErrorCode::ServerError => "Server error",
        }
    }

    /// Look up the descriptor for a numeric code
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            error_codes::PARSE_ERROR => Some(ErrorCode::ParseError),
            error_codes::INVALID_REQUEST => Some(ErrorCode::InvalidRequest),
            error_codes::METHOD_NOT_FOUND => Some(ErrorCode::MethodNotFound),
            error_codes::INVALID_PARAMS => Some(ErrorCode::InvalidParams),
            error_codes::INTERNAL_ERROR => Some(ErrorCode::InternalError),
            error_codes::SERVER_ERROR => Some(ErrorCode::ServerError),
            _ => None,
        }
    }
}

/// The `error` member of a response envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorObject {
    /// Numeric error code
    pub code: i64,
    /// Fixed message belonging to the code
    pub message: String,
    /// Optional detail, e.g. which check failed or a method's fault text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ErrorObject {
    pub fn new(code: ErrorCode, data: Option<Value>) -> Self {
        Self {
            code: code.code(),
            message: code.message().to_string(),
            data,
        }
    }

    /// Build an error whose `data` is a human-readable reason
    pub fn with_reason(code: ErrorCode, reason: impl Into<String>) -> Self {
        Self::new(code, Some(Value::String(reason.into())))
    }

    pub fn parse_error(reason: impl Into<String>) -> Self {
        Self::with_reason(ErrorCode::ParseError, reason)
    }

    pub fn invalid_request(reason: Option<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, reason.map(Value::String))
    }

    /// The descriptor this object was built from, if its code is a known one
    pub fn kind(&self) -> Option<ErrorCode> {
        ErrorCode::from_code(self.code)
    }
}
