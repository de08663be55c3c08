/// JSON-RPC 2.0 wire protocol
///
/// Data types for request ids, error descriptors and response envelopes.
/// These carry no decision logic; the engine decides which of them to build.

pub mod error;
pub mod response;
pub mod types;

pub use error::{error_codes, ErrorCode, ErrorObject};
pub use response::{Payload, Reply, ResponseEnvelope};
pub use types::{RequestId, JSONRPC_VERSION};
