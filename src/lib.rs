//! JSON-RPC 2.0 request pipeline
//!
//! Parses raw JSON-RPC input (single requests or batches), validates each
//! request against a registry of methods with declared parameter lists,
//! dispatches valid calls and assembles the response, or no response at all
//! when only notifications were received.
//!
//! ```
//! use jsonrpc_pipeline::{BuiltinModules, Engine};
//!
//! let engine = Engine::from_module(&BuiltinModules, "arith").unwrap();
//! let reply = engine.process(r#"{"jsonrpc":"2.0","method":"subtract","params":[42,23],"id":1}"#);
//! assert_eq!(reply.as_deref(), Some(r#"{"jsonrpc":"2.0","result":19,"id":1}"#));
//! ```

use thiserror::Error;

pub mod engine;
pub mod protocol;
pub mod registry;
pub mod server;

// Re-export the main types
pub use engine::Engine;
pub use protocol::{error_codes, ErrorCode, ErrorObject, Payload, Reply, RequestId, ResponseEnvelope};
pub use registry::{
    BuiltinModules, Method, MethodDescriptor, MethodError, MethodRegistry, ModuleResolver,
    RegistryError,
};
pub use server::RpcServer;

/// Errors that can occur while running the stdio driver
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
