/// Callable methods and their declared signatures

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors a method can report back to the dispatcher
///
/// The dispatcher converts these into error envelopes; they never leave the
/// engine as Rust errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MethodError {
    /// The method failed while running (bad argument types, arithmetic
    /// overflow, ...). Reported as an internal error.
    #[error("{0}")]
    Fault(String),

    /// An application-level error the method wants reported to the caller
    /// verbatim. Reported in the reserved server error slot.
    #[error("application error: {0}")]
    Application(Value),
}

impl MethodError {
    pub fn fault(message: impl Into<String>) -> Self {
        MethodError::Fault(message.into())
    }
}

/// Anything that can be invoked with positional JSON arguments
///
/// Arguments always arrive in the order of the method's declared parameter
/// list, with exactly as many elements as there are parameters.
pub trait Method: Send + Sync {
    fn call(&self, args: &[Value]) -> Result<Value, MethodError>;
}

impl<F> Method for F
where
    F: Fn(&[Value]) -> Result<Value, MethodError> + Send + Sync,
{
    fn call(&self, args: &[Value]) -> Result<Value, MethodError> {
        self(args)
    }
}

/// Static description of a method's signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Name the method is registered under
    pub name: String,
    /// Formal parameter names, in positional order
    pub params: Vec<String>,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>, params: &[&str]) -> Self {
        Self {
            name: name.into(),
            params: params.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.params.join(", "))
    }
}

/// A callable registry entry: its signature plus the implementation
#[derive(Clone)]
pub struct RegisteredMethod {
    pub descriptor: MethodDescriptor,
    pub handler: Arc<dyn Method>,
}

impl fmt::Debug for RegisteredMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredMethod")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Decode the positional arguments into a typed tuple or struct
///
/// Decoding failures are faults: the arguments passed validation, so a type
/// mismatch is the method's problem to report.
pub fn decode_args<T: DeserializeOwned>(args: &[Value]) -> Result<T, MethodError> {
    serde_json::from_value(Value::Array(args.to_vec()))
        .map_err(|e| MethodError::fault(format!("Invalid arguments: {}", e)))
}
