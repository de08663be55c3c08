/// Method invocation
///
/// Runs a validated call and turns whatever the method produced into an
/// envelope. Nothing a method does (returning an error or panicking) gets
/// past this boundary.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use super::validator::NormalizedCall;
use crate::protocol::{ErrorCode, ErrorObject, ResponseEnvelope};
use crate::registry::MethodError;

/// Invoke the method with its normalized arguments
pub fn dispatch(call: NormalizedCall<'_>) -> ResponseEnvelope {
    let NormalizedCall { id, method, args } = call;
    let name = &method.descriptor.name;

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| method.handler.call(&args)));

    match outcome {
        Ok(Ok(value)) => ResponseEnvelope::success(id, value),
        Ok(Err(MethodError::Fault(message))) => {
            warn!("Method {} faulted: {}", name, message);
            ResponseEnvelope::failure(id, ErrorCode::InternalError, message)
        }
        Ok(Err(MethodError::Application(data))) => {
            ResponseEnvelope::error(id, ErrorObject::new(ErrorCode::ServerError, Some(data)))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!("Method {} panicked: {}", name, message);
            ResponseEnvelope::failure(id, ErrorCode::InternalError, message)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "method panicked".to_string()
    }
}
