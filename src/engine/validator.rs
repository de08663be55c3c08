/// Request validation
///
/// Decides whether a candidate is a well-formed call to a registered method
/// and, if so, normalizes its parameters into positional order. Checks run in
/// a fixed order and the first failure wins:
///
/// 1. the candidate is a non-empty object
/// 2. `jsonrpc`, when present, is exactly "2.0"
/// 3. `id`, when present, is a string or a number
/// 4. `method` is present
/// 5. `method` names a callable registry entry
/// 6. `params` is present if the method declares parameters
/// 7. `params`, when present, is an array or an object
/// 8. array params match the declared arity
/// 9. object params match the declared names exactly

use serde_json::{Map, Value};

use crate::protocol::{ErrorCode, RequestId, ResponseEnvelope, JSONRPC_VERSION};
use crate::registry::{MethodRegistry, RegisteredMethod};

/// A validated call, ready for the dispatcher
#[derive(Debug)]
pub struct NormalizedCall<'r> {
    /// `None` for notifications
    pub id: Option<RequestId>,
    pub method: &'r RegisteredMethod,
    /// Arguments in the method's declared order
    pub args: Vec<Value>,
}

/// Validate one candidate against the registry
///
/// On failure the returned envelope carries the candidate's id when it is a
/// string or number, and `null` otherwise.
pub fn validate(
    candidate: Value,
    registry: &MethodRegistry,
) -> Result<NormalizedCall<'_>, ResponseEnvelope> {
    let mut fields = match candidate {
        Value::Object(fields) if !fields.is_empty() => fields,
        _ => {
            return Err(ResponseEnvelope::failure(
                None,
                ErrorCode::InvalidRequest,
                "request should be a non-empty object",
            ))
        }
    };

    let id = fields.get("id").and_then(RequestId::from_value);

    if let Some(version) = fields.get("jsonrpc") {
        if version.as_str() != Some(JSONRPC_VERSION) {
            return Err(ResponseEnvelope::failure(
                id,
                ErrorCode::InvalidRequest,
                "unknown jsonrpc version",
            ));
        }
    }

    if fields.contains_key("id") && id.is_none() {
        return Err(ResponseEnvelope::failure(
            None,
            ErrorCode::InvalidRequest,
            "id should be a valid number/string",
        ));
    }

    let method = match fields.get("method") {
        None => {
            return Err(ResponseEnvelope::failure(
                id,
                ErrorCode::InvalidRequest,
                "missing method to call",
            ))
        }
        Some(value) => match lookup(value, registry) {
            Some(method) => method,
            None => {
                let name = match value {
                    Value::String(name) => name.clone(),
                    other => other.to_string(),
                };
                return Err(ResponseEnvelope::failure(
                    id,
                    ErrorCode::MethodNotFound,
                    format!("{} - unknown method", name),
                ));
            }
        },
    };

    match normalize_params(fields.remove("params"), &method.descriptor.params) {
        Ok(args) => Ok(NormalizedCall { id, method, args }),
        Err(reason) => Err(ResponseEnvelope::failure(id, ErrorCode::InvalidParams, reason)),
    }
}

/// Only string method names can resolve; data entries never do
fn lookup<'r>(method: &Value, registry: &'r MethodRegistry) -> Option<&'r RegisteredMethod> {
    match method {
        Value::String(name) => registry.method(name),
        _ => None,
    }
}

/// Reconcile the request's params with the declared parameter list
fn normalize_params(params: Option<Value>, formal: &[String]) -> Result<Vec<Value>, String> {
    match params {
        None if formal.is_empty() => Ok(Vec::new()),
        None => Err(format!("params expected:{}", formal.join(","))),
        Some(Value::Array(values)) => {
            if values.len() != formal.len() {
                return Err(format!("total params expected:{}", formal.len()));
            }
            Ok(values)
        }
        Some(Value::Object(named)) => reorder(named, formal)
            .ok_or_else(|| format!("params expected:{}", formal.join(","))),
        Some(_) => Err("params should be either array or object".to_string()),
    }
}

/// Pull named values out in declared order; `None` unless the key sets match
fn reorder(mut named: Map<String, Value>, formal: &[String]) -> Option<Vec<Value>> {
    if named.len() != formal.len() {
        return None;
    }
    formal.iter().map(|name| named.remove(name)).collect()
}
