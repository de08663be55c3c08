/// Built-in method modules
///
/// Small method tables that can be selected by name from the command line.
/// `arith` mirrors the examples published at jsonrpc.org; `echo` is
/// handy for exercising fault handling.

use serde_json::{json, Number, Value};

use super::method::{decode_args, MethodError};
use super::{MethodRegistry, ModuleResolver, RegistryError};

/// Resolver over the modules compiled into this crate
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinModules;

impl ModuleResolver for BuiltinModules {
    fn resolve(&self, module: &str) -> Result<MethodRegistry, RegistryError> {
        match module {
            "arith" => arith(),
            "echo" => echo(),
            other => Err(RegistryError::UnknownModule(other.to_string())),
        }
    }

    fn modules(&self) -> Vec<&'static str> {
        vec!["arith", "echo"]
    }
}

/// Arithmetic module: add, subtract, sum, divide, get_data
pub fn arith() -> Result<MethodRegistry, RegistryError> {
    MethodRegistry::builder()
        .method("add", &["a", "b"], add)
        .method("subtract", &["minuend", "subtrahend"], subtract)
        .method("sum", &["a", "b", "c"], sum)
        .method("divide", &["dividend", "divisor"], divide)
        .method("get_data", &[], get_data)
        .value("name", json!("arith"))
        .build()
}

/// Echo module: echo, ping, fail, reject
pub fn echo() -> Result<MethodRegistry, RegistryError> {
    MethodRegistry::builder()
        .method("echo", &["message"], echo_message)
        .method("ping", &[], ping)
        .method("fail", &["reason"], fail)
        .method("reject", &["detail"], reject)
        .build()
}

/// Apply an integer operation when both operands are integers, otherwise
/// fall back to floating point.
fn combine(
    a: &Number,
    b: &Number,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Number, MethodError> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return int_op(x, y)
            .map(Number::from)
            .ok_or_else(|| MethodError::fault(format!("integer overflow on {} and {}", x, y)));
    }
    let (x, y) = match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => (x, y),
        _ => return Err(MethodError::fault("operands are not representable as numbers")),
    };
    Number::from_f64(float_op(x, y)).ok_or_else(|| MethodError::fault("result is not a finite number"))
}

fn add(args: &[Value]) -> Result<Value, MethodError> {
    let (a, b): (Number, Number) = decode_args(args)?;
    combine(&a, &b, i64::checked_add, |x, y| x + y).map(Value::Number)
}

fn subtract(args: &[Value]) -> Result<Value, MethodError> {
    let (minuend, subtrahend): (Number, Number) = decode_args(args)?;
    combine(&minuend, &subtrahend, i64::checked_sub, |x, y| x - y).map(Value::Number)
}

fn sum(args: &[Value]) -> Result<Value, MethodError> {
    let (a, b, c): (Number, Number, Number) = decode_args(args)?;
    let partial = combine(&a, &b, i64::checked_add, |x, y| x + y)?;
    combine(&partial, &c, i64::checked_add, |x, y| x + y).map(Value::Number)
}

fn divide(args: &[Value]) -> Result<Value, MethodError> {
    let (dividend, divisor): (Number, Number) = decode_args(args)?;
    if divisor.as_f64() == Some(0.0) {
        return Err(MethodError::fault("division by zero"));
    }
    // Exact integer quotients never go through f64
    if let (Some(x), Some(y)) = (dividend.as_i64(), divisor.as_i64()) {
        if x.checked_rem(y) == Some(0) {
            return x
                .checked_div(y)
                .map(Value::from)
                .ok_or_else(|| MethodError::fault(format!("integer overflow on {} and {}", x, y)));
        }
    }
    let quotient = match (dividend.as_f64(), divisor.as_f64()) {
        (Some(x), Some(y)) => x / y,
        _ => return Err(MethodError::fault("operands are not representable as numbers")),
    };
    if quotient.fract() == 0.0 && quotient.abs() < i64::MAX as f64 {
        return Ok(Value::from(quotient as i64));
    }
    Number::from_f64(quotient)
        .map(Value::Number)
        .ok_or_else(|| MethodError::fault("result is not a finite number"))
}

fn get_data(_: &[Value]) -> Result<Value, MethodError> {
    Ok(json!(["hello", 5]))
}

fn echo_message(args: &[Value]) -> Result<Value, MethodError> {
    Ok(args.first().cloned().unwrap_or(Value::Null))
}

fn ping(_: &[Value]) -> Result<Value, MethodError> {
    Ok(json!("pong"))
}

fn fail(args: &[Value]) -> Result<Value, MethodError> {
    let reason = match args.first() {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "failed".to_string(),
    };
    Err(MethodError::Fault(reason))
}

fn reject(args: &[Value]) -> Result<Value, MethodError> {
    Err(MethodError::Application(args.first().cloned().unwrap_or(Value::Null)))
}
