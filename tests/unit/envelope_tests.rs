/// Response envelope invariants on the wire
use jsonrpc_pipeline::*;
use serde_json::{json, Value};

fn engine() -> Engine {
    Engine::from_module(&BuiltinModules, "arith").expect("arith module")
}

fn reply(raw: &str) -> Value {
    let text = engine().process(raw).expect("expected a reply");
    serde_json::from_str(&text).expect("reply should be valid JSON")
}

fn assert_well_formed(envelope: &Value) {
    let object = envelope.as_object().expect("envelope should be an object");
    assert_eq!(object.get("jsonrpc"), Some(&json!("2.0")));
    assert!(object.contains_key("id"));
    assert!(object.contains_key("result") ^ object.contains_key("error"));
}

#[test]
fn test_every_envelope_has_one_outcome_and_an_id() {
    let inputs = [
        r#"{"jsonrpc": "2.0", "method": "subtract", "params": [42, 23], "id": 1"#,
        "{}",
        r#"{"jsonrpc":"1.2", "id":1}"#,
        r#"{"jsonrpc":"2.0", "id":[1]}"#,
        r#"{"jsonrpc":"2.0", "method":"divide", "params":[1,0], "id":1}"#,
        r#"{"jsonrpc":"2.0", "method":"get_data", "id":1}"#,
        r#"[1, {"method":"add","params":[1,2],"id":2}, "x"]"#,
    ];
    for input in inputs {
        match reply(input) {
            Value::Array(envelopes) => envelopes.iter().for_each(assert_well_formed),
            envelope => assert_well_formed(&envelope),
        }
    }
}

#[test]
fn test_error_object_shape() {
    let envelope = reply(r#"{"jsonrpc":"2.0","method":"foobar","id":"1"}"#);
    assert_eq!(
        envelope,
        json!({
            "jsonrpc": "2.0",
            "error": {"code": -32601, "message": "Method not found", "data": "foobar - unknown method"},
            "id": "1"
        })
    );
}

#[test]
fn test_typed_reply_matches_text() {
    let engine = engine();
    let raw = r#"[{"method":"add","params":[1,2],"id":1},{"method":"nope","id":2}]"#;
    let typed = engine.handle(raw).expect("a reply");
    let text = engine.process(raw).expect("a reply");

    assert!(typed.is_batch());
    assert_eq!(serde_json::to_string(&typed).unwrap(), text);
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(serde_json::to_value(&typed).unwrap(), parsed);
    assert_eq!(typed.envelopes().len(), 2);
    assert!(typed.envelopes()[1].is_error());
}

#[test]
fn test_error_codes_are_fixed() {
    assert_eq!(error_codes::PARSE_ERROR, -32700);
    assert_eq!(error_codes::INVALID_REQUEST, -32600);
    assert_eq!(error_codes::METHOD_NOT_FOUND, -32601);
    assert_eq!(error_codes::INVALID_PARAMS, -32602);
    assert_eq!(error_codes::INTERNAL_ERROR, -32603);
    assert_eq!(error_codes::SERVER_ERROR, -32000);
    assert_eq!(ErrorCode::ServerError.message(), "Server error");
}
