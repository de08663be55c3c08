/// Payload tracing as seen by a subscriber
use std::io;
use std::sync::{Arc, Mutex};

use jsonrpc_pipeline::*;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `process` once under a debug-level subscriber and return what it logged
fn logged(tracing_enabled: bool, raw: &str) -> (Option<String>, String) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();

    let reply = tracing::subscriber::with_default(subscriber, || {
        Engine::from_module(&BuiltinModules, "arith")
            .expect("module")
            .with_payload_tracing(tracing_enabled)
            .process(raw)
    });
    (reply, captured.text())
}

#[test]
fn test_payload_tracing_logs_both_directions() {
    let raw = r#"{"jsonrpc":"2.0","method":"subtract","params":[42,23],"id":1}"#;
    let (reply, logs) = logged(true, raw);

    assert_eq!(reply.as_deref(), Some(r#"{"jsonrpc":"2.0","result":19,"id":1}"#));
    assert!(logs.contains(&format!("--> {}", raw)), "logs: {}", logs);
    assert!(logs.contains(r#"<-- {"jsonrpc":"2.0","result":19,"id":1}"#), "logs: {}", logs);
}

#[test]
fn test_payload_tracing_covers_rejections() {
    let (_, logs) = logged(true, "{oops");

    assert!(logs.contains("--> {oops"), "logs: {}", logs);
    assert!(logs.contains(r#"<-- {"jsonrpc":"2.0","error":{"code":-32700"#), "logs: {}", logs);
}

#[test]
fn test_payload_tracing_off_by_default() {
    let (reply, logs) = logged(false, r#"{"method":"add","params":[1,2],"id":7}"#);

    assert_eq!(reply.as_deref(), Some(r#"{"jsonrpc":"2.0","result":3,"id":7}"#));
    assert!(!logs.contains("-->"), "logs: {}", logs);
    assert!(!logs.contains("<--"), "logs: {}", logs);
    // Ordinary debug logging still reaches the subscriber
    assert!(logs.contains("Loaded with methods"), "logs: {}", logs);
}
