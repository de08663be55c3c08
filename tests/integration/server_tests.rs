/// Stdio driver over in-memory streams
use jsonrpc_pipeline::*;
use tokio::io::BufReader;

fn server(module: &str) -> RpcServer {
    RpcServer::new(Engine::from_module(&BuiltinModules, module).expect("module"))
}

#[tokio::test]
async fn test_server_answers_each_line() {
    let input = concat!(
        "{\"jsonrpc\":\"2.0\",\"method\":\"ping\",\"id\":1}\n",
        "{\"jsonrpc\":\"2.0\",\"method\":\"echo\",\"params\":[\"hi\"]}\n",
        "   \n",
        "[{\"method\":\"echo\",\"params\":{\"message\":\"a\"},\"id\":\"a\"},{\"method\":\"fail\",\"params\":[\"boom\"],\"id\":\"b\"}]\n",
        "not json\n",
    );
    let mut output = Vec::new();

    server("echo")
        .serve(BufReader::new(input.as_bytes()), &mut output)
        .await
        .expect("serve should succeed");

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], r#"{"jsonrpc":"2.0","result":"pong","id":1}"#);
    assert_eq!(
        lines[1],
        r#"[{"jsonrpc":"2.0","result":"a","id":"a"},{"jsonrpc":"2.0","error":{"code":-32603,"message":"Internal error","data":"boom"},"id":"b"}]"#
    );
    assert!(lines[2].contains("-32700"));
}

#[tokio::test]
async fn test_server_handles_input_without_trailing_newline() {
    let input = "{\"method\":\"add\",\"params\":[2,3],\"id\":1}";
    let mut output = Vec::new();

    server("arith").serve(input.as_bytes(), &mut output).await.unwrap();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        "{\"jsonrpc\":\"2.0\",\"result\":5,\"id\":1}\n"
    );
}

#[tokio::test]
async fn test_server_with_only_notifications_writes_nothing() {
    let reader = tokio_test::io::Builder::new()
        .read(b"{\"method\":\"ping\"}\n")
        .read(b"[{\"method\":\"ping\"},{\"method\":\"nope\"}]\n")
        .build();
    let writer = tokio_test::io::Builder::new().build();

    server("echo").serve(BufReader::new(reader), writer).await.unwrap();
}

#[tokio::test]
async fn test_server_survives_non_utf8_line() {
    let reader = tokio_test::io::Builder::new()
        .read(b"{\"method\":\"add\",\"params\":[1,1],\"id\":1}\n")
        .read(b"{\"method\":\"add\",\"params\":[\"\xff\xfe\"],\"id\":2}\n")
        .read(b"{\"method\":\"add\",\"params\":[2,2],\"id\":3}\n")
        .build();
    let mut output = Vec::new();

    server("arith")
        .serve(BufReader::new(reader), &mut output)
        .await
        .expect("a bad line must not end the loop");

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], r#"{"jsonrpc":"2.0","result":2,"id":1}"#);
    assert!(lines[1].starts_with(r#"{"jsonrpc":"2.0","error":{"code":-32700,"message":"Parse error""#));
    assert!(lines[1].ends_with(r#""id":null}"#));
    assert_eq!(lines[2], r#"{"jsonrpc":"2.0","result":4,"id":3}"#);
}
