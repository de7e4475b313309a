//! Session-loop tests: newline-delimited framing, the initialization gate,
//! protocol-level error paths, and the TCP streaming transport.
//!
//! Sessions are driven end to end over in-memory pipes (`tokio::io::duplex`)
//! so the same loop the stdio and TCP transports share is what gets
//! exercised.

use std::fs;
use std::path::Path;

use tokio::io::{duplex, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use mcp_frontend_docs_server::config::ServerConfig;
use mcp_frontend_docs_server::docs::{DocResolver, DocStore, Topic};
use mcp_frontend_docs_server::server::{serve_session, McpServer};

fn resolver_for(root: &Path) -> DocResolver {
    DocResolver::new(DocStore::new(root))
}

fn populate_all_topics(root: &Path) {
    for topic in Topic::ALL {
        let content = format!("# {topic}\n\nSetup instructions for {topic}.\n");
        fs::write(root.join(topic.filename()), content).unwrap();
    }
}

fn initialize_line(id: i64) -> Vec<u8> {
    format!(r#"{{"jsonrpc":"2.0","id":{id},"method":"initialize"}}"#).into_bytes()
}

fn tool_call_line(id: i64, topic: &str) -> Vec<u8> {
    format!(
        r#"{{"jsonrpc":"2.0","id":{id},"method":"tools/call","params":{{"name":"GetReactDocsByTopic","arguments":{{"topic":"{topic}"}}}}}}"#
    )
    .into_bytes()
}

/// Feed raw input lines into one session and collect the response lines the
/// server writes back, parsed as JSON.
async fn run_session(root: &Path, input: Vec<Vec<u8>>) -> Vec<serde_json::Value> {
    let resolver = resolver_for(root);
    let (mut client_in, server_in) = duplex(4 * 1024 * 1024);
    let (server_out, mut client_out) = duplex(4 * 1024 * 1024);

    let session = tokio::spawn(serve_session(
        resolver,
        BufReader::new(server_in),
        server_out,
    ));

    for line in input {
        client_in.write_all(&line).await.unwrap();
        client_in.write_all(b"\n").await.unwrap();
    }
    drop(client_in); // EOF ends the session

    let mut raw = String::new();
    client_out.read_to_string(&mut raw).await.unwrap();
    session.await.unwrap().unwrap();

    raw.lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Initialization gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn requests_before_initialize_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let input = vec![
        br#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#.to_vec(),
        initialize_line(2),
    ];
    let responses = run_session(tmp.path(), input).await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32600);
    assert_eq!(responses[0]["error"]["message"], "Server not initialized");
    assert!(responses[1]["result"]["serverInfo"].is_object());
}

#[tokio::test]
async fn pre_handshake_notifications_are_dropped() {
    let tmp = tempfile::tempdir().unwrap();
    let input = vec![
        br#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#.to_vec(),
        initialize_line(1),
    ];
    let responses = run_session(tmp.path(), input).await;

    // The notification gets no response line, rejected or otherwise
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], 1);
}

#[tokio::test]
async fn handshake_then_tool_call_round_trips() {
    let tmp = tempfile::tempdir().unwrap();
    populate_all_topics(tmp.path());
    let input = vec![
        initialize_line(1),
        br#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#.to_vec(),
        tool_call_line(2, "basic-ui"),
    ];
    let responses = run_session(tmp.path(), input).await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");
    let text = responses[1]["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("Setup instructions for basic-ui"));
}

// ---------------------------------------------------------------------------
// Framing and protocol-level errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_json_is_parse_error() {
    let tmp = tempfile::tempdir().unwrap();
    let responses = run_session(tmp.path(), vec![b"{not json".to_vec()]).await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0].get("id").is_none());
}

#[tokio::test]
async fn invalid_utf8_is_parse_error() {
    let tmp = tempfile::tempdir().unwrap();
    let responses = run_session(tmp.path(), vec![vec![0xff, 0xfe, 0x01]]).await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["error"]["code"], -32700);
}

#[tokio::test]
async fn wrong_jsonrpc_version_is_invalid_request() {
    let tmp = tempfile::tempdir().unwrap();
    let input = vec![br#"{"jsonrpc":"1.0","id":1,"method":"initialize"}"#.to_vec()];
    let responses = run_session(tmp.path(), input).await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["error"]["code"], -32600);
}

#[tokio::test]
async fn oversized_message_is_parse_error() {
    let tmp = tempfile::tempdir().unwrap();
    // Well-formed JSON past the 1 MiB cap: only the size check can reject it
    let pad = "a".repeat(1024 * 1024 + 16);
    let big = format!(r#"{{"jsonrpc":"2.0","id":2,"method":"ping","params":{{"pad":"{pad}"}}}}"#);
    let input = vec![initialize_line(1), big.into_bytes()];
    let responses = run_session(tmp.path(), input).await;

    assert_eq!(responses.len(), 2);
    assert!(responses[0]["result"].is_object());
    assert_eq!(responses[1]["error"]["code"], -32700);
}

#[tokio::test]
async fn blank_lines_are_ignored() {
    let tmp = tempfile::tempdir().unwrap();
    let input = vec![b"".to_vec(), initialize_line(1), b"   ".to_vec()];
    let responses = run_session(tmp.path(), input).await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], 1);
}

// ---------------------------------------------------------------------------
// Streaming transport
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stream_transport_serves_independent_sessions() {
    let tmp = tempfile::tempdir().unwrap();
    populate_all_topics(tmp.path());

    let server = McpServer::new(ServerConfig {
        docs_root: tmp.path().to_path_buf(),
    });
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server.serve_listener(listener).await;
    });

    // First client: full handshake plus a tool call
    let stream = TcpStream::connect(addr).await.unwrap();
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();

    write_half.write_all(&initialize_line(1)).await.unwrap();
    write_half.write_all(b"\n").await.unwrap();
    reader.read_line(&mut line).await.unwrap();
    let resp: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(resp["result"]["serverInfo"]["name"], "mcp-frontend-docs-server");

    write_half.write_all(&tool_call_line(2, "routing")).await.unwrap();
    write_half.write_all(b"\n").await.unwrap();
    line.clear();
    reader.read_line(&mut line).await.unwrap();
    let resp: serde_json::Value = serde_json::from_str(&line).unwrap();
    let text = resp["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("Setup instructions for routing"));

    // Second client: the gate is per connection, not per process
    let stream = TcpStream::connect(addr).await.unwrap();
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    write_half
        .write_all(br#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#)
        .await
        .unwrap();
    write_half.write_all(b"\n").await.unwrap();
    line.clear();
    reader.read_line(&mut line).await.unwrap();
    let resp: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(resp["error"]["code"], -32600);
}
