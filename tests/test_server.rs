//! End-to-end server tests.
//!
//! Each test drives a full session over in-memory streams: framed requests
//! in, framed responses and notifications out.

mod common;

use common::*;
use serde_json::{json, Value};

fn initialize_request(id: i64) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "method": "initialize", "params": {}})
}

fn did_open(uri: &str, text: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": "textDocument/didOpen",
        "params": {"textDocument": {"uri": uri, "text": text}}
    })
}

fn semantic_tokens_request(id: i64, uri: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "textDocument/semanticTokens/full",
        "params": {"textDocument": {"uri": uri}}
    })
}

#[tokio::test]
async fn initialize_reports_capabilities() {
    let replies = run_session(&[initialize_request(1)]).await;

    assert_eq!(replies.len(), 1);
    let result = &replies[0]["result"];

    assert_eq!(replies[0]["id"], 1);
    assert_eq!(result["capabilities"]["textDocumentSync"], 1);

    let legend = &result["capabilities"]["semanticTokensProvider"]["legend"];
    assert_eq!(
        legend["tokenTypes"],
        json!(["keyword", "type", "variable", "number", "string", "comment", "operator"])
    );
    assert_eq!(legend["tokenModifiers"], json!([]));
    assert_eq!(
        result["capabilities"]["semanticTokensProvider"]["full"],
        true
    );
    assert_eq!(result["serverInfo"]["name"], "driftls");
}

#[tokio::test]
async fn semantic_tokens_for_a_clean_document() {
    let uri = "file:///a.drift";
    let replies = run_session(&[did_open(uri, "let x = 1;"), semantic_tokens_request(2, uri)]).await;

    assert_eq!(replies.len(), 2);

    // Diagnostics are published first, and there are none.
    let diagnostics = &replies[0];
    assert_eq!(diagnostics["method"], "textDocument/publishDiagnostics");
    assert_eq!(diagnostics["params"]["uri"], uri);
    assert_eq!(diagnostics["params"]["diagnostics"], json!([]));

    // Then the token response: let, x, =, 1; the semicolon encodes nothing.
    let response = &replies[1];
    assert_eq!(response["id"], 2);
    assert_eq!(
        response["result"]["data"],
        json!([
            0, 0, 3, 0, 0, // let -> keyword
            0, 4, 1, 2, 0, // x -> variable
            0, 2, 1, 6, 0, // = -> operator
            0, 2, 1, 3, 0, // 1 -> number
        ])
    );
}

#[tokio::test]
async fn unterminated_string_yields_one_diagnostic_and_a_result() {
    let uri = "file:///b.drift";
    let replies = run_session(&[
        did_open(uri, "let s = \"oops"),
        semantic_tokens_request(3, uri),
    ])
    .await;

    assert_eq!(replies.len(), 2);

    let diagnostics = &replies[0]["params"]["diagnostics"];
    assert_eq!(diagnostics.as_array().unwrap().len(), 1);
    assert_eq!(diagnostics[0]["severity"], 1);
    assert_eq!(diagnostics[0]["source"], "lexer");
    assert_eq!(diagnostics[0]["message"], "unterminated string literal");
    // The string opens at line 1, column 9 (1-based), 5 characters long.
    assert_eq!(diagnostics[0]["range"]["start"], json!({"line": 0, "character": 8}));
    assert_eq!(diagnostics[0]["range"]["end"], json!({"line": 0, "character": 13}));

    // Tokens lexed before (and including) the error still encode.
    let data = replies[1]["result"]["data"].as_array().unwrap();
    assert!(!data.is_empty());
    assert_eq!(data.len() % 5, 0);
}

#[tokio::test]
async fn did_change_applies_only_the_first_entry() {
    let uri = "file:///c.drift";
    let change = json!({
        "jsonrpc": "2.0",
        "method": "textDocument/didChange",
        "params": {
            "textDocument": {"uri": uri},
            "contentChanges": [{"text": "vertex"}, {"text": "let a = 1; let b = 2;"}]
        }
    });
    let replies = run_session(&[
        did_open(uri, "let original = 0;"),
        change,
        semantic_tokens_request(4, uri),
    ])
    .await;

    // The stored text is "vertex": a single keyword group.
    assert_eq!(replies[1]["result"]["data"], json!([0, 0, 6, 0, 0]));
}

#[tokio::test]
async fn closed_documents_read_as_empty() {
    let uri = "file:///d.drift";
    let close = json!({
        "jsonrpc": "2.0",
        "method": "textDocument/didClose",
        "params": {"textDocument": {"uri": uri}}
    });
    let replies = run_session(&[
        did_open(uri, "let x = 1;"),
        close,
        semantic_tokens_request(5, uri),
    ])
    .await;

    assert_eq!(replies[0]["params"]["diagnostics"], json!([]));
    assert_eq!(replies[1]["result"]["data"], json!([]));
}

#[tokio::test]
async fn unknown_request_method_gets_method_not_found() {
    let request = json!({
        "jsonrpc": "2.0",
        "id": 9,
        "method": "textDocument/hover",
        "params": {}
    });
    let replies = run_session(&[request]).await;

    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["id"], 9);
    assert_eq!(replies[0]["error"]["code"], -32601);
}

#[tokio::test]
async fn unknown_notification_is_ignored() {
    let notification = json!({
        "jsonrpc": "2.0",
        "method": "$/setTrace",
        "params": {"value": "off"}
    });
    let replies = run_session(&[notification, initialize_request(1)]).await;

    // Only the initialize response comes back.
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["id"], 1);
}

#[tokio::test]
async fn invalid_params_get_an_error_and_the_loop_continues() {
    let bad_open = json!({
        "jsonrpc": "2.0",
        "method": "textDocument/didOpen",
        "params": 42
    });
    let replies = run_session(&[bad_open, initialize_request(2)]).await;

    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["error"]["code"], -32602);
    assert_eq!(replies[0]["id"], Value::Null);
    // The server is still alive and answers the next request.
    assert_eq!(replies[1]["id"], 2);
}

#[tokio::test]
async fn opening_twice_replaces_the_document() {
    let uri = "file:///e.drift";
    let replies = run_session(&[
        did_open(uri, "let a = 1;"),
        did_open(uri, "fragment"),
        semantic_tokens_request(6, uri),
    ])
    .await;

    assert_eq!(replies[1]["result"]["data"], json!([0, 0, 8, 0, 0]));
}

#[tokio::test]
async fn multi_line_document_encodes_line_deltas() {
    let uri = "file:///f.drift";
    let replies = run_session(&[
        did_open(uri, "let a = 1;\n  let b = 2;"),
        semantic_tokens_request(7, uri),
    ])
    .await;

    let data = replies[1]["result"]["data"].as_array().unwrap();
    // Second line's `let` is the fifth group: down one line, absolute column 2.
    assert_eq!(data[20], 1);
    assert_eq!(data[21], 2);
}
