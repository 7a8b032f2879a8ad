//! The bundled assistant endpoint, driven through the real client.

mod common;

use std::sync::Arc;

use assistant_tui::{
    endpoint::{Action, AssistantClient, AssistantReply},
    server::{serve_on, Assistant, UpstreamConfig, ASSISTANT_PATH, DEFAULT_MODEL},
    AssistError,
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

async fn spawn_server(upstream_url: String, api_key: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let assistant = Arc::new(Assistant::new(UpstreamConfig {
        url: upstream_url,
        model: DEFAULT_MODEL.to_string(),
        api_key: api_key.to_string(),
    }));
    tokio::spawn(serve_on(listener, assistant));
    format!("http://{}", addr)
}

fn completion(content: &str) -> String {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
    .to_string()
}

#[tokio::test]
async fn forwards_command_and_returns_completion() {
    let (upstream, seen) = common::spawn_canned(200, &completion("Sure, here it is.")).await;
    let base = spawn_server(format!("{}/v1/chat/completions", upstream), "sk-up").await;
    let client = AssistantClient::new(format!("{}{}", base, ASSISTANT_PATH));

    let reply = client.send_command("write a haiku").await.unwrap();
    assert_eq!(reply.text, "Sure, here it is.");
    assert_eq!(reply.action, None);

    let reqs = seen.all();
    assert_eq!(reqs.len(), 1);
    let head = reqs[0].head.to_lowercase();
    assert!(head.contains("authorization: bearer sk-up"), "{}", reqs[0].head);
    let body: serde_json::Value = serde_json::from_str(&reqs[0].body).unwrap();
    assert_eq!(body["model"], DEFAULT_MODEL);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["content"], "write a haiku");
}

#[tokio::test]
async fn tags_deploy_and_email_commands() {
    let (upstream, _) = common::spawn_canned(200, &completion("ok")).await;
    let base = spawn_server(upstream, "sk-up").await;
    let client = AssistantClient::new(format!("{}{}", base, ASSISTANT_PATH));

    let deploy = client.send_command("Deploy my website to production").await.unwrap();
    assert_eq!(deploy.action, Some(Action::Deploy));

    let email = client.send_command("Compose an email to my team").await.unwrap();
    assert_eq!(email.action, Some(Action::Email));
}

#[tokio::test]
async fn upstream_failure_becomes_error_field() {
    let (upstream, _) = common::spawn_canned(401, r#"{"error":"bad key"}"#).await;
    let base = spawn_server(upstream, "sk-wrong").await;
    let client = AssistantClient::new(format!("{}{}", base, ASSISTANT_PATH));

    let err = client.send_command("hello").await.unwrap_err();
    match err {
        AssistError::Remote(msg) => assert!(msg.contains("401"), "{}", msg),
        other => panic!("expected remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn unknown_path_is_404() {
    let (upstream, _) = common::spawn_canned(200, &completion("ok")).await;
    let base = spawn_server(upstream, "sk-up").await;

    let resp = reqwest::Client::new()
        .post(format!("{}/api/other", base))
        .json(&serde_json::json!({ "command": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn get_is_405() {
    let (upstream, _) = common::spawn_canned(200, &completion("ok")).await;
    let base = spawn_server(upstream, "sk-up").await;

    let resp = reqwest::get(format!("{}{}", base, ASSISTANT_PATH)).await.unwrap();
    assert_eq!(resp.status().as_u16(), 405);
}

#[tokio::test]
async fn malformed_body_is_400_with_error_field() {
    let (upstream, seen) = common::spawn_canned(200, &completion("ok")).await;
    let base = spawn_server(upstream, "sk-up").await;

    let resp = reqwest::Client::new()
        .post(format!("{}{}", base, ASSISTANT_PATH))
        .header("content-type", "application/json")
        .body("{\"cmd\": 1}")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let body: AssistantReply = resp.json().await.unwrap();
    assert!(body.error.is_some());
    assert_eq!(seen.count(), 0);
}

#[tokio::test]
async fn oversized_body_is_413_with_error_field() {
    let (upstream, seen) = common::spawn_canned(200, &completion("ok")).await;
    let base = spawn_server(upstream, "sk-up").await;
    let huge = "x".repeat((1 << 20) + 1024);

    let resp = reqwest::Client::new()
        .post(format!("{}{}", base, ASSISTANT_PATH))
        .json(&serde_json::json!({ "command": huge }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 413);
    let body: AssistantReply = resp.json().await.unwrap();
    assert!(body.error.is_some());
    assert_eq!(seen.count(), 0);
}

#[tokio::test]
async fn absurd_content_length_is_refused_and_server_keeps_serving() {
    let (upstream, _) = common::spawn_canned(200, &completion("still here")).await;
    let base = spawn_server(upstream, "sk-up").await;
    let addr = base.trim_start_matches("http://");

    let mut stream = TcpStream::connect(addr).await.unwrap();
    let req = format!(
        "POST {} HTTP/1.1\r\nHost: {}\r\nContent-Type: application/json\r\nContent-Length: 18446744073709551615\r\n\r\n{{}}",
        ASSISTANT_PATH, addr
    );
    stream.write_all(req.as_bytes()).await.unwrap();
    let mut buf = Vec::new();
    let _ = stream.read_to_end(&mut buf).await;
    let head = String::from_utf8_lossy(&buf);
    assert!(head.starts_with("HTTP/1.1 4"), "got {:?}", head);

    let client = AssistantClient::new(format!("{}{}", base, ASSISTANT_PATH));
    let reply = client.send_command("hello").await.unwrap();
    assert_eq!(reply.text, "still here");
}
