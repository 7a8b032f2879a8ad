//! The assistant endpoint: `POST /api/assistant` with `{command}`, answered by
//! one call to a chat-completions API.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::endpoint::{Action, AssistantReply, CommandRequest};

pub const DEFAULT_UPSTREAM: &str = "https://api.deepseek.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-coder";
pub const ASSISTANT_PATH: &str = "/api/assistant";

const SYSTEM_PROMPT: &str =
    "You are an AI assistant that helps with email management, website development, and deployment.";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 2000;
const MAX_REQUEST_BYTES: usize = 1 << 20;

// ---------- Upstream payloads ----------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

/// `deploy` is checked before `email`.
pub fn detect_action(command: &str) -> Option<Action> {
    let lower = command.to_lowercase();
    if lower.contains("deploy") {
        Some(Action::Deploy)
    } else if lower.contains("email") {
        Some(Action::Email)
    } else {
        None
    }
}

#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    pub url: String,
    pub model: String,
    pub api_key: String,
}

pub struct Assistant {
    http: reqwest::Client,
    upstream: UpstreamConfig,
}

impl Assistant {
    pub fn new(upstream: UpstreamConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            upstream,
        }
    }

    async fn complete(&self, command: &str) -> anyhow::Result<String> {
        if self.upstream.api_key.is_empty() {
            anyhow::bail!("upstream API key is not configured");
        }
        let req = ChatCompletionRequest {
            model: &self.upstream.model,
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: SYSTEM_PROMPT.into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: command.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };
        let body: ChatCompletionResponse = self
            .http
            .post(&self.upstream.url)
            .bearer_auth(&self.upstream.api_key)
            .json(&req)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decode completion")?;
        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .context("completion had no choices")
    }

    /// Never fails: upstream trouble comes back as `{error}`.
    pub async fn process_command(&self, command: &str) -> AssistantReply {
        match self.complete(command).await {
            Ok(content) => AssistantReply {
                response: Some(content),
                error: None,
                action: detect_action(command).map(|a| a.as_str().to_string()),
            },
            Err(e) => {
                warn!(error = %format!("{:#}", e), "upstream completion failed");
                AssistantReply {
                    response: None,
                    error: Some(format!("{:#}", e)),
                    action: None,
                }
            }
        }
    }
}

// ---------- HTTP ----------
fn error_body(msg: impl Into<String>) -> Json<AssistantReply> {
    Json(AssistantReply {
        response: None,
        error: Some(msg.into()),
        action: None,
    })
}

/// POST /api/assistant — `{command}` in, `{response, action?}` or `{error}` out.
async fn handle_command(
    State(assistant): State<Arc<Assistant>>,
    payload: Result<Json<CommandRequest>, JsonRejection>,
) -> (StatusCode, Json<AssistantReply>) {
    let command = match payload {
        Ok(Json(req)) => req.command,
        Err(rejection) => {
            // Oversized bodies keep their 413; every other rejection is a bad request.
            let status = match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::BAD_REQUEST,
            };
            warn!(status = status.as_u16(), reason = %rejection.body_text(), "rejected request");
            return (status, error_body(rejection.body_text()));
        }
    };
    debug!(len = command.len(), "processing command");
    let reply = assistant.process_command(&command).await;
    info!(ok = reply.error.is_none(), "command answered");
    (StatusCode::OK, Json(reply))
}

pub fn router(assistant: Arc<Assistant>) -> Router {
    Router::new()
        .route(ASSISTANT_PATH, post(handle_command))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(assistant)
}

/// Serves on an already bound listener until the task is dropped.
pub async fn serve_on(listener: TcpListener, assistant: Arc<Assistant>) -> anyhow::Result<()> {
    axum::serve(listener, router(assistant))
        .await
        .context("serve")
}

pub async fn serve(bind: &str, upstream: UpstreamConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("bind {}", bind))?;
    info!(
        addr = %listener.local_addr()?,
        upstream = %upstream.url,
        model = %upstream.model,
        key_set = !upstream.api_key.is_empty(),
        "assistant endpoint listening"
    );
    serve_on(listener, Arc::new(Assistant::new(upstream))).await
}
