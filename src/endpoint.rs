//! Client side of the assistant endpoint.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AssistError, Result};

// ---------- Wire types ----------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

/// Body returned by the endpoint. Exactly one of `response` / `error` is
/// expected; `error` wins if both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// Side effect the endpoint says it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Deploy,
    Email,
}

impl Action {
    pub fn parse(s: &str) -> Option<Action> {
        match s {
            "deploy" => Some(Action::Deploy),
            "email" => Some(Action::Email),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Deploy => "deploy",
            Action::Email => "email",
        }
    }
}

/// A successful exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub action: Option<Action>,
}

impl TryFrom<AssistantReply> for Reply {
    type Error = AssistError;

    fn try_from(body: AssistantReply) -> Result<Reply> {
        if let Some(err) = body.error {
            return Err(AssistError::Remote(err));
        }
        let text = body.response.ok_or(AssistError::EmptyReply)?;
        let action = match body.action.as_deref() {
            Some(a) => {
                let parsed = Action::parse(a);
                if parsed.is_none() {
                    debug!(action = a, "ignoring unknown action");
                }
                parsed
            }
            None => None,
        };
        Ok(Reply { text, action })
    }
}

// ---------- HTTP client ----------
#[derive(Clone, Debug)]
pub struct AssistantClient {
    http: reqwest::Client,
    url: String,
}

impl AssistantClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One POST of `{command}`. No retry, no timeout.
    pub async fn send_command(&self, command: &str) -> Result<Reply> {
        let req = CommandRequest {
            command: command.to_string(),
        };
        debug!(url = %self.url, len = command.len(), "posting command");
        let resp = self.http.post(&self.url).json(&req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "assistant endpoint returned an error status");
            return Err(AssistError::Status(status.as_u16()));
        }

        let body: AssistantReply = resp.json().await?;
        Reply::try_from(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_wins_over_response() {
        let body = AssistantReply {
            response: Some("hi".into()),
            error: Some("boom".into()),
            action: None,
        };
        let err = Reply::try_from(body).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn empty_body_is_an_error() {
        let err = Reply::try_from(AssistantReply::default()).unwrap_err();
        assert!(matches!(err, AssistError::EmptyReply));
    }

    #[test]
    fn known_actions_are_parsed() {
        let body: AssistantReply =
            serde_json::from_str(r#"{"response":"ok","action":"deploy"}"#).unwrap();
        let reply = Reply::try_from(body).unwrap();
        assert_eq!(reply.action, Some(Action::Deploy));
    }

    #[test]
    fn unknown_action_is_dropped() {
        let body: AssistantReply =
            serde_json::from_str(r#"{"response":"ok","action":"launch"}"#).unwrap();
        assert_eq!(Reply::try_from(body).unwrap().action, None);
    }

    #[test]
    fn request_body_shape() {
        let json = serde_json::to_string(&CommandRequest {
            command: "hello".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"command":"hello"}"#);
    }
}
