//! Crate-level error type.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between the client, its storage and the
/// assistant endpoint.
///
/// `Display` is what ends up in the chat log after the `Error: ` prefix, so
/// each message is written for the person at the keyboard.
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("Please configure your DeepSeek API key first")]
    MissingCredential,

    #[error("API error: {0}")]
    Status(u16),

    #[error("{0}")]
    Remote(String),

    #[error("endpoint returned neither a response nor an error")]
    EmptyReply,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not access {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unable to resolve {0} directory")]
    NoProjectDir(&'static str),
}

pub type Result<T> = std::result::Result<T, AssistError>;

impl AssistError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AssistError::Storage {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_reads_like_the_chat_message() {
        assert_eq!(AssistError::Status(502).to_string(), "API error: 502");
    }

    #[test]
    fn remote_error_is_passed_through_untouched() {
        let e = AssistError::Remote("quota exceeded".to_string());
        assert_eq!(e.to_string(), "quota exceeded");
    }

    #[test]
    fn storage_error_names_the_path() {
        let e = AssistError::storage(
            "/tmp/x.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(e.to_string().contains("/tmp/x.json"));
    }
}
