// Error types for the secretserver client.
// Covers configuration, authentication, remote fetch, and cache I/O failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecretServerError {
    #[error("missing required configuration field: {0}")]
    Configuration(&'static str),

    #[error("authentication failed after {attempts} attempts")]
    Authentication { attempts: usize },

    #[error("secret server reported an error: {0}")]
    Remote(String),

    #[error("file download for item {item_id} failed after {attempts} attempts")]
    FileRetrieval { item_id: i64, attempts: usize },

    #[error("secret {0} not found in any source")]
    SecretNotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("base64 decoding error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SecretServerError>;

impl SecretServerError {
    /// Whether the failure is soft from the orchestrator's point of view:
    /// the fallback chain may keep going instead of surfacing it.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            Self::Remote(_)
                | Self::FileRetrieval { .. }
                | Self::Http(_)
                | Self::Json(_)
                | Self::Decode(_)
        )
    }
}
