use std::time::Duration;

use thiserror::Error;
use vibecode_core::UpstreamFailure;

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, LLMError>;

impl From<LLMError> for UpstreamFailure {
    fn from(err: LLMError) -> Self {
        match err {
            LLMError::Http(e) => UpstreamFailure::Transport(e.to_string()),
            LLMError::Json(e) => UpstreamFailure::Decode(e.to_string()),
            LLMError::Timeout(after) => UpstreamFailure::Timeout(after),
            LLMError::Api { status, body } => UpstreamFailure::Status { status, body },
            LLMError::Decode(msg) => UpstreamFailure::Decode(msg),
        }
    }
}
