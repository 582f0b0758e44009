use std::time::Duration;

use thiserror::Error;

/// Input rejected before any generation work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Description is required and cannot be empty")]
    EmptyDescription,

    #[error("Description is too long. Maximum {max} characters allowed.")]
    DescriptionTooLong { max: usize, actual: usize },

    #[error("Code is required for suggestions")]
    EmptyCode,
}

/// Why an upstream attempt did not produce a bundle.
///
/// These never reach the caller verbatim; the orchestrator logs them and
/// falls back to the template library.
#[derive(Debug, Error)]
pub enum UpstreamFailure {
    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),

    #[error("upstream transport error: {0}")]
    Transport(String),

    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("upstream payload could not be decoded: {0}")]
    Decode(String),
}

impl UpstreamFailure {
    pub fn reason(&self) -> crate::FallbackReason {
        use crate::FallbackReason;
        match self {
            Self::Timeout(_) => FallbackReason::Timeout,
            Self::Transport(_) => FallbackReason::Transport,
            Self::Status { status, .. } => FallbackReason::Status(*status),
            Self::Decode(_) => FallbackReason::Decode,
        }
    }
}
