use async_trait::async_trait;

use crate::bundle::{CodeBundle, GenerationKind};
use crate::description::Description;
use crate::error::UpstreamFailure;

/// A validated generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub description: Description,
    pub kind: GenerationKind,
    /// Model override. `None` uses the provider's default.
    pub model: Option<String>,
}

impl GenerationRequest {
    pub fn new(description: Description) -> Self {
        Self {
            description,
            kind: GenerationKind::FullApp,
            model: None,
        }
    }

    pub fn with_kind(mut self, kind: GenerationKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model.filter(|m| !m.trim().is_empty());
        self
    }
}

/// A decoded upstream answer.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamOutput {
    pub bundle: CodeBundle,
    pub model: String,
    pub total_tokens: Option<u64>,
}

/// The remote AI service the orchestrator tries before falling back.
#[async_trait]
pub trait UpstreamProvider: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<UpstreamOutput, UpstreamFailure>;

    /// Review `code` and return advisory suggestions.
    async fn suggest(&self, code: &str, code_type: &str) -> Result<Vec<String>, UpstreamFailure>;
}
