pub mod bundle;
pub mod classifier;
pub mod description;
pub mod error;
pub mod orchestrator;
pub mod suggestions;
pub mod templates;
pub mod upstream;

pub use bundle::{CodeBundle, GenerationKind};
pub use classifier::{classify, TemplateName};
pub use description::{Description, MAX_DESCRIPTION_CHARS};
pub use error::{UpstreamFailure, ValidationError};
pub use orchestrator::{
    FallbackReason, GenerationResult, Orchestrator, Provenance, SuggestionResult,
    DEFAULT_UPSTREAM_TIMEOUT,
};
pub use suggestions::{mock_suggestions, MAX_SUGGESTIONS};
pub use templates::render;
pub use upstream::{GenerationRequest, UpstreamOutput, UpstreamProvider};
