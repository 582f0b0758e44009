//! The generation fallback cascade.
//!
//! ```text
//! Idle ──validate──> AwaitingUpstream ──ok──> Succeeded(upstream)
//!   │                      │
//!   │                      └─any failure──> AwaitingFallback ──> Succeeded(fallback)
//!   └──invalid──> Failed
//! ```
//!
//! Validation is the only way a request can fail. Once the fallback branch is
//! taken the result is always produced, because classification and template
//! rendering are total.

use std::sync::Arc;
use std::time::Duration;

use crate::bundle::{CodeBundle, GenerationKind};
use crate::classifier::{classify, TemplateName};
use crate::description::Description;
use crate::error::{UpstreamFailure, ValidationError};
use crate::suggestions::{mock_suggestions, normalize_suggestions};
use crate::templates::render;
use crate::upstream::{GenerationRequest, UpstreamOutput, UpstreamProvider};

pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(60);

/// Where a bundle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Upstream,
    Fallback,
}

impl Provenance {
    /// The `source` value reported to HTTP callers.
    pub fn as_source(&self) -> &'static str {
        match self {
            Self::Upstream => "openai",
            Self::Fallback => "mock",
        }
    }
}

/// Why the cascade left the upstream branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No usable credential; the upstream was never contacted.
    NotConfigured,
    Timeout,
    Transport,
    Status(u16),
    Decode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub bundle: CodeBundle,
    pub provenance: Provenance,
    pub model: Option<String>,
    pub total_tokens: Option<u64>,
    /// Template picked by the classifier. Only set on fallback.
    pub template: Option<TemplateName>,
    pub fallback_reason: Option<FallbackReason>,
}

impl GenerationResult {
    fn upstream(output: UpstreamOutput) -> Self {
        Self {
            bundle: output.bundle,
            provenance: Provenance::Upstream,
            model: Some(output.model),
            total_tokens: output.total_tokens,
            template: None,
            fallback_reason: None,
        }
    }

    /// Classify and render locally. Cannot fail.
    pub fn fallback(description: &str, reason: FallbackReason) -> Self {
        let template = classify(description);
        Self {
            bundle: render(template, description),
            provenance: Provenance::Fallback,
            model: None,
            total_tokens: None,
            template: Some(template),
            fallback_reason: Some(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionResult {
    pub suggestions: Vec<String>,
    pub provenance: Provenance,
}

pub struct Orchestrator {
    upstream: Option<Arc<dyn UpstreamProvider>>,
    upstream_timeout: Duration,
}

impl Orchestrator {
    /// `None` runs in template-only mode.
    pub fn new(upstream: Option<Arc<dyn UpstreamProvider>>) -> Self {
        Self {
            upstream,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }

    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    pub fn is_upstream_configured(&self) -> bool {
        self.upstream.is_some()
    }

    /// Validate raw request fields, then run the cascade.
    pub async fn generate(
        &self,
        description: &str,
        kind: GenerationKind,
        model: Option<String>,
    ) -> Result<GenerationResult, ValidationError> {
        let description = Description::parse(description)?;
        let request = GenerationRequest::new(description)
            .with_kind(kind)
            .with_model(model);
        Ok(self.run(request).await)
    }

    pub async fn run(&self, request: GenerationRequest) -> GenerationResult {
        match self.attempt_upstream(&request).await {
            Ok(output) => {
                log::info!(
                    "Generated {} bundle upstream with model {}",
                    request.kind,
                    output.model
                );
                GenerationResult::upstream(output)
            }
            Err(reason) => {
                let result = GenerationResult::fallback(request.description.as_str(), reason);
                if let Some(template) = result.template {
                    log::info!("Falling back to {} template ({:?})", template, reason);
                }
                result
            }
        }
    }

    async fn attempt_upstream(
        &self,
        request: &GenerationRequest,
    ) -> Result<UpstreamOutput, FallbackReason> {
        let Some(provider) = &self.upstream else {
            log::debug!("No upstream credential configured, skipping remote generation");
            return Err(FallbackReason::NotConfigured);
        };

        let failure = match tokio::time::timeout(self.upstream_timeout, provider.generate(request)).await {
            Ok(Ok(output)) => return Ok(output),
            Ok(Err(failure)) => failure,
            Err(_) => UpstreamFailure::Timeout(self.upstream_timeout),
        };

        log::warn!("Upstream generation failed: {}", failure);
        Err(failure.reason())
    }

    pub async fn suggest(
        &self,
        code: &str,
        code_type: &str,
    ) -> Result<SuggestionResult, ValidationError> {
        if code.trim().is_empty() {
            return Err(ValidationError::EmptyCode);
        }

        let mock = || SuggestionResult {
            suggestions: mock_suggestions(),
            provenance: Provenance::Fallback,
        };

        let Some(provider) = &self.upstream else {
            return Ok(mock());
        };

        match tokio::time::timeout(self.upstream_timeout, provider.suggest(code, code_type)).await {
            Ok(Ok(suggestions)) => Ok(SuggestionResult {
                suggestions: normalize_suggestions(suggestions),
                provenance: Provenance::Upstream,
            }),
            Ok(Err(failure)) => {
                log::warn!("Upstream suggestions failed: {}", failure);
                Ok(mock())
            }
            Err(_) => {
                log::warn!(
                    "Upstream suggestions timed out after {:?}",
                    self.upstream_timeout
                );
                Ok(mock())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behavior {
        Succeed,
        Fail(fn() -> UpstreamFailure),
        Hang,
    }

    struct ScriptedProvider {
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl UpstreamProvider for ScriptedProvider {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<UpstreamOutput, UpstreamFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Succeed => Ok(UpstreamOutput {
                    bundle: CodeBundle::new("<h1>remote</h1>", "h1{}", ""),
                    model: request.model.clone().unwrap_or_else(|| "gpt-4".to_string()),
                    total_tokens: Some(42),
                }),
                Behavior::Fail(make) => Err(make()),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    unreachable!()
                }
            }
        }

        async fn suggest(&self, _code: &str, _code_type: &str) -> Result<Vec<String>, UpstreamFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Succeed => Ok(vec!["Use semantic tags".to_string()]),
                Behavior::Fail(make) => Err(make()),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    unreachable!()
                }
            }
        }
    }

    fn orchestrator_with(provider: Arc<ScriptedProvider>) -> Orchestrator {
        Orchestrator::new(Some(provider as Arc<dyn UpstreamProvider>))
            .with_upstream_timeout(Duration::from_millis(50))
    }

    #[tokio::test]
    async fn upstream_success_reports_model_and_tokens() {
        let provider = ScriptedProvider::new(Behavior::Succeed);
        let orchestrator = orchestrator_with(provider.clone());

        let result = orchestrator
            .generate("a todo list", GenerationKind::FullApp, Some("gpt-4o".to_string()))
            .await
            .unwrap();

        assert_eq!(result.provenance, Provenance::Upstream);
        assert_eq!(result.model.as_deref(), Some("gpt-4o"));
        assert_eq!(result.total_tokens, Some(42));
        assert_eq!(result.template, None);
        assert_eq!(result.bundle.markup, "<h1>remote</h1>");
    }

    #[tokio::test]
    async fn every_upstream_failure_falls_back() {
        let failures: [fn() -> UpstreamFailure; 3] = [
            || UpstreamFailure::Transport("connection refused".to_string()),
            || UpstreamFailure::Status {
                status: 500,
                body: "boom".to_string(),
            },
            || UpstreamFailure::Decode("not json".to_string()),
        ];

        for make in failures {
            let expected = make().reason();
            let orchestrator = orchestrator_with(ScriptedProvider::new(Behavior::Fail(make)));

            let result = orchestrator
                .generate("a calculator", GenerationKind::FullApp, None)
                .await
                .unwrap();

            assert_eq!(result.provenance, Provenance::Fallback);
            assert_eq!(result.fallback_reason, Some(expected));
            assert_eq!(result.template, Some(TemplateName::Calculator));
            assert!(!result.bundle.markup.is_empty());
        }
    }

    #[tokio::test]
    async fn hanging_upstream_times_out_into_fallback() {
        let orchestrator = orchestrator_with(ScriptedProvider::new(Behavior::Hang));

        let result = orchestrator
            .generate("weather", GenerationKind::FullApp, None)
            .await
            .unwrap();

        assert_eq!(result.fallback_reason, Some(FallbackReason::Timeout));
        assert_eq!(result.template, Some(TemplateName::WeatherApp));
    }

    #[tokio::test]
    async fn missing_upstream_never_calls_out() {
        let orchestrator = Orchestrator::new(None);

        let result = orchestrator
            .generate("build a dark mode todo list", GenerationKind::FullApp, None)
            .await
            .unwrap();

        assert_eq!(result.provenance, Provenance::Fallback);
        assert_eq!(result.fallback_reason, Some(FallbackReason::NotConfigured));
        assert_eq!(result.template, Some(TemplateName::TodoApp));
        assert!(result.bundle.markup.contains(crate::templates::DARK_THEME_CLASS));
    }

    #[tokio::test]
    async fn validation_failure_skips_upstream() {
        let provider = ScriptedProvider::new(Behavior::Succeed);
        let orchestrator = orchestrator_with(provider.clone());

        let empty = orchestrator.generate("   ", GenerationKind::FullApp, None).await;
        let long = orchestrator
            .generate(&"x".repeat(2001), GenerationKind::FullApp, None)
            .await;

        assert_eq!(empty, Err(ValidationError::EmptyDescription));
        assert!(matches!(long, Err(ValidationError::DescriptionTooLong { .. })));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_model_override_is_ignored() {
        let orchestrator = orchestrator_with(ScriptedProvider::new(Behavior::Succeed));

        let result = orchestrator
            .generate("app", GenerationKind::Html, Some("  ".to_string()))
            .await
            .unwrap();

        assert_eq!(result.model.as_deref(), Some("gpt-4"));
    }

    #[tokio::test]
    async fn suggestions_fall_back_to_mock_list() {
        let orchestrator = orchestrator_with(ScriptedProvider::new(Behavior::Fail(|| {
            UpstreamFailure::Decode("bad".to_string())
        })));

        let result = orchestrator.suggest("<div></div>", "fullApp").await.unwrap();

        assert_eq!(result.provenance, Provenance::Fallback);
        assert_eq!(result.suggestions, mock_suggestions());
    }

    #[tokio::test]
    async fn suggestions_from_upstream() {
        let orchestrator = orchestrator_with(ScriptedProvider::new(Behavior::Succeed));

        let result = orchestrator.suggest("<div></div>", "html").await.unwrap();

        assert_eq!(result.provenance, Provenance::Upstream);
        assert_eq!(result.suggestions, vec!["Use semantic tags"]);
    }

    #[tokio::test]
    async fn suggestions_require_code() {
        let orchestrator = Orchestrator::new(None);
        assert_eq!(
            orchestrator.suggest(" ", "general").await,
            Err(ValidationError::EmptyCode)
        );
    }
}
