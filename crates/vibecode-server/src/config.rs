use std::sync::Arc;
use std::time::Duration;

use actix_web::http::Uri;
use clap::Parser;
use vibecode_core::{Orchestrator, UpstreamProvider};
use vibecode_llm::{ApiKey, OpenAIProvider};

#[derive(Parser, Debug, Clone)]
#[command(name = "vibecode-server")]
#[command(about = "VibeCode AI code generation server")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,

    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(long, env = "PORT", default_value = "3001")]
    pub port: u16,

    /// OpenAI API key. Without a usable key the server runs in mock mode.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub openai_base_url: String,

    /// Default model for generation
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4")]
    pub openai_model: String,

    /// Comma-separated list of allowed CORS origins
    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:8000"
    )]
    pub allowed_origins: Vec<String>,

    /// Requests allowed per client per window (0 disables limiting)
    #[arg(long, env = "RATE_LIMIT_MAX_REQUESTS", default_value = "50")]
    pub rate_limit_max_requests: u32,

    /// Rate limit window length in seconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_SECS", default_value = "900")]
    pub rate_limit_window_secs: u64,

    /// Upper bound on a single upstream call, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value = "60")]
    pub upstream_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub allowed_origins: Vec<String>,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window: Duration,
    pub upstream_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            api_key: None,
            base_url: vibecode_llm::providers::openai::DEFAULT_BASE_URL.to_string(),
            model: vibecode_llm::providers::openai::DEFAULT_MODEL.to_string(),
            allowed_origins: vec!["http://localhost:8000".to_string()],
            rate_limit_max_requests: 50,
            rate_limit_window: Duration::from_secs(900),
            upstream_timeout: Duration::from_secs(60),
        }
    }
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            api_key: cli.openai_api_key,
            base_url: cli.openai_base_url,
            model: cli.openai_model,
            allowed_origins: cli
                .allowed_origins
                .into_iter()
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .filter(|origin| {
                    let valid = is_valid_origin(origin);
                    if !valid {
                        log::warn!("Ignoring invalid CORS origin '{}'", origin);
                    }
                    valid
                })
                .collect(),
            rate_limit_max_requests: cli.rate_limit_max_requests,
            rate_limit_window: Duration::from_secs(cli.rate_limit_window_secs.max(1)),
            upstream_timeout: Duration::from_secs(cli.upstream_timeout_secs.max(1)),
        }
    }
}

/// `*` or an absolute origin such as `https://app.example.com`. Anything else
/// would make the CORS middleware fail when a worker starts.
fn is_valid_origin(origin: &str) -> bool {
    if origin == "*" {
        return true;
    }
    origin
        .parse::<Uri>()
        .map(|uri| uri.scheme().is_some() && uri.host().is_some())
        .unwrap_or(false)
}

impl ServerConfig {
    /// The upstream provider, if the configured key is usable.
    pub fn upstream_provider(&self) -> Option<Arc<dyn UpstreamProvider>> {
        match ApiKey::parse(self.api_key.as_deref()) {
            Ok(key) => {
                log::info!("OpenAI key {} accepted, model {}", key.masked(), self.model);
                let provider: Arc<dyn UpstreamProvider> = Arc::new(
                    OpenAIProvider::new(key)
                        .with_base_url(self.base_url.clone())
                        .with_model(self.model.clone())
                        .with_timeout(self.upstream_timeout),
                );
                Some(provider)
            }
            Err(reason) => {
                log::info!("OpenAI disabled ({}), serving templates only", reason);
                None
            }
        }
    }

    pub fn build_orchestrator(&self) -> Orchestrator {
        Orchestrator::new(self.upstream_provider()).with_upstream_timeout(self.upstream_timeout)
    }

    pub fn mode_label(&self) -> &'static str {
        if ApiKey::parse(self.api_key.as_deref()).is_ok() {
            "OpenAI Enabled"
        } else {
            "Mock AI Mode"
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
