use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use vibecode_core::{GenerationRequest, UpstreamFailure, UpstreamOutput, UpstreamProvider};

use crate::credential::ApiKey;
use crate::decode::{decode_bundle, decode_suggestions};
use crate::error::{LLMError, Result};
use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::prompts;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest error body kept for logs.
const ERROR_BODY_LIMIT: usize = 512;

pub struct OpenAIProvider {
    client: Client,
    api_key: ApiKey,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAIProvider {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn chat_completion(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        log::debug!(
            "POST {} model={} max_tokens={}",
            self.endpoint(),
            request.model,
            request.max_tokens
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose())
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LLMError::Api {
                status: status.as_u16(),
                body: truncate(&body, ERROR_BODY_LIMIT),
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        Ok(serde_json::from_str(&body)?)
    }

    fn transport_error(&self, err: reqwest::Error) -> LLMError {
        if err.is_timeout() {
            LLMError::Timeout(self.timeout)
        } else {
            LLMError::Http(err)
        }
    }
}

#[async_trait]
impl UpstreamProvider for OpenAIProvider {
    async fn generate(&self, request: &GenerationRequest) -> std::result::Result<UpstreamOutput, UpstreamFailure> {
        let model = request.model.as_deref().unwrap_or(&self.model);
        if request.model.is_some() {
            log::debug!(
                "OpenAI provider using override model '{}' (default: '{}')",
                model,
                self.model
            );
        }

        let body = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage::system(prompts::system_prompt(request.kind)),
                ChatMessage::user(prompts::user_prompt(request.kind, request.description.as_str())),
            ],
            max_tokens: prompts::GENERATE_MAX_TOKENS,
            temperature: prompts::GENERATE_TEMPERATURE,
        };

        let response = self.chat_completion(&body).await?;
        let content = response
            .first_content()
            .ok_or_else(|| LLMError::Decode("response contained no message content".to_string()))?;
        let bundle = decode_bundle(request.kind, content)?;

        Ok(UpstreamOutput {
            bundle,
            model: response.model.clone().unwrap_or_else(|| model.to_string()),
            total_tokens: response.usage.and_then(|u| u.total_tokens),
        })
    }

    async fn suggest(&self, code: &str, code_type: &str) -> std::result::Result<Vec<String>, UpstreamFailure> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(prompts::suggest_system_prompt()),
                ChatMessage::user(prompts::suggest_user_prompt(code_type, code)),
            ],
            max_tokens: prompts::SUGGEST_MAX_TOKENS,
            temperature: prompts::SUGGEST_TEMPERATURE,
        };

        let response = self.chat_completion(&body).await?;
        let content = response
            .first_content()
            .ok_or_else(|| LLMError::Decode("response contained no message content".to_string()))?;

        Ok(decode_suggestions(content)?)
    }
}

fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
