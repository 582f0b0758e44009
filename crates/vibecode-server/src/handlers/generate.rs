use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use vibecode_core::{classify, render, CodeBundle, GenerationKind, GenerationResult};

use super::timestamp;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub data: CodeBundle,
    pub source: &'static str,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u64>,
}

impl From<GenerationResult> for GenerateResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            success: true,
            source: result.provenance.as_source(),
            data: result.bundle,
            timestamp: timestamp(),
            model: result.model,
            tokens: result.total_tokens,
        }
    }
}

pub async fn handler(
    state: web::Data<AppState>,
    body: web::Json<GenerateRequest>,
) -> Result<HttpResponse, AppError> {
    let GenerateRequest {
        description,
        kind,
        model,
    } = body.into_inner();
    let kind = GenerationKind::parse(kind.as_deref());

    log::info!(
        "Generate request: kind={}, {} chars",
        kind,
        description.chars().count()
    );

    let orchestrator = Arc::clone(&state.orchestrator);
    let task_description = description.clone();
    let task = tokio::spawn(async move {
        orchestrator
            .generate(&task_description, kind, model)
            .await
    });

    match task.await {
        Ok(Ok(result)) => Ok(HttpResponse::Ok().json(GenerateResponse::from(result))),
        Ok(Err(invalid)) => {
            log::debug!("Rejected generate request: {}", invalid);
            Err(invalid.into())
        }
        Err(join_error) => {
            log::error!("Generation task failed: {}", join_error);
            Err(AppError::Internal {
                message: "An unexpected error occurred while generating code".to_string(),
                fallback: render(classify(&description), &description),
            })
        }
    }
}
