use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use super::timestamp;
use crate::error::AppError;
use crate::state::AppState;

fn default_code_type() -> String {
    "general".to_string()
}

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub code: String,
    #[serde(rename = "type", default = "default_code_type")]
    pub code_type: String,
}

#[derive(Debug, Serialize)]
struct SuggestResponse {
    success: bool,
    suggestions: Vec<String>,
    source: &'static str,
    timestamp: String,
}

pub async fn handler(
    state: web::Data<AppState>,
    body: web::Json<SuggestRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    log::info!(
        "Suggest request: type={}, {} chars",
        request.code_type,
        request.code.len()
    );

    let result = state
        .orchestrator
        .suggest(&request.code, &request.code_type)
        .await?;

    Ok(HttpResponse::Ok().json(SuggestResponse {
        success: true,
        suggestions: result.suggestions,
        source: result.provenance.as_source(),
        timestamp: timestamp(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_defaults_to_general() {
        let request: SuggestRequest = serde_json::from_str(r#"{"code":"<p>hi</p>"}"#).unwrap();
        assert_eq!(request.code_type, "general");
    }

    #[test]
    fn test_explicit_type_is_kept() {
        let request: SuggestRequest =
            serde_json::from_str(r#"{"code":"a{}","type":"css"}"#).unwrap();
        assert_eq!(request.code_type, "css");
    }
}
