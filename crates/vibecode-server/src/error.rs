use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use vibecode_core::{CodeBundle, ValidationError};

pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited { retry_after_secs: u64 },

    #[error("{message}")]
    Internal {
        message: String,
        fallback: CodeBundle,
    },

    #[error("The requested endpoint does not exist")]
    NotFound,
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[derive(Serialize)]
struct ClientError<'a> {
    error: &'a str,
    message: String,
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    retry_after: Option<u64>,
}

#[derive(Serialize)]
struct FailureBody<'a> {
    success: bool,
    error: &'a str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback: Option<&'a CodeBundle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            AppError::Validation(message) => builder.json(ClientError {
                error: "Invalid input",
                message: message.clone(),
                retry_after: None,
            }),
            AppError::RateLimited { retry_after_secs } => builder
                .insert_header(("Retry-After", retry_after_secs.to_string()))
                .json(ClientError {
                    error: "Too many requests",
                    message: self.to_string(),
                    retry_after: Some(*retry_after_secs),
                }),
            AppError::Internal { message, fallback } => builder.json(FailureBody {
                success: false,
                error: "Code generation failed",
                message: message.clone(),
                fallback: Some(fallback),
                timestamp: Some(crate::handlers::timestamp()),
            }),
            AppError::NotFound => builder.json(FailureBody {
                success: false,
                error: "Not found",
                message: self.to_string(),
                fallback: None,
                timestamp: None,
            }),
        }
    }
}
