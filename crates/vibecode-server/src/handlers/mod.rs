pub mod generate;
pub mod health;
pub mod suggest;

use chrono::{SecondsFormat, Utc};

use crate::error::AppError;

/// Current UTC time as RFC 3339 with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub async fn not_found() -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::NotFound)
}
