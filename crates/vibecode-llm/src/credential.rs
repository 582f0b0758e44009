//! Upstream credential parsing.
//!
//! A bad key is caught here, before any request is built, so a misconfigured
//! deployment goes straight to the template fallback.

use thiserror::Error;

/// Value shipped in sample `.env` files. Treated the same as no key.
pub const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("no API key configured")]
    Missing,

    #[error("API key is the sample placeholder")]
    Placeholder,

    #[error("API key contains whitespace or control characters")]
    Malformed,
}

#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn parse(raw: Option<&str>) -> Result<Self, CredentialError> {
        let key = raw.map(str::trim).unwrap_or_default();

        if key.is_empty() {
            return Err(CredentialError::Missing);
        }
        if key == PLACEHOLDER_API_KEY {
            return Err(CredentialError::Placeholder);
        }
        // Must be usable as a bearer header value.
        if !key.chars().all(|c| c.is_ascii_graphic()) {
            return Err(CredentialError::Malformed);
        }

        Ok(Self(key.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First three and last four characters, for logs.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "****".to_string();
        }
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}
