pub mod credential;
pub mod decode;
pub mod error;
pub mod models;
pub mod prompts;
pub mod providers;

pub use credential::{ApiKey, CredentialError, PLACEHOLDER_API_KEY};
pub use error::LLMError;
pub use providers::OpenAIProvider;
