pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod rate_limit;
pub mod server;
pub mod state;

pub use config::{Cli, ServerConfig};
pub use error::AppError;
pub use rate_limit::{RateLimitDecision, RateLimiter};
pub use server::{app_config, run};
pub use state::AppState;
