use std::sync::Arc;

use vibecode_core::Orchestrator;

use crate::config::ServerConfig;
use crate::rate_limit::RateLimiter;

pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator, rate_limiter: RateLimiter) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            rate_limiter: Arc::new(rate_limiter),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        log::info!(
            "Rate limit: {} requests per {:?} per client",
            config.rate_limit_max_requests,
            config.rate_limit_window
        );
        Self::new(
            config.build_orchestrator(),
            RateLimiter::new(config.rate_limit_max_requests, config.rate_limit_window),
        )
    }
}
