use std::sync::Arc;
use std::time::Instant;

use actix_cors::Cors;
use actix_web::{
    error::JsonPayloadError,
    http::header::{self, HeaderName},
    middleware::DefaultHeaders,
    web, App, HttpServer,
};

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::handlers;
use crate::middleware::{RateLimit, TracingMiddleware, TRACE_ID_HEADER};
use crate::rate_limit::{RateLimiter, SWEEP_INTERVAL};
use crate::state::AppState;

pub const JSON_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Routes, body limits and the 404 fallback. Wrapping middleware is added by
/// the caller.
///
/// The limiter sits on the two generation resources only, so unmatched paths
/// under `/api` fall through to the 404 without spending a token.
pub fn app_config(cfg: &mut web::ServiceConfig, state: web::Data<AppState>) {
    let limiter = Arc::clone(&state.rate_limiter);

    cfg.app_data(state)
        .app_data(json_config())
        .route("/health", web::get().to(handlers::health::handler))
        .service(
            web::scope("/api")
                .service(
                    web::resource("/generate")
                        .wrap(RateLimit::new(Arc::clone(&limiter)))
                        .route(web::post().to(handlers::generate::handler)),
                )
                .service(
                    web::resource("/suggest")
                        .wrap(RateLimit::new(limiter))
                        .route(web::post().to(handlers::suggest::handler)),
                ),
        )
        .default_service(web::to(handlers::not_found));
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, req| {
            log::warn!("Rejected JSON body on {}: {}", req.path(), err);
            let message = match &err {
                JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                    "Request body is too large".to_string()
                }
                JsonPayloadError::ContentType => "Expected an application/json body".to_string(),
                other => other.to_string(),
            };
            AppError::Validation(message).into()
        })
}

pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "SAMEORIGIN"))
        .add(("Referrer-Policy", "no-referrer"))
        .add(("X-DNS-Prefetch-Control", "off"))
        .add(("Cross-Origin-Resource-Policy", "same-origin"))
}

pub fn cors(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(TRACE_ID_HEADER),
        ])
        .expose_headers(vec![HeaderName::from_static(TRACE_ID_HEADER)])
        .supports_credentials()
        .max_age(3600);

    for origin in allowed_origins {
        cors = if origin == "*" {
            cors.allow_any_origin()
        } else {
            cors.allowed_origin(origin)
        };
    }
    cors
}

fn spawn_rate_limit_sweeper(limiter: Arc<RateLimiter>) {
    actix_web::rt::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = limiter.sweep_expired(Instant::now());
            if removed > 0 {
                log::debug!(
                    "Swept {} expired rate limit windows, {} active",
                    removed,
                    limiter.tracked_clients()
                );
            }
        }
    });
}

pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(AppState::from_config(&config));
    spawn_rate_limit_sweeper(Arc::clone(&state.rate_limiter));

    let origins = config.allowed_origins.clone();
    log::info!("Allowed origins: {}", origins.join(", "));

    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(cors(&origins))
            .wrap(security_headers())
            .wrap(TracingMiddleware)
            .configure(move |cfg| app_config(cfg, state))
    })
    .bind(config.bind_address())?
    .run();

    log::info!("Listening on http://{}", config.bind_address());
    server.await
}
