use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use crate::error::AppError;
use crate::rate_limit::{RateLimitDecision, RateLimiter};

/// Rejects over-quota clients before the request body is read.
pub struct RateLimit {
    limiter: Arc<RateLimiter>,
}

impl RateLimit {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitService {
            service: Rc::new(service),
            limiter: Arc::clone(&self.limiter),
        }))
    }
}

pub struct RateLimitService<S> {
    service: Rc<S>,
    limiter: Arc<RateLimiter>,
}

impl<S, B> Service<ServiceRequest> for RateLimitService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let key = client_key(&req);

        match self.limiter.check(&key) {
            RateLimitDecision::Allowed { remaining } => {
                log::debug!("Rate limit ok for {} ({} left)", key, remaining);
                let service = Rc::clone(&self.service);
                Box::pin(async move {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                })
            }
            RateLimitDecision::Limited { retry_after_secs } => {
                log::warn!(
                    "Rate limit exceeded for {} on {}, retry after {}s",
                    key,
                    req.path(),
                    retry_after_secs
                );
                let response = AppError::RateLimited { retry_after_secs }.error_response();
                Box::pin(ready(Ok(req.into_response(response).map_into_right_body())))
            }
        }
    }
}

/// Peer IP of the connection. Forwarding headers are ignored.
fn client_key(req: &ServiceRequest) -> String {
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use std::time::Duration;

    #[actix_web::test]
    async fn test_limit_applies_per_peer() {
        let limiter = Arc::new(RateLimiter::new(1, Duration::from_secs(60)));
        let app = test::init_service(
            App::new()
                .wrap(RateLimit::new(limiter))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let from = |ip: &str| {
            test::TestRequest::get()
                .uri("/")
                .peer_addr(format!("{ip}:5000").parse().unwrap())
                .to_request()
        };

        assert_eq!(test::call_service(&app, from("10.0.0.1")).await.status(), StatusCode::OK);
        assert_eq!(
            test::call_service(&app, from("10.0.0.1")).await.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(test::call_service(&app, from("10.0.0.2")).await.status(), StatusCode::OK);
    }
}
