pub mod rate_limit;
pub mod tracing_middleware;

pub use rate_limit::RateLimit;
pub use tracing_middleware::{extract_trace_id, TraceId, TracingMiddleware, TRACE_ID_HEADER};
