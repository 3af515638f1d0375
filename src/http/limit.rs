//! In-flight request limit.
//!
//! Requests beyond the limit are shed with 503 instead of queueing.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Semaphore;

pub struct ConcurrencyLimiter {
    permits: Arc<Semaphore>,
    max: usize,
}

impl ConcurrencyLimiter {
    pub fn new(max: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max)),
            max,
        }
    }

    /// Requests currently in flight.
    pub fn in_flight(&self) -> usize {
        self.max - self.permits.available_permits()
    }
}

/// Middleware that holds a permit for the duration of each request.
pub async fn concurrency_limit(
    State(limiter): State<Arc<ConcurrencyLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match limiter.permits.clone().try_acquire_owned() {
        Ok(_permit) => next.run(request).await,
        Err(_) => {
            tracing::warn!(max = limiter.max, "Concurrency limit reached, shedding request");
            (StatusCode::SERVICE_UNAVAILABLE, "Gateway overloaded").into_response()
        }
    }
}
