//! `/health/live` and `/health/ready` for the orchestrator.
//!
//! `main` flips readiness once the listener is bound and flips liveness off
//! after the server future resolves. With a pool attached, readiness also
//! requires PostgreSQL to answer `SELECT 1`. Probe answers are never cached.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use tracing::warn;

use crate::outbound::persistence::DbPool;

/// Probe flags shared between `main` and the handlers.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    pool: Option<DbPool>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthState {
    /// Alive but not yet ready.
    pub fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            pool: None,
        }
    }

    pub fn with_pool(self, pool: DbPool) -> Self {
        Self {
            pool: Some(pool),
            ..self
        }
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    async fn database_answers(&self) -> bool {
        let Some(pool) = &self.pool else {
            return true;
        };
        pool.ping()
            .await
            .inspect_err(|err| warn!(error = %err, "readiness probe: database unreachable"))
            .is_ok()
    }
}

fn probe(passing: bool) -> HttpResponse {
    let mut builder = if passing {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Accepting traffic"),
        (status = 503, description = "Still starting, or PostgreSQL is unreachable")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_ready() && state.database_answers().await)
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Process is serving"),
        (status = 503, description = "Shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_alive())
}
