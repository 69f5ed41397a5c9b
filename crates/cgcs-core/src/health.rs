use std::time::Instant;

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Process start time. Services expose it through `FromRef` on their state.
#[derive(Debug, Clone, Copy)]
pub struct StartedAt(pub Instant);

impl StartedAt {
    pub fn now() -> Self {
        Self(Instant::now())
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub message: &'static str,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub timestamp: DateTime<Utc>,
    /// Seconds since the process started.
    pub uptime: f64,
}

impl HealthReport {
    pub fn new(started_at: StartedAt, now: DateTime<Utc>) -> Self {
        Self {
            status: "ok",
            message: "CGCS API is running",
            timestamp: now,
            uptime: started_at.0.elapsed().as_secs_f64(),
        }
    }
}

/// Liveness check with uptime.
pub async fn health(State(started_at): State<StartedAt>) -> Json<HealthReport> {
    Json(HealthReport::new(started_at, Utc::now()))
}
