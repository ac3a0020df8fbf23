//! Health check handlers for Kubernetes probes.
//!
//! The route service is stateless (no dataset to preload), so both probes
//! report readiness from build metadata alone.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator, "ok" when serving.
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,
}

impl HealthStatus {
    /// Create a healthy status.
    pub fn ok(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
        }
    }
}

fn service_name() -> String {
    std::env::var("SERVICE_NAME").unwrap_or_else(|_| env!("CARGO_PKG_NAME").to_string())
}

/// Liveness probe handler.
///
/// Returns 200 OK while the process is running.
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::ok(&service_name(), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Returns 200 OK once the service is accepting traffic. The router computes
/// everything per request from the request body, so readiness has no
/// external dependency to check.
pub async fn health_ready() -> impl IntoResponse {
    let status = HealthStatus::ok(&service_name(), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}
