//! Shared infrastructure for skymesh HTTP microservices.
//!
//! This crate provides the glue used by the service containers:
//!
//! - [`logging`]: Structured JSON logging setup
//! - [`metrics`]: Prometheus metrics infrastructure and business metrics
//! - [`middleware`]: Request tracking and HTTP metrics middleware
//! - [`ProblemDetails`]: RFC 9457 Problem Details for malformed input
//! - Wire request types with validation
//! - Health check handlers for Kubernetes liveness/readiness probes
//!
//! # Architecture
//!
//! The services follow a thin-handler pattern where all routing logic lives
//! in `skymesh-lib`; handlers parse the request JSON, validate parameters,
//! call the library, and format the outcome. Logical routing failures (no
//! path, unknown endpoint) are successful HTTP responses with `ok: false`;
//! only malformed input becomes a problem response.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_route_computed, record_route_failed, record_route_hops,
    MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
};
pub use request::{DroneSpec, RouteRequest, Validate};
