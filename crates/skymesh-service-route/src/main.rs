//! Skymesh relay routing HTTP microservice.
//!
//! Answers whether a multi-hop relay path exists between two nodes of an
//! ad-hoc aerial mesh, and with what link-quality metrics. Each request
//! carries the full drone roster and range budgets; nothing persists between
//! calls.
//!
//! # Endpoints
//!
//! - `POST /api/v1/route` - Compute a relay route across the mesh
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe
//!
//! # Configuration
//!
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text

use std::env;
use std::net::SocketAddr;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use skymesh_lib::{compute_route, Error as LibError, RouteMetrics, RoutePlan};
use skymesh_service_shared::{
    from_lib_error, health_live, health_ready, init_logging, init_metrics, metrics_handler,
    record_route_computed, record_route_failed, record_route_hops, LoggingConfig, MetricsConfig,
    MetricsLayer, ProblemDetails, RequestId, RouteRequest, Validate,
};

/// Routing outcome returned to the caller.
///
/// Logical failures (unknown endpoint, no path) are still HTTP 200: `ok` is
/// false, `path` is empty, and `reason` explains why. Only malformed input
/// gets a problem response instead.
#[derive(Debug, Serialize)]
struct RouteResponse {
    ok: bool,
    path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<RouteMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl RouteResponse {
    fn success(plan: &RoutePlan) -> Self {
        Self {
            ok: true,
            path: plan.path.clone(),
            metrics: Some(plan.metrics),
            reason: None,
        }
    }

    fn failure(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            path: Vec::new(),
            metrics: None,
            reason: Some(reason.into()),
        }
    }
}

/// HTTP response - either a routing outcome or an RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response {
    Outcome(RouteResponse),
    Problem(ProblemDetails),
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Outcome(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
            Response::Problem(problem) => problem.into_response(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("route");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional; keep serving without them.
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    info!(port = port, "starting route service");

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app()).await?;

    Ok(())
}

/// Build the service router.
fn app() -> Router {
    Router::new()
        .route("/api/v1/route", post(route_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(MetricsLayer)
        .layer(CorsLayer::permissive())
}

/// Handle POST /api/v1/route requests.
async fn route_handler(Json(request): Json<RouteRequest>) -> Response {
    let request_id = RequestId::generate();

    info!(
        request_id = %request_id,
        src = %request.src,
        dst = %request.dst,
        drones = request.drones.len(),
        weighted = request.weighted,
        "handling route request"
    );

    if let Err(problem) = request.validate(request_id.as_str()) {
        record_route_failed("validation_error");
        return Response::Problem(*problem);
    }

    let lib_request = request.to_lib_request();
    let mode = lib_request.mode.to_string();

    let plan = match compute_route(&lib_request) {
        Ok(plan) => plan,
        Err(err) => {
            error!(request_id = %request_id, error = %err, "route computation failed");
            return match err {
                LibError::NodeNotFound { .. } => {
                    record_route_failed("node_not_found");
                    Response::Outcome(RouteResponse::failure(err.to_string()))
                }
                LibError::NoPathFound { .. } => {
                    record_route_failed("no_path");
                    Response::Outcome(RouteResponse::failure("no path"))
                }
                LibError::DuplicateDroneId { .. } | LibError::ReservedDroneId { .. } => {
                    record_route_failed("invalid_roster");
                    Response::Problem(from_lib_error(&err, request_id.as_str()))
                }
            };
        }
    };

    record_route_computed(&mode);
    record_route_hops(plan.metrics.hops, &mode);

    info!(
        request_id = %request_id,
        hops = plan.metrics.hops,
        total_dist = plan.metrics.total_dist,
        bottleneck_margin = plan.metrics.bottleneck_margin,
        "route computed successfully"
    );

    Response::Outcome(RouteResponse::success(&plan))
}
