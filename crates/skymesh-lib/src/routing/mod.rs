//! Route orchestration for the relay mesh.
//!
//! This module provides:
//! - [`SearchMode`] - Supported search objectives (hop-minimal, distance-minimal)
//! - [`Drone`] - A mobile relay node supplied by the caller
//! - [`RouteRequest`] - High-level routing request
//! - [`RoutePlan`] - Planned route with link metrics
//! - [`compute_route`] - Main entry point for computing routes
//!
//! # Strategy Pattern
//!
//! The two search objectives are encapsulated behind the [`RoutePlanner`]
//! trait, so a new objective can be added without touching the orchestration
//! sequence in [`compute_route`].

mod planner;

pub use planner::{select_planner, DistancePlanner, HopPlanner, RoutePlanner};

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Endpoint, Error, Result};
use crate::geometry::Position;
use crate::graph::{build_mesh_graph, CONTROL_NODE};
use crate::metrics::{route_metrics, RouteMetrics};

/// Search objective for the path finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Minimise the number of links traversed.
    #[default]
    HopMinimal,
    /// Minimise the summed link distance.
    DistanceMinimal,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SearchMode::HopMinimal => "hop_minimal",
            SearchMode::DistanceMinimal => "distance_minimal",
        };
        f.write_str(value)
    }
}

/// A mobile relay node supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    pub id: String,
    pub pos: Position,
}

/// High-level routing request against a drone roster.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub drones: Vec<Drone>,
    /// Ground-station position; the origin unless the caller says otherwise.
    pub control_pos: Position,
    /// Maximum usable distance for links touching the control node.
    pub control_range: f64,
    /// Maximum usable distance for drone-to-drone links.
    pub drone_range: f64,
    pub src: String,
    pub dst: String,
    pub mode: SearchMode,
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub mode: SearchMode,
    /// Node identifiers from source to destination, inclusive.
    pub path: Vec<String>,
    pub metrics: RouteMetrics,
}

fn validate_roster(drones: &[Drone]) -> Result<()> {
    let mut seen = HashSet::with_capacity(drones.len());
    for drone in drones {
        if drone.id == CONTROL_NODE {
            return Err(Error::ReservedDroneId {
                id: drone.id.clone(),
            });
        }
        if !seen.insert(drone.id.as_str()) {
            return Err(Error::DuplicateDroneId {
                id: drone.id.clone(),
            });
        }
    }
    Ok(())
}

/// Compute a route through the relay mesh.
///
/// 1. Validates the drone roster: unique ids, reserved identifier unused.
/// 2. Builds the connectivity graph from positions and range budgets.
/// 3. Resolves both endpoints, naming the missing one on failure.
/// 4. Runs the planner for the requested search mode.
/// 5. Derives link metrics for the found path.
///
/// The computation is pure: identical requests always produce identical
/// plans.
pub fn compute_route(request: &RouteRequest) -> Result<RoutePlan> {
    validate_roster(&request.drones)?;

    let graph = build_mesh_graph(
        &request.drones,
        request.control_pos,
        request.control_range,
        request.drone_range,
    );
    debug!(
        nodes = graph.node_count(),
        links = graph.link_count(),
        "mesh graph built"
    );

    let start = graph
        .resolve(&request.src)
        .ok_or_else(|| Error::NodeNotFound {
            id: request.src.clone(),
            endpoint: Endpoint::Source,
        })?;
    let goal = graph
        .resolve(&request.dst)
        .ok_or_else(|| Error::NodeNotFound {
            id: request.dst.clone(),
            endpoint: Endpoint::Destination,
        })?;

    let planner = select_planner(request.mode);
    let route = planner
        .find_path(&graph, start, goal)
        .ok_or_else(|| Error::NoPathFound {
            src: request.src.clone(),
            dst: request.dst.clone(),
        })?;

    let metrics = route_metrics(&route, &graph, request.control_range, request.drone_range);
    let path = route.iter().map(|&node| graph.id(node).to_string()).collect();

    Ok(RoutePlan {
        mode: request.mode,
        path,
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drone(id: &str, x: f64, y: f64, z: f64) -> Drone {
        Drone {
            id: id.to_string(),
            pos: Position::new(x, y, z),
        }
    }

    /// Control at the origin (100 m budget), drones strung out along the x
    /// axis with an 80 m relay budget. Control reaches only `a`; the rest
    /// chain through it.
    fn chain_request(mode: SearchMode) -> RouteRequest {
        RouteRequest {
            drones: vec![
                drone("a", 50.0, 0.0, 0.0),
                drone("b", 120.0, 0.0, 0.0),
                drone("c", 190.0, 0.0, 0.0),
            ],
            control_pos: Position::default(),
            control_range: 100.0,
            drone_range: 80.0,
            src: CONTROL_NODE.to_string(),
            dst: "c".to_string(),
            mode,
        }
    }

    #[test]
    fn hop_minimal_route_through_the_chain() {
        let plan = compute_route(&chain_request(SearchMode::HopMinimal)).unwrap();

        assert_eq!(plan.path, vec![CONTROL_NODE, "a", "b", "c"]);
        assert_eq!(plan.metrics.hops, 3);
        assert_eq!(plan.metrics.total_dist, 190.0);
        assert_eq!(plan.metrics.bottleneck_dist, 70.0);
        assert_eq!(plan.metrics.bottleneck_margin, 10.0);
    }

    #[test]
    fn distance_minimal_mode_agrees_on_the_unique_path() {
        let hop = compute_route(&chain_request(SearchMode::HopMinimal)).unwrap();
        let dist = compute_route(&chain_request(SearchMode::DistanceMinimal)).unwrap();
        assert_eq!(hop.path, dist.path);
        assert_eq!(hop.metrics, dist.metrics);
    }

    #[test]
    fn route_to_self_is_a_single_node() {
        let mut request = chain_request(SearchMode::HopMinimal);
        request.dst = CONTROL_NODE.to_string();
        let plan = compute_route(&request).unwrap();

        assert_eq!(plan.path, vec![CONTROL_NODE]);
        assert_eq!(plan.metrics.hops, 0);
        assert!(plan.metrics.bottleneck_margin.is_infinite());
    }

    #[test]
    fn missing_source_is_named_as_source() {
        let mut request = chain_request(SearchMode::HopMinimal);
        request.src = "ghost".to_string();
        let err = compute_route(&request).unwrap_err();
        assert!(err.to_string().contains("source node not found"));

        match err {
            Error::NodeNotFound { id, endpoint } => {
                assert_eq!(id, "ghost");
                assert_eq!(endpoint, Endpoint::Source);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_destination_is_named_as_destination() {
        let mut request = chain_request(SearchMode::HopMinimal);
        request.dst = "ghost".to_string();
        let err = compute_route(&request).unwrap_err();
        assert!(err.to_string().contains("destination node not found"));

        match err {
            Error::NodeNotFound { id, endpoint } => {
                assert_eq!(id, "ghost");
                assert_eq!(endpoint, Endpoint::Destination);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn disconnected_endpoints_fail_with_no_path() {
        let mut request = chain_request(SearchMode::HopMinimal);
        request.drones.push(drone("island", 0.0, 5000.0, 0.0));
        request.dst = "island".to_string();

        let err = compute_route(&request).unwrap_err();
        assert!(matches!(err, Error::NoPathFound { .. }));
    }

    #[test]
    fn duplicate_drone_id_is_rejected() {
        let mut request = chain_request(SearchMode::HopMinimal);
        request.drones.push(drone("a", 10.0, 10.0, 0.0));

        let err = compute_route(&request).unwrap_err();
        assert!(matches!(err, Error::DuplicateDroneId { id } if id == "a"));
    }

    #[test]
    fn reserved_control_id_is_rejected() {
        let mut request = chain_request(SearchMode::HopMinimal);
        request.drones.push(drone(CONTROL_NODE, 10.0, 10.0, 0.0));

        let err = compute_route(&request).unwrap_err();
        assert!(matches!(err, Error::ReservedDroneId { .. }));
    }

    #[test]
    fn identical_requests_produce_identical_plans() {
        let request = chain_request(SearchMode::DistanceMinimal);
        let first = compute_route(&request).unwrap();
        for _ in 0..5 {
            assert_eq!(compute_route(&request).unwrap(), first);
        }
    }

    #[test]
    fn plan_serialises_with_snake_case_mode() {
        let plan = compute_route(&chain_request(SearchMode::HopMinimal)).unwrap();
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"mode\":\"hop_minimal\""));
        assert!(json.contains("\"hops\":3"));
    }
}
