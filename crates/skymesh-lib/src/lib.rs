//! Skymesh library entry points.
//!
//! This crate answers reachability questions for an ad-hoc aerial relay
//! mesh: build the connectivity graph from node positions and range budgets,
//! search it hop-minimally or distance-minimally, and derive link-quality
//! metrics for the found route. Higher-level consumers (CLI, HTTP service)
//! should only depend on the functions exported here instead of
//! reimplementing behavior.

#![deny(warnings)]

pub mod error;
pub mod geometry;
pub mod graph;
pub mod metrics;
pub mod path;
pub mod routing;

pub use error::{Endpoint, Error, Result};
pub use geometry::Position;
pub use graph::{build_mesh_graph, LinkKind, MeshGraph, NodeIndex, CONTROL_NODE};
pub use metrics::{route_metrics, RouteMetrics};
pub use path::{find_route_bfs, find_route_dijkstra};
pub use routing::{compute_route, Drone, RoutePlan, RouteRequest, SearchMode};
