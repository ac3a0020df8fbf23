use serde::{Deserialize, Serialize};

use crate::graph::{LinkKind, MeshGraph, NodeIndex};

/// Link-quality metrics derived from a found path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteMetrics {
    /// Number of links traversed.
    pub hops: usize,
    /// Sum of link distances along the path.
    pub total_dist: f64,
    /// Longest single link along the path; 0 for a single-node path.
    pub bottleneck_dist: f64,
    /// Smallest unused range capacity over all links. Positive infinity for
    /// a single-node path, where no link budget is binding.
    pub bottleneck_margin: f64,
}

/// Derive hop count, cumulative distance, worst link, and worst-link margin
/// for a path through `graph`.
///
/// The applicable capacity per link is `control_range` when the link touches
/// the control node and `drone_range` otherwise; the graph records that
/// distinction as the link kind.
pub fn route_metrics(
    path: &[NodeIndex],
    graph: &MeshGraph,
    control_range: f64,
    drone_range: f64,
) -> RouteMetrics {
    let mut total_dist = 0.0;
    let mut bottleneck_dist = 0.0f64;
    let mut bottleneck_margin = f64::INFINITY;

    for pair in path.windows(2) {
        let Some(edge) = graph.link(pair[0], pair[1]) else {
            continue;
        };
        let capacity = match edge.kind {
            LinkKind::Control => control_range,
            LinkKind::Drone => drone_range,
        };
        total_dist += edge.distance;
        bottleneck_dist = bottleneck_dist.max(edge.distance);
        bottleneck_margin = bottleneck_margin.min(capacity - edge.distance);
    }

    RouteMetrics {
        hops: path.len().saturating_sub(1),
        total_dist,
        bottleneck_dist,
        bottleneck_margin,
    }
}
