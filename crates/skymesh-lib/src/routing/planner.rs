//! Search strategies for the route planner.
//!
//! Each implementation wraps one pathfinding algorithm; [`select_planner`]
//! maps a [`SearchMode`] to its strategy so `compute_route` never branches on
//! the mode itself.

use crate::graph::{MeshGraph, NodeIndex};
use crate::path::{find_route_bfs, find_route_dijkstra};

use super::SearchMode;

/// Trait for path search strategies.
pub trait RoutePlanner: Send + Sync {
    /// The search mode this planner implements.
    fn mode(&self) -> SearchMode;

    /// Execute the search on the given graph.
    ///
    /// Returns `Some(path)` if the endpoints are connected, `None` otherwise.
    fn find_path(&self, graph: &MeshGraph, start: NodeIndex, goal: NodeIndex)
        -> Option<Vec<NodeIndex>>;
}

/// Breadth-first planner: fewest links, stored weights ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct HopPlanner;

impl RoutePlanner for HopPlanner {
    fn mode(&self) -> SearchMode {
        SearchMode::HopMinimal
    }

    fn find_path(
        &self,
        graph: &MeshGraph,
        start: NodeIndex,
        goal: NodeIndex,
    ) -> Option<Vec<NodeIndex>> {
        find_route_bfs(graph, start, goal)
    }
}

/// Dijkstra planner: minimal summed link distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistancePlanner;

impl RoutePlanner for DistancePlanner {
    fn mode(&self) -> SearchMode {
        SearchMode::DistanceMinimal
    }

    fn find_path(
        &self,
        graph: &MeshGraph,
        start: NodeIndex,
        goal: NodeIndex,
    ) -> Option<Vec<NodeIndex>> {
        find_route_dijkstra(graph, start, goal)
    }
}

/// Select the planner for a search mode.
pub fn select_planner(mode: SearchMode) -> Box<dyn RoutePlanner> {
    match mode {
        SearchMode::HopMinimal => Box::new(HopPlanner),
        SearchMode::DistanceMinimal => Box::new(DistancePlanner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planners_report_their_mode() {
        assert_eq!(HopPlanner.mode(), SearchMode::HopMinimal);
        assert_eq!(DistancePlanner.mode(), SearchMode::DistanceMinimal);
    }

    #[test]
    fn select_planner_matches_mode() {
        assert_eq!(
            select_planner(SearchMode::HopMinimal).mode(),
            SearchMode::HopMinimal
        );
        assert_eq!(
            select_planner(SearchMode::DistanceMinimal).mode(),
            SearchMode::DistanceMinimal
        );
    }
}
