use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::graph::{MeshGraph, NodeIndex};

/// Find the hop-minimal path between `start` and `goal` using breadth-first
/// search. Every link counts as one hop regardless of its stored weight.
///
/// Tie-break: the first parent discovered wins. Adjacency rows are in node
/// insertion order (control node first, then drones in request order), so
/// among equal-hop paths the earliest-inserted neighbour is chosen and the
/// result is deterministic for a given request.
pub fn find_route_bfs(
    graph: &MeshGraph,
    start: NodeIndex,
    goal: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut parents: Vec<Option<NodeIndex>> = vec![None; graph.node_count()];
    let mut visited = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();

    visited[start] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for edge in graph.neighbours(current) {
            let next = edge.target;
            if visited[next] {
                continue;
            }
            visited[next] = true;
            parents[next] = Some(current);
            if next == goal {
                return Some(reconstruct_path(&parents, start, goal));
            }
            queue.push_back(next);
        }
    }

    None
}

/// Find the distance-minimal path between `start` and `goal` using Dijkstra's
/// algorithm over the non-negative Euclidean link weights.
///
/// Tie-break: relaxation requires a strict improvement and equal-cost heap
/// entries pop in node-index order, so ties resolve towards the
/// earliest-inserted node, the same rule as the hop-minimal mode.
pub fn find_route_dijkstra(
    graph: &MeshGraph,
    start: NodeIndex,
    goal: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut distances = vec![f64::INFINITY; graph.node_count()];
    let mut parents: Vec<Option<NodeIndex>> = vec![None; graph.node_count()];
    let mut queue = BinaryHeap::new();

    distances[start] = 0.0;
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        if entry.cost.0 > distances[entry.node] {
            // Stale entry superseded by a cheaper relaxation.
            continue;
        }
        if entry.node == goal {
            return Some(reconstruct_path(&parents, start, goal));
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target;
            let next_cost = entry.cost.0 + edge.distance;
            if next_cost < distances[next] {
                distances[next] = next_cost;
                parents[next] = Some(entry.node);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    None
}

fn reconstruct_path(parents: &[Option<NodeIndex>], start: NodeIndex, goal: NodeIndex) -> Vec<NodeIndex> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents[node];
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeIndex,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeIndex, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost; equal
        // costs pop the lower node index first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;
    use crate::graph::build_mesh_graph;
    use crate::routing::Drone;

    fn drone(id: &str, x: f64, y: f64) -> Drone {
        Drone {
            id: id.to_string(),
            pos: Position::new(x, y, 0.0),
        }
    }

    /// Control at the origin with a 50 m budget; goal drone `g` reachable
    /// either through `a` (2 hops, longer overall) or through the `b`-`c`
    /// chain (3 hops, shorter overall).
    fn forked_graph() -> MeshGraph {
        let roster = vec![
            drone("a", 40.0, 30.0),
            drone("b", 30.0, -20.0),
            drone("c", 60.0, -20.0),
            drone("g", 90.0, 0.0),
        ];
        build_mesh_graph(&roster, Position::default(), 50.0, 60.0)
    }

    #[test]
    fn bfs_start_equals_goal_is_single_node() {
        let graph = forked_graph();
        assert_eq!(find_route_bfs(&graph, 2, 2), Some(vec![2]));
    }

    #[test]
    fn dijkstra_start_equals_goal_is_single_node() {
        let graph = forked_graph();
        assert_eq!(find_route_dijkstra(&graph, 0, 0), Some(vec![0]));
    }

    #[test]
    fn bfs_minimises_hops() {
        let graph = forked_graph();
        let goal = graph.resolve("g").unwrap();
        let path = find_route_bfs(&graph, 0, goal).unwrap();

        // control -> a -> g is the unique 2-hop path.
        assert_eq!(path.len(), 3);
        assert_eq!(graph.id(path[1]), "a");
    }

    #[test]
    fn dijkstra_minimises_total_distance() {
        let graph = forked_graph();
        let goal = graph.resolve("g").unwrap();
        let path = find_route_dijkstra(&graph, 0, goal).unwrap();

        // The b-c chain is ~102.1 m against ~108.3 m through a, despite the
        // extra hop.
        let ids: Vec<&str> = path.iter().map(|&n| graph.id(n)).collect();
        assert_eq!(ids, vec!["__CONTROL__", "b", "c", "g"]);

        let total: f64 = path
            .windows(2)
            .map(|pair| graph.link(pair[0], pair[1]).unwrap().distance)
            .sum();
        let via_a = 50.0 + (50.0f64 * 50.0 + 30.0 * 30.0).sqrt();
        assert!(total < via_a);
    }

    #[test]
    fn disconnected_endpoints_return_none() {
        let roster = vec![drone("near", 10.0, 0.0), drone("far", 500.0, 0.0)];
        let graph = build_mesh_graph(&roster, Position::default(), 50.0, 50.0);
        let far = graph.resolve("far").unwrap();

        assert_eq!(find_route_bfs(&graph, 0, far), None);
        assert_eq!(find_route_dijkstra(&graph, 0, far), None);
    }

    #[test]
    fn equal_cost_ties_resolve_to_first_inserted_drone() {
        // Two symmetric relays, both exactly usable; the roster order decides.
        let roster = vec![
            drone("left", 60.0, 0.0),
            drone("right", 0.0, 60.0),
            drone("target", 60.0, 60.0),
        ];
        let graph = build_mesh_graph(&roster, Position::default(), 70.0, 60.0);
        let target = graph.resolve("target").unwrap();

        let hop_path = find_route_bfs(&graph, 0, target).unwrap();
        let dist_path = find_route_dijkstra(&graph, 0, target).unwrap();
        assert_eq!(graph.id(hop_path[1]), "left");
        assert_eq!(graph.id(dist_path[1]), "left");

        // Reversing the roster flips the winner.
        let reversed = vec![
            drone("right", 0.0, 60.0),
            drone("left", 60.0, 0.0),
            drone("target", 60.0, 60.0),
        ];
        let graph = build_mesh_graph(&reversed, Position::default(), 70.0, 60.0);
        let target = graph.resolve("target").unwrap();
        let hop_path = find_route_bfs(&graph, 0, target).unwrap();
        assert_eq!(graph.id(hop_path[1]), "right");
    }

    #[test]
    fn searches_are_deterministic() {
        let graph = forked_graph();
        let goal = graph.resolve("g").unwrap();

        let first = find_route_dijkstra(&graph, 0, goal);
        for _ in 0..10 {
            assert_eq!(find_route_dijkstra(&graph, 0, goal), first);
        }
    }
}
