use std::collections::HashMap;

use crate::geometry::Position;
use crate::routing::Drone;

/// Reserved identifier for the fixed ground-control node. Never assignable to
/// a drone.
pub const CONTROL_NODE: &str = "__CONTROL__";

/// Index of a node within a [`MeshGraph`], assigned in insertion order.
pub type NodeIndex = usize;

/// Classification for a link in the mesh graph.
///
/// The kind selects the range budget that applies to the link: `Control`
/// links are bounded by the control range, `Drone` links by the
/// drone-to-drone range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LinkKind {
    Control,
    Drone,
}

/// Directed edge within the mesh graph.
#[derive(Debug, Clone)]
pub struct LinkEdge {
    pub target: NodeIndex,
    pub kind: LinkKind,
    pub distance: f64,
}

/// Connectivity graph over the control node and the drone roster.
///
/// Nodes are indexed in insertion order: the control node first, then drones
/// in request order. Adjacency rows preserve that order, which is what keeps
/// the search tie-breaks deterministic.
#[derive(Debug, Clone, Default)]
pub struct MeshGraph {
    ids: Vec<String>,
    positions: Vec<Position>,
    index: HashMap<String, NodeIndex>,
    adjacency: Vec<Vec<LinkEdge>>,
}

impl MeshGraph {
    /// Number of nodes (the control node plus the drone roster).
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Resolve a node identifier to its index.
    pub fn resolve(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Identifier of a node.
    pub fn id(&self, node: NodeIndex) -> &str {
        &self.ids[node]
    }

    /// Position of a node.
    pub fn position(&self, node: NodeIndex) -> Position {
        self.positions[node]
    }

    /// Return the outgoing links for a node.
    pub fn neighbours(&self, node: NodeIndex) -> &[LinkEdge] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The link between two adjacent nodes, if one exists.
    pub fn link(&self, from: NodeIndex, to: NodeIndex) -> Option<&LinkEdge> {
        self.neighbours(from).iter().find(|edge| edge.target == to)
    }

    /// Total number of undirected links in the graph.
    pub fn link_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    fn push_node(&mut self, id: &str, position: Position) -> NodeIndex {
        let node = self.ids.len();
        self.ids.push(id.to_string());
        self.positions.push(position);
        self.index.insert(id.to_string(), node);
        self.adjacency.push(Vec::new());
        node
    }

    fn push_link(&mut self, a: NodeIndex, b: NodeIndex, kind: LinkKind, distance: f64) {
        self.adjacency[a].push(LinkEdge {
            target: b,
            kind,
            distance,
        });
        self.adjacency[b].push(LinkEdge {
            target: a,
            kind,
            distance,
        });
    }
}

/// Build the connectivity graph for one routing request.
///
/// A control-drone link exists iff the pair distance is within
/// `control_range`, a drone-drone link iff within `drone_range`; both bounds
/// are inclusive. Construction is O(n^2) in the roster size, the intended
/// trade-off for swarm-sized inputs.
///
/// Assumes a pre-validated roster: unique drone ids, none equal to
/// [`CONTROL_NODE`].
pub fn build_mesh_graph(
    drones: &[Drone],
    control_pos: Position,
    control_range: f64,
    drone_range: f64,
) -> MeshGraph {
    let mut graph = MeshGraph::default();
    let control = graph.push_node(CONTROL_NODE, control_pos);

    for drone in drones {
        graph.push_node(&drone.id, drone.pos);
    }

    for (offset, drone) in drones.iter().enumerate() {
        let distance = control_pos.distance_to(&drone.pos);
        if distance <= control_range {
            graph.push_link(control, control + 1 + offset, LinkKind::Control, distance);
        }
    }

    for i in 0..drones.len() {
        for j in (i + 1)..drones.len() {
            let distance = drones[i].pos.distance_to(&drones[j].pos);
            if distance <= drone_range {
                graph.push_link(1 + i, 1 + j, LinkKind::Drone, distance);
            }
        }
    }

    graph
}
