//! Room graph
//!
//! A random connected tree of room nodes, stored as a flat arena with
//! index-based edges.

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::GenerationConfig;
use crate::grid::{Direction, Position};
use crate::templates::{RoomTemplate, TemplateId};

/// Index into the graph's node arena
pub type NodeId = usize;

/// Index into the realized room list
pub type RoomId = usize;

/// A room before and during placement
#[derive(Debug, Clone)]
pub struct RoomNode {
    pub template: TemplateId,
    /// Undirected edges, as arena indices
    pub neighbors: Vec<NodeId>,
    /// Grid origin (bottom-left corner), set once on successful placement
    pub origin: Option<Position>,
    /// Direction this node was placed in relative to its parent, used for
    /// momentum bias when placing its own children
    pub placed_direction: Option<Direction>,
    /// The realized room, set once at the end of layout
    pub room: Option<RoomId>,
}

impl RoomNode {
    fn new(template: TemplateId) -> Self {
        Self {
            template,
            neighbors: Vec::new(),
            origin: None,
            placed_direction: None,
            room: None,
        }
    }
}

/// Node arena with index-addressed undirected edges
#[derive(Debug, Default)]
pub struct RoomGraph {
    pub nodes: Vec<RoomNode>,
}

impl RoomGraph {
    pub fn node(&self, id: NodeId) -> &RoomNode {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut RoomNode {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn add_node(&mut self, template: TemplateId) -> NodeId {
        self.nodes.push(RoomNode::new(template));
        self.nodes.len() - 1
    }

    fn add_edge(&mut self, a: NodeId, b: NodeId) {
        self.nodes[a].neighbors.push(b);
        self.nodes[b].neighbors.push(a);
    }

    /// Graph degree of a node
    pub fn degree(&self, id: NodeId) -> usize {
        self.nodes[id].neighbors.len()
    }
}

/// Build a random connected tree of `config.room_count` nodes.
///
/// Each new node attaches to a leaf (degree <= 1) with probability
/// `chain_bias`, otherwise to a uniformly random existing node. High chain
/// bias produces long branches, low bias a flat star-like graph.
pub fn build_graph(
    rng: &mut StdRng,
    templates: &[RoomTemplate],
    config: &GenerationConfig,
) -> RoomGraph {
    let mut graph = RoomGraph::default();

    graph.add_node(rng.gen_range(0..templates.len()));

    for _ in 1..config.room_count {
        let node = graph.add_node(rng.gen_range(0..templates.len()));

        let parent = if rng.gen_bool(config.chain_bias) {
            // The new node is already in the arena; exclude it from the
            // candidate scan so it cannot become its own parent.
            let leaves: Vec<NodeId> = (0..node)
                .filter(|&n| graph.degree(n) <= 1)
                .collect();
            if leaves.is_empty() {
                rng.gen_range(0..node)
            } else {
                leaves[rng.gen_range(0..leaves.len())]
            }
        } else {
            rng.gen_range(0..node)
        };

        graph.add_edge(parent, node);
    }

    graph
}
