//! Room layout
//!
//! Places graph nodes onto the grid: root at the origin, then a frontier walk
//! that tries to put each child edge-to-edge against its parent, sliding it
//! along the shared edge and falling back to other placed neighbors before
//! giving up on a node entirely.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::GenerationConfig;
use crate::graph::{NodeId, RoomGraph};
use crate::grid::{Direction, Position};
use crate::templates::RoomTemplate;

/// A committed child placement, carrying the parent actually used (which may
/// be an alternate, not the graph parent that triggered the attempt).
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub parent: NodeId,
    pub origin: Position,
    pub direction: Direction,
}

/// Result of laying out a graph
#[derive(Debug)]
pub struct LayoutResult {
    /// Placed nodes in placement order, root first
    pub placed: Vec<NodeId>,
    /// (parent, child) pairs actually used for placement. May diverge from the
    /// graph's edges when the alternate-parent fallback fires.
    pub pairs: Vec<(NodeId, NodeId)>,
    /// Nodes that could not be placed anywhere and were dropped
    pub skipped: Vec<NodeId>,
}

/// Lay out the graph on the grid. The root node is placed at (0, 0)
/// unconditionally; every other placed node shares at least one tile of edge
/// with the parent it was committed against.
pub fn layout_graph(
    rng: &mut StdRng,
    graph: &mut RoomGraph,
    templates: &[RoomTemplate],
    config: &GenerationConfig,
) -> LayoutResult {
    let mut occupied: HashSet<Position> = HashSet::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut placed_set: HashSet<NodeId> = HashSet::new();

    let mut result = LayoutResult {
        placed: Vec::new(),
        pairs: Vec::new(),
        skipped: Vec::new(),
    };

    let root: NodeId = 0;
    commit(graph, &mut occupied, templates, root, Position::new(0, 0), None);
    visited.insert(root);
    placed_set.insert(root);
    result.placed.push(root);

    let mut frontier: Vec<NodeId> = vec![root];

    while !frontier.is_empty() {
        // Connector rooms with at most one placed neighbor jump the queue so
        // hallways get their second connection before the frontier moves on.
        let idx = frontier
            .iter()
            .position(|&n| should_prioritize(graph, templates, &placed_set, n))
            .unwrap_or(0);
        let current = frontier.remove(idx);

        let children = graph.node(current).neighbors.clone();
        for child in children {
            if visited.contains(&child) {
                continue;
            }
            visited.insert(child);

            match place_child(rng, graph, templates, config, &occupied, &placed_set, current, child)
            {
                Some(placement) => {
                    commit(
                        graph,
                        &mut occupied,
                        templates,
                        child,
                        placement.origin,
                        Some(placement.direction),
                    );
                    placed_set.insert(child);
                    result.placed.push(child);
                    result.pairs.push((placement.parent, child));
                    frontier.push(child);
                }
                None => {
                    log::warn!(
                        "Failed to place room '{}' (node {}), skipping",
                        templates[graph.node(child).template].name,
                        child
                    );
                    result.skipped.push(child);
                }
            }
        }
    }

    result
}

/// Connector rooms that will end up with fewer than two doors get priority
fn should_prioritize(
    graph: &RoomGraph,
    templates: &[RoomTemplate],
    placed: &HashSet<NodeId>,
    node: NodeId,
) -> bool {
    if !templates[graph.node(node).template].connector {
        return false;
    }
    let placed_neighbors = graph
        .node(node)
        .neighbors
        .iter()
        .filter(|n| placed.contains(n))
        .count();
    placed_neighbors <= 1
}

/// Search for a spot for `child`: first against the intended parent, then
/// against every other already-placed neighbor in adjacency-list order.
/// Returns the placement to commit, or `None` when every option is exhausted.
#[allow(clippy::too_many_arguments)]
fn place_child(
    rng: &mut StdRng,
    graph: &RoomGraph,
    templates: &[RoomTemplate],
    config: &GenerationConfig,
    occupied: &HashSet<Position>,
    placed: &HashSet<NodeId>,
    parent: NodeId,
    child: NodeId,
) -> Option<Placement> {
    if let Some(p) = try_place_adjacent(rng, graph, templates, config, occupied, parent, child) {
        return Some(p);
    }

    for &alt in &graph.node(child).neighbors {
        if alt == parent || !placed.contains(&alt) {
            continue;
        }
        if let Some(p) = try_place_adjacent(rng, graph, templates, config, occupied, alt, child) {
            return Some(p);
        }
    }

    None
}

/// Try each of the four directions (shuffled, with a momentum bias toward the
/// parent's own placement direction) and return the first candidate whose
/// footprint is free.
fn try_place_adjacent(
    rng: &mut StdRng,
    graph: &RoomGraph,
    templates: &[RoomTemplate],
    config: &GenerationConfig,
    occupied: &HashSet<Position>,
    parent: NodeId,
    child: NodeId,
) -> Option<Placement> {
    let parent_node = graph.node(parent);
    let parent_origin = parent_node.origin?;
    let parent_tpl = &templates[parent_node.template];
    let child_tpl = &templates[graph.node(child).template];

    let mut directions = vec![
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];
    directions.shuffle(rng);

    if let Some(dir) = parent_node.placed_direction {
        if rng.gen_bool(config.momentum_bias) {
            directions.retain(|&d| d != dir);
            directions.insert(0, dir);
        }
    }

    for dir in directions {
        let candidate = adjacent_origin(rng, parent_tpl, child_tpl, parent_origin, dir);
        if footprint_is_free(occupied, candidate, child_tpl) {
            return Some(Placement {
                parent,
                origin: candidate,
                direction: dir,
            });
        }
    }

    None
}

/// Candidate origin for `child` abutting `parent` on the given side, with a
/// random slide along the shared edge. The slide range is offset so at least
/// one tile of edge overlap survives at either extreme, which door placement
/// relies on.
fn adjacent_origin(
    rng: &mut StdRng,
    parent: &RoomTemplate,
    child: &RoomTemplate,
    parent_origin: Position,
    dir: Direction,
) -> Position {
    let mut candidate = parent_origin;

    match dir {
        Direction::East => candidate.x += parent.width,
        Direction::West => candidate.x -= child.width,
        Direction::North => candidate.y += parent.height,
        Direction::South => candidate.y -= child.height,
    }

    if dir.is_horizontal() {
        let max_slide = parent.height + child.height - 2;
        let slide = rng.gen_range(0..=max_slide) - (child.height - 1);
        candidate.y += slide;
    } else {
        let max_slide = parent.width + child.width - 2;
        let slide = rng.gen_range(0..=max_slide) - (child.width - 1);
        candidate.x += slide;
    }

    candidate
}

fn footprint_is_free(
    occupied: &HashSet<Position>,
    origin: Position,
    template: &RoomTemplate,
) -> bool {
    for dx in 0..template.width {
        for dy in 0..template.height {
            if occupied.contains(&Position::new(origin.x + dx, origin.y + dy)) {
                return false;
            }
        }
    }
    true
}

/// Claim the node's tiles and record its final origin and direction
fn commit(
    graph: &mut RoomGraph,
    occupied: &mut HashSet<Position>,
    templates: &[RoomTemplate],
    node: NodeId,
    origin: Position,
    direction: Option<Direction>,
) {
    let template = &templates[graph.node(node).template];
    for dx in 0..template.width {
        for dy in 0..template.height {
            occupied.insert(Position::new(origin.x + dx, origin.y + dy));
        }
    }
    let n = graph.node_mut(node);
    n.origin = Some(origin);
    n.placed_direction = direction;
}
