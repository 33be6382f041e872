//! Directional tree layout.
//!
//! Post-order assignment: leaves take successive cross-axis slots, each
//! internal node sits at the midpoint of its direct children's assigned
//! cross coordinates, and the depth axis is `depth * level spacing`.
//!
//! # Invariants
//! - Disconnected roots are laid out sequentially; an isolated root still
//!   consumes one full cross-axis slot so trees never overlap.
//! - A node reachable twice (stray extra edge) is assigned exactly once.

use std::collections::{HashMap, HashSet};

use crate::config::EngineConfig;
use crate::graph::{build_graph_maps, GraphMaps};
use crate::model::edge::Edge;
use crate::model::node::{Node, NodeId, Position};

use super::{place, Orientation};

/// Lays out the forest as a directional tree.
pub fn tree_layout(
    nodes: &[Node],
    edges: &[Edge],
    orientation: Orientation,
    config: &EngineConfig,
) -> Vec<Node> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let maps = build_graph_maps(nodes, edges);
    let placeable: HashSet<&str> = nodes
        .iter()
        .filter(|node| !node.data.is_floating)
        .map(|node| node.id.as_str())
        .collect();

    let mut walker = Walker {
        maps: &maps,
        placeable: &placeable,
        cursor: 0.0,
        visited: HashSet::new(),
        slots: HashMap::new(),
    };

    for node in nodes {
        if !placeable.contains(node.id.as_str()) || !maps.is_root(&node.id) {
            continue;
        }
        let before = walker.cursor;
        walker.assign(&node.id, 0);
        if walker.cursor == before {
            // Root produced no cross-axis advancement; consume a slot anyway.
            walker.cursor += 1.0;
        }
    }

    let depth_spacing = match orientation {
        Orientation::Row => config.level_spacing_x,
        Orientation::Column => config.level_spacing_y,
    };
    let positions: HashMap<NodeId, Position> = walker
        .slots
        .into_iter()
        .map(|(id, (cross, depth))| {
            let cross_coord = cross * config.sibling_spacing;
            let depth_coord = f64::from(depth) * depth_spacing;
            let position = match orientation {
                Orientation::Row => Position::new(depth_coord, cross_coord),
                Orientation::Column => Position::new(cross_coord, depth_coord),
            };
            (id, position)
        })
        .collect();

    place(nodes, &positions, config.layout_margin)
}

struct Walker<'a> {
    maps: &'a GraphMaps,
    placeable: &'a HashSet<&'a str>,
    cursor: f64,
    visited: HashSet<NodeId>,
    slots: HashMap<NodeId, (f64, u32)>,
}

impl Walker<'_> {
    /// Post-order cross-axis assignment. Returns the node's own cross slot.
    fn assign(&mut self, id: &str, depth: u32) -> Option<f64> {
        if !self.visited.insert(id.to_string()) {
            return self.slots.get(id).map(|(cross, _)| *cross);
        }

        let children: Vec<NodeId> = self
            .maps
            .children_of(id)
            .iter()
            .filter(|child| self.placeable.contains(child.as_str()))
            .cloned()
            .collect();

        let mut child_min = f64::INFINITY;
        let mut child_max = f64::NEG_INFINITY;
        for child in &children {
            if let Some(cross) = self.assign(child, depth + 1) {
                child_min = child_min.min(cross);
                child_max = child_max.max(cross);
            }
        }

        let cross = if child_min.is_finite() {
            (child_min + child_max) / 2.0
        } else {
            let slot = self.cursor;
            self.cursor += 1.0;
            slot
        };
        self.slots.insert(id.to_string(), (cross, depth));
        Some(cross)
    }
}

#[cfg(test)]
mod tests {
    use super::tree_layout;
    use crate::config::EngineConfig;
    use crate::layout::Orientation;
    use crate::model::edge::Edge;
    use crate::model::node::Node;

    fn fork() -> (Vec<Node>, Vec<Edge>) {
        let nodes = vec![
            Node::with_id("root", "Root", 1),
            Node::with_id("a", "A", 2),
            Node::with_id("b", "B", 2),
        ];
        let edges = vec![
            Edge::with_id("e1", "root", "a"),
            Edge::with_id("e2", "root", "b"),
        ];
        (nodes, edges)
    }

    fn position_of<'a>(nodes: &'a [Node], id: &str) -> &'a crate::model::node::Position {
        &nodes.iter().find(|n| n.id == id).expect("node present").position
    }

    #[test]
    fn parent_sits_at_midpoint_of_children() {
        let config = EngineConfig::default();
        let (nodes, edges) = fork();
        let out = tree_layout(&nodes, &edges, Orientation::Row, &config);

        let root = position_of(&out, "root");
        let a = position_of(&out, "a");
        let b = position_of(&out, "b");
        assert_eq!(root.y, (a.y + b.y) / 2.0);
        assert_eq!(a.x - root.x, config.level_spacing_x);
        assert_eq!(b.y - a.y, config.sibling_spacing);
    }

    #[test]
    fn column_orientation_swaps_axes() {
        let config = EngineConfig::default();
        let (nodes, edges) = fork();
        let out = tree_layout(&nodes, &edges, Orientation::Column, &config);

        let root = position_of(&out, "root");
        let a = position_of(&out, "a");
        assert_eq!(root.x, (position_of(&out, "b").x + a.x) / 2.0);
        assert_eq!(a.y - root.y, config.level_spacing_y);
    }

    #[test]
    fn all_coordinates_clear_the_margin() {
        let config = EngineConfig::default();
        let (nodes, edges) = fork();
        let out = tree_layout(&nodes, &edges, Orientation::Row, &config);
        for node in &out {
            assert!(node.position.x >= config.layout_margin);
            assert!(node.position.y >= config.layout_margin);
        }
    }

    #[test]
    fn disconnected_roots_do_not_overlap() {
        let config = EngineConfig::default();
        let nodes = vec![Node::with_id("r1", "R1", 1), Node::with_id("r2", "R2", 1)];
        let out = tree_layout(&nodes, &[], Orientation::Row, &config);
        assert_ne!(out[0].position, out[1].position);
    }

    #[test]
    fn dangling_edge_reference_is_skipped() {
        let config = EngineConfig::default();
        let nodes = vec![Node::with_id("root", "Root", 1)];
        let edges = vec![Edge::with_id("e1", "root", "ghost")];
        let out = tree_layout(&nodes, &edges, Orientation::Row, &config);
        assert!(out[0].position.x.is_finite());
        assert!(out[0].position.y.is_finite());
    }

    #[test]
    fn floating_node_keeps_its_position() {
        let config = EngineConfig::default();
        let (mut nodes, edges) = fork();
        nodes[2].data.is_floating = true;
        nodes[2].position = crate::model::node::Position::new(999.0, 999.0);
        let out = tree_layout(&nodes, &edges, Orientation::Row, &config);
        assert_eq!(out[2].position.x, 999.0);
    }
}
