//! Radial mind-map layout.
//!
//! The hub (first parentless node, else the first node) sits at the
//! origin. Its children split by insertion order into a right hemisphere
//! fanned around angle 0 and a left hemisphere fanned around pi; each
//! subtree keeps its hemisphere's rotational sense all the way down.
//!
//! # Invariants
//! - Deterministic: angles depend only on structure and insertion order.
//! - Radius grows with depth: base at depth 1, a step per extra level,
//!   plus one extra offset past depth 1.
//! - Disconnected nodes are ringed around the full circle afterward.

use std::collections::{HashMap, HashSet};

use crate::config::EngineConfig;
use crate::graph::{build_graph_maps, GraphMaps};
use crate::model::edge::Edge;
use crate::model::node::{Node, NodeId, Position};

use super::place;

/// Lays out the graph as a radial mind-map around its hub.
pub fn radial_layout(nodes: &[Node], edges: &[Edge], config: &EngineConfig) -> Vec<Node> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let maps = build_graph_maps(nodes, edges);
    let placeable: Vec<&Node> = nodes.iter().filter(|n| !n.data.is_floating).collect();
    if placeable.is_empty() {
        return nodes.to_vec();
    }

    let hub = placeable
        .iter()
        .find(|node| maps.is_root(&node.id))
        .unwrap_or(&placeable[0]);

    let placeable_ids: HashSet<&str> = placeable.iter().map(|n| n.id.as_str()).collect();
    let mut ring = Ring {
        maps: &maps,
        placeable: &placeable_ids,
        config,
        positions: HashMap::new(),
        visited: HashSet::new(),
    };

    ring.positions.insert(hub.id.clone(), Position::default());
    ring.visited.insert(hub.id.clone());

    let hub_children: Vec<NodeId> = maps
        .children_of(&hub.id)
        .iter()
        .filter(|child| placeable_ids.contains(child.as_str()) && !ring.visited.contains(*child))
        .cloned()
        .collect();
    let mid = hub_children.len().div_ceil(2);
    ring.fan(&hub_children[..mid], 0.0, 1.0, config.hub_spread_degrees.to_radians());
    ring.fan(
        &hub_children[mid..],
        std::f64::consts::PI,
        -1.0,
        config.hub_spread_degrees.to_radians(),
    );

    // Nodes unreachable from the hub go on an even full-circle ring.
    let stranded: Vec<NodeId> = placeable
        .iter()
        .filter(|node| !ring.visited.contains(&node.id))
        .map(|node| node.id.clone())
        .collect();
    let full_turn = std::f64::consts::TAU;
    let stranded_radius = config.radial_base_radius + config.radial_radius_step;
    for (index, id) in stranded.iter().enumerate() {
        let angle = full_turn * index as f64 / stranded.len() as f64;
        ring.positions.insert(
            id.clone(),
            Position::new(stranded_radius * angle.cos(), stranded_radius * angle.sin()),
        );
    }

    place(nodes, &ring.positions, config.layout_margin)
}

struct Ring<'a> {
    maps: &'a GraphMaps,
    placeable: &'a HashSet<&'a str>,
    config: &'a EngineConfig,
    positions: HashMap<NodeId, Position>,
    visited: HashSet<NodeId>,
}

impl Ring<'_> {
    /// Distributes depth-1 siblings evenly across `spread` around `center`,
    /// rotating in `sense` (+1 clockwise, -1 counter-clockwise).
    fn fan(&mut self, siblings: &[NodeId], center: f64, sense: f64, spread: f64) {
        let count = siblings.len();
        for (index, id) in siblings.iter().enumerate() {
            let offset = if count == 1 {
                0.0
            } else {
                -spread / 2.0 + spread * index as f64 / (count - 1) as f64
            };
            self.descend(id, center + sense * offset, 1, sense);
        }
    }

    /// Places one node at its depth radius, then fans its children across
    /// the narrower per-depth spread centered on this node's angle.
    fn descend(&mut self, id: &NodeId, angle: f64, depth: u32, sense: f64) {
        if !self.visited.insert(id.clone()) {
            return;
        }
        let radius = self.radius_for(depth);
        self.positions
            .insert(id.clone(), Position::new(radius * angle.cos(), radius * angle.sin()));

        let children: Vec<NodeId> = self
            .maps
            .children_of(id)
            .iter()
            .filter(|child| self.placeable.contains(child.as_str()) && !self.visited.contains(*child))
            .cloned()
            .collect();
        if children.is_empty() {
            return;
        }

        let spread = if depth <= 1 {
            self.config.shallow_spread_degrees
        } else {
            self.config.deep_spread_degrees
        }
        .to_radians();
        let jitter_step = self.config.sibling_jitter_degrees.to_radians();
        let count = children.len();
        for (index, child) in children.iter().enumerate() {
            let offset = if count == 1 {
                0.0
            } else {
                -spread / 2.0 + spread * index as f64 / (count - 1) as f64
            };
            let center_distance = index as f64 - (count - 1) as f64 / 2.0;
            let child_angle = angle + sense * (offset + center_distance * jitter_step);
            self.descend(child, child_angle, depth + 1, sense);
        }
    }

    fn radius_for(&self, depth: u32) -> f64 {
        let extra = if depth > 1 {
            self.config.radial_deep_offset
        } else {
            0.0
        };
        self.config.radial_base_radius
            + f64::from(depth.saturating_sub(1)) * self.config.radial_radius_step
            + extra
    }
}

#[cfg(test)]
mod tests {
    use super::radial_layout;
    use crate::config::EngineConfig;
    use crate::model::edge::Edge;
    use crate::model::node::Node;

    fn star(child_count: usize) -> (Vec<Node>, Vec<Edge>) {
        let mut nodes = vec![Node::with_id("hub", "Hub", 1)];
        let mut edges = Vec::new();
        for i in 0..child_count {
            let id = format!("c{i}");
            nodes.push(Node::with_id(id.clone(), format!("C{i}"), 2));
            edges.push(Edge::with_id(format!("e{i}"), "hub", id));
        }
        (nodes, edges)
    }

    fn position_of<'a>(nodes: &'a [Node], id: &str) -> &'a crate::model::node::Position {
        &nodes.iter().find(|n| n.id == id).expect("node present").position
    }

    #[test]
    fn lone_node_lands_on_the_margin() {
        let config = EngineConfig::default();
        let nodes = vec![Node::with_id("solo", "Solo", 1)];
        let out = radial_layout(&nodes, &[], &config);
        assert_eq!(out[0].position.x, config.layout_margin);
        assert_eq!(out[0].position.y, config.layout_margin);
    }

    #[test]
    fn children_split_into_both_hemispheres() {
        let config = EngineConfig::default();
        let (nodes, edges) = star(4);
        let out = radial_layout(&nodes, &edges, &config);

        let hub = position_of(&out, "hub");
        // First half fans around angle 0 (right of the hub), second half
        // around pi (left of the hub).
        assert!(position_of(&out, "c0").x > hub.x);
        assert!(position_of(&out, "c1").x > hub.x);
        assert!(position_of(&out, "c2").x < hub.x);
        assert!(position_of(&out, "c3").x < hub.x);
    }

    #[test]
    fn children_sit_on_the_base_radius() {
        let config = EngineConfig::default();
        let (nodes, edges) = star(2);
        let out = radial_layout(&nodes, &edges, &config);
        let hub = position_of(&out, "hub");
        let child = position_of(&out, "c0");
        let distance = ((child.x - hub.x).powi(2) + (child.y - hub.y).powi(2)).sqrt();
        assert!((distance - config.radial_base_radius).abs() < 1e-9);
    }

    #[test]
    fn depth_two_sits_farther_out_than_depth_one() {
        let config = EngineConfig::default();
        let (mut nodes, mut edges) = star(2);
        nodes.push(Node::with_id("g", "G", 3));
        edges.push(Edge::with_id("eg", "c0", "g"));
        let out = radial_layout(&nodes, &edges, &config);

        let hub = position_of(&out, "hub");
        let child = position_of(&out, "c0");
        let grand = position_of(&out, "g");
        let d1 = ((child.x - hub.x).powi(2) + (child.y - hub.y).powi(2)).sqrt();
        let d2 = ((grand.x - hub.x).powi(2) + (grand.y - hub.y).powi(2)).sqrt();
        assert!(d2 > d1);
    }

    #[test]
    fn disconnected_nodes_are_still_positioned() {
        let config = EngineConfig::default();
        let (mut nodes, edges) = star(2);
        nodes.push(Node::with_id("island_a", "IA", 1));
        nodes.push(Node::with_id("island_b", "IB", 1));
        let out = radial_layout(&nodes, &edges, &config);
        let a = position_of(&out, "island_a");
        let b = position_of(&out, "island_b");
        assert!(a.x.is_finite() && a.y.is_finite());
        assert_ne!((a.x, a.y), (b.x, b.y));
    }

    #[test]
    fn cycle_through_stray_edge_terminates() {
        let config = EngineConfig::default();
        let (mut nodes, mut edges) = star(1);
        nodes.push(Node::with_id("g", "G", 3));
        edges.push(Edge::with_id("eg", "c0", "g"));
        edges.push(Edge::with_id("loop", "g", "hub"));
        let out = radial_layout(&nodes, &edges, &config);
        assert_eq!(out.len(), nodes.len());
    }
}
