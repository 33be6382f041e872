//! Graph store: normalization, structural maps, subtree collection.
//!
//! # Responsibility
//! - Normalize heterogeneous node records into a consistent shape.
//! - Re-attach engine-owned state after structural recomputes.
//! - Derive parent/child/order maps and subtree id sets on demand.
//!
//! # Invariants
//! - Normalization is idempotent.
//! - Child lists preserve edge insertion order; parent is last-edge-wins.
//! - Subtree collection terminates even when the edge set contains a cycle.

pub mod branch;

use std::collections::{HashMap, HashSet};

use crate::config::EngineConfig;
use crate::model::color;
use crate::model::edge::Edge;
use crate::model::node::{Node, NodeId};

/// Derived structural maps. Recomputed on demand, never persisted.
#[derive(Debug, Clone, Default)]
pub struct GraphMaps {
    /// Direct children per node, in edge insertion order.
    pub children: HashMap<NodeId, Vec<NodeId>>,
    /// Structural parent per node. Last edge wins on duplicates.
    pub parent: HashMap<NodeId, NodeId>,
    /// Stable tie-break key: position in the node collection.
    pub order: HashMap<NodeId, usize>,
}

impl GraphMaps {
    /// Direct children of `id`, empty when none.
    pub fn children_of(&self, id: &str) -> &[NodeId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when `id` has no structural parent.
    pub fn is_root(&self, id: &str) -> bool {
        !self.parent.contains_key(id)
    }
}

/// Builds the derived structural maps in one pass over the edges.
pub fn build_graph_maps(nodes: &[Node], edges: &[Edge]) -> GraphMaps {
    let mut maps = GraphMaps::default();
    for (index, node) in nodes.iter().enumerate() {
        maps.order.insert(node.id.clone(), index);
    }
    for edge in edges {
        maps.children
            .entry(edge.source.clone())
            .or_default()
            .push(edge.target.clone());
        maps.parent.insert(edge.target.clone(), edge.source.clone());
    }
    maps
}

/// Fills unset presentation fields with documented defaults.
///
/// Color resolution: a node with `custom_color == true` keeps any explicit
/// color it already carries; otherwise the level accent palette applies.
/// Running this twice yields the same nodes field-for-field.
pub fn normalize(mut nodes: Vec<Node>, config: &EngineConfig) -> Vec<Node> {
    for node in &mut nodes {
        let data = &mut node.data;
        data.level = data.level.max(1);
        if data.font_size.is_none() {
            data.font_size = Some(config.default_font_size);
        }
        if data.body_width.is_none() {
            data.body_width = Some(config.default_body_width);
        }
        if !data.custom_color || data.color.is_none() {
            data.color = Some(config.level_accent(data.level).to_string());
        }
        if data
            .highlight_color
            .as_deref()
            .is_some_and(color::is_no_highlight)
        {
            data.highlight_color = None;
        }
        if !node.position.x.is_finite() || !node.position.y.is_finite() {
            node.position.x = 0.0;
            node.position.y = 0.0;
        }
    }
    nodes
}

/// Recomputes the derived `child_count` field from the current edges.
pub fn refresh_child_counts(nodes: &mut [Node], edges: &[Edge]) {
    let maps = build_graph_maps(nodes, edges);
    for node in nodes.iter_mut() {
        node.data.child_count = maps.children_of(&node.id).len();
    }
}

/// Re-attaches engine-owned state from `previous` onto freshly produced
/// `next` nodes by id.
///
/// A structural recompute (a layout pass, a branch-color pass) may build
/// fresh node values; this keeps collapse, flashcard, and custom-color
/// state alive across it. Nodes only in `next` pass through unchanged;
/// nodes only in `previous` are dropped.
pub fn merge_engine_state(previous: &[Node], mut next: Vec<Node>) -> Vec<Node> {
    let by_id: HashMap<&str, &Node> = previous
        .iter()
        .map(|node| (node.id.as_str(), node))
        .collect();
    for node in &mut next {
        if let Some(prior) = by_id.get(node.id.as_str()) {
            node.data.hidden = prior.data.hidden;
            node.data.is_collapsed = prior.data.is_collapsed;
            node.data.collapsed_children_count = prior.data.collapsed_children_count;
            node.data.flashcard_mode = prior.data.flashcard_mode;
            node.data.is_revealed = prior.data.is_revealed;
            node.data.custom_color = prior.data.custom_color;
            if prior.data.custom_color {
                node.data.color = prior.data.color.clone();
            }
        }
    }
    next
}

/// Collects the ids of the subtree rooted at `root_id`, root included.
///
/// Iterative depth-first walk with an explicit visited set, so a cycle
/// introduced by stray edges cannot loop forever.
pub fn collect_subtree_ids(root_id: &str, edges: &[Edge]) -> HashSet<NodeId> {
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        children
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![root_id];
    while let Some(current) = stack.pop() {
        if !visited.insert(current.to_string()) {
            continue;
        }
        if let Some(kids) = children.get(current) {
            for kid in kids.iter().rev() {
                if !visited.contains(*kid) {
                    stack.push(kid);
                }
            }
        }
    }
    visited
}
