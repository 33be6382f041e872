//! Branch identity and color propagation.
//!
//! # Responsibility
//! - Partition the forest into branches and assign each a palette color.
//! - Propagate the branch key and a depth-lightened color to descendants.
//!
//! # Invariants
//! - Branch roots: isolated childless roots, plus every direct child of a
//!   root that has children.
//! - Discovery order is node order for roots, edge insertion order for
//!   children, so re-running on an unchanged tree is a fixed point.
//! - Depth lightening saturates at the configured cap.

use std::collections::{HashMap, HashSet};

use crate::config::EngineConfig;
use crate::model::color;
use crate::model::edge::Edge;
use crate::model::node::{Node, NodeId};

use super::{build_graph_maps, GraphMaps};

/// Assigns branch keys and depth-tinted colors across the whole forest.
///
/// Always recomputes `branch_key`/`branch_color`. The node display color
/// is overwritten only when branch coloring is enabled and the node has no
/// custom color; edge stroke tinting follows `config.tint_edges`.
pub fn assign_branch_metadata(
    mut nodes: Vec<Node>,
    mut edges: Vec<Edge>,
    config: &EngineConfig,
) -> (Vec<Node>, Vec<Edge>) {
    let maps = build_graph_maps(&nodes, &edges);
    let node_ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

    // key -> (branch root id, lightened color)
    let mut assigned: HashMap<NodeId, (NodeId, String)> = HashMap::new();
    let mut palette_cursor = 0usize;

    for root in root_ids_in_order(&nodes, &maps) {
        let children = maps.children_of(&root);
        if children.is_empty() {
            let base = config.branch_color(palette_cursor).to_string();
            palette_cursor += 1;
            assigned.insert(root.clone(), (root.clone(), base));
            continue;
        }
        for child in children {
            if !node_ids.contains(child.as_str()) {
                continue;
            }
            let base = config.branch_color(palette_cursor).to_string();
            palette_cursor += 1;
            spread_branch(child, &base, &maps, &node_ids, config, &mut assigned);
        }
    }

    for node in &mut nodes {
        match assigned.get(&node.id) {
            Some((key, tinted)) => {
                node.data.branch_key = Some(key.clone());
                node.data.branch_color = Some(tinted.clone());
                if config.colored_branches && !node.data.custom_color {
                    node.data.color = Some(tinted.clone());
                }
            }
            None => {
                node.data.branch_key = None;
                node.data.branch_color = None;
            }
        }
    }

    if config.tint_edges {
        for edge in &mut edges {
            edge.stroke = assigned
                .get(&edge.target)
                .map(|(_, tinted)| tinted.clone());
        }
    }

    (nodes, edges)
}

/// Root ids (no structural parent), in node-collection order.
fn root_ids_in_order(nodes: &[Node], maps: &GraphMaps) -> Vec<NodeId> {
    nodes
        .iter()
        .filter(|node| maps.is_root(&node.id))
        .map(|node| node.id.clone())
        .collect()
}

/// Walks one branch from its root, recording key and depth-tinted color.
fn spread_branch(
    branch_root: &NodeId,
    base_color: &str,
    maps: &GraphMaps,
    node_ids: &HashSet<&str>,
    config: &EngineConfig,
    assigned: &mut HashMap<NodeId, (NodeId, String)>,
) {
    let mut stack: Vec<(NodeId, u32)> = vec![(branch_root.clone(), 0)];
    let mut visited: HashSet<NodeId> = HashSet::new();
    while let Some((id, depth)) = stack.pop() {
        if !visited.insert(id.clone()) {
            continue;
        }
        let amount = (f64::from(depth) * config.lighten_per_depth).min(config.lighten_cap);
        let tinted = color::lighten(base_color, amount).unwrap_or_else(|_| base_color.to_string());
        assigned.insert(id.clone(), (branch_root.clone(), tinted));

        for child in maps.children_of(&id).iter().rev() {
            if node_ids.contains(child.as_str()) && !visited.contains(child) {
                stack.push((child.clone(), depth + 1));
            }
        }
    }
}
