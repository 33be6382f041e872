//! Subtree collapse/expand management.
//!
//! # Responsibility
//! - Toggle visibility of whole subtrees without removing them.
//! - Track collapsed-descendant counts on the fold root.
//!
//! # Invariants
//! - Folding a leaf is a signalled no-op, never a mutation.
//! - `hidden` is reapplied uniformly on expand; a nested fold keeps its
//!   own `is_collapsed` flag untouched by ancestor operations.
//! - Edges are hidden only when both endpoints are inside the subtree.

use crate::graph::{build_graph_maps, collect_subtree_ids};
use crate::model::edge::Edge;
use crate::model::node::Node;

/// Result of one fold/unfold pass.
#[derive(Debug, Clone)]
pub struct CollapseOutcome {
    /// False when the operation was a no-op (leaf or unknown id).
    pub changed: bool,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Hides the subtree below `node_id` and marks the root collapsed.
pub fn fold_branch(nodes: Vec<Node>, edges: Vec<Edge>, node_id: &str) -> CollapseOutcome {
    set_branch_visibility(nodes, edges, node_id, true)
}

/// Restores visibility of the subtree below `node_id`.
pub fn unfold_branch(nodes: Vec<Node>, edges: Vec<Edge>, node_id: &str) -> CollapseOutcome {
    set_branch_visibility(nodes, edges, node_id, false)
}

/// Folds every top-level root (or only `selected` when given),
/// threading the updated state through each step.
pub fn fold_all(
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    selected: Option<&str>,
) -> (Vec<Node>, Vec<Edge>) {
    apply_to_targets(nodes, edges, selected, fold_branch)
}

/// Unfolds every top-level root (or only `selected` when given).
pub fn unfold_all(
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    selected: Option<&str>,
) -> (Vec<Node>, Vec<Edge>) {
    apply_to_targets(nodes, edges, selected, unfold_branch)
}

fn apply_to_targets(
    mut nodes: Vec<Node>,
    mut edges: Vec<Edge>,
    selected: Option<&str>,
    op: fn(Vec<Node>, Vec<Edge>, &str) -> CollapseOutcome,
) -> (Vec<Node>, Vec<Edge>) {
    let targets: Vec<String> = match selected {
        Some(id) => vec![id.to_string()],
        None => {
            let maps = build_graph_maps(&nodes, &edges);
            nodes
                .iter()
                .filter(|node| maps.is_root(&node.id))
                .map(|node| node.id.clone())
                .collect()
        }
    };
    for target in targets {
        let outcome = op(nodes, edges, &target);
        nodes = outcome.nodes;
        edges = outcome.edges;
    }
    (nodes, edges)
}

fn set_branch_visibility(
    mut nodes: Vec<Node>,
    mut edges: Vec<Edge>,
    node_id: &str,
    collapse: bool,
) -> CollapseOutcome {
    let subtree = collect_subtree_ids(node_id, &edges);
    if subtree.len() <= 1 || !nodes.iter().any(|n| n.id == node_id) {
        return CollapseOutcome {
            changed: false,
            nodes,
            edges,
        };
    }

    for node in &mut nodes {
        if node.id == node_id {
            node.data.is_collapsed = collapse;
            node.data.collapsed_children_count = if collapse { subtree.len() - 1 } else { 0 };
        } else if subtree.contains(&node.id) {
            node.data.hidden = collapse;
        }
    }
    for edge in &mut edges {
        if subtree.contains(&edge.source) && subtree.contains(&edge.target) {
            edge.hidden = collapse;
        }
    }

    CollapseOutcome {
        changed: true,
        nodes,
        edges,
    }
}
