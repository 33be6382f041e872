//! Layout engine: pure positioning passes over the structural graph.
//!
//! # Responsibility
//! - Dispatch the three layout modes (radial, directional tree, timeline).
//! - Shift results into the positive quadrant with a margin.
//!
//! # Invariants
//! - Every mode is a pure function of `(nodes, edges, config)`; input is
//!   never mutated and repeated calls return identical positions.
//! - No produced coordinate is NaN or infinite; nodes missing from the
//!   structural maps are skipped, never a crash.
//! - Floating nodes keep whatever position they already have.

pub mod radial;
pub mod timeline;
pub mod tree;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::model::edge::Edge;
use crate::model::node::{Node, NodeId, Position};

/// Axis of the depth direction in the directional tree layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Depth grows along x; siblings stack along y.
    Row,
    /// Depth grows along y; siblings stack along x.
    Column,
}

/// Presentation mode selecting one layout algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Radial mind-map around a hub node.
    Radial,
    /// Directional tree.
    Tree(Orientation),
    /// Single-axis timeline ordered by level.
    Timeline,
}

/// Runs one layout mode and returns repositioned nodes.
pub fn apply_layout(
    nodes: &[Node],
    edges: &[Edge],
    mode: LayoutMode,
    config: &EngineConfig,
) -> Vec<Node> {
    match mode {
        LayoutMode::Radial => radial::radial_layout(nodes, edges, config),
        LayoutMode::Tree(orientation) => tree::tree_layout(nodes, edges, orientation, config),
        LayoutMode::Timeline => timeline::timeline_layout(nodes, config),
    }
}

/// Writes computed positions onto a copy of the nodes, shifted so the
/// minimum positioned coordinate lands on the margin.
///
/// Nodes without an entry in `positions` (floating nodes, dangling edge
/// references) keep their prior position.
pub(crate) fn place(
    nodes: &[Node],
    positions: &HashMap<NodeId, Position>,
    margin: f64,
) -> Vec<Node> {
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    for p in positions.values() {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
    }
    let (shift_x, shift_y) = if positions.is_empty() {
        (0.0, 0.0)
    } else {
        (margin - min_x, margin - min_y)
    };

    let mut out = nodes.to_vec();
    for node in &mut out {
        if let Some(p) = positions.get(&node.id) {
            node.position = Position::new(p.x + shift_x, p.y + shift_y);
        }
    }
    out
}
