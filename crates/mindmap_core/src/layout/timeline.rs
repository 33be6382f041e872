//! Timeline layout: one axis, ranked by level.
//!
//! Nodes are stably sorted by `level` (original order preserved for ties)
//! and laid out left to right with a fixed spacing per rank and a small
//! vertical offset proportional to the level.

use std::collections::HashMap;

use crate::config::EngineConfig;
use crate::model::node::{Node, NodeId, Position};

use super::place;

/// Lays out the nodes along a single level-ordered axis.
pub fn timeline_layout(nodes: &[Node], config: &EngineConfig) -> Vec<Node> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<&Node> = nodes.iter().filter(|n| !n.data.is_floating).collect();
    ranked.sort_by_key(|node| node.data.level);

    let positions: HashMap<NodeId, Position> = ranked
        .iter()
        .enumerate()
        .map(|(rank, node)| {
            (
                node.id.clone(),
                Position::new(
                    rank as f64 * config.timeline_rank_spacing,
                    f64::from(node.data.level) * config.timeline_level_offset,
                ),
            )
        })
        .collect();

    place(nodes, &positions, config.layout_margin)
}
