//! Payload shapes for the outline-exchange boundary.
//!
//! # Responsibility
//! - Define the serde shapes a thin HTTP collaborator ships to and from
//!   the engine.
//!
//! # Invariants
//! - Field names match the camelCase wire shape: `id`, `position.x/y`,
//!   `data.label/description/level`, edge `id/source/target`.

use serde::{Deserialize, Serialize};

use crate::model::edge::Edge;
use crate::model::node::Node;

/// Counters returned alongside an imported graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub node_count: usize,
    pub edge_count: usize,
}

/// Import response: the full graph plus its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportPayload {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub summary: ImportSummary,
}

impl ImportPayload {
    /// Builds the response payload from committed state.
    pub fn from_state(nodes: &[Node], edges: &[Edge]) -> Self {
        Self {
            summary: ImportSummary {
                node_count: nodes.len(),
                edge_count: edges.len(),
            },
            nodes: nodes.to_vec(),
            edges: edges.to_vec(),
        }
    }
}

/// Export response: the serialized outline text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub markdown: String,
}
