//! Edge record connecting two nodes.
//!
//! # Invariants
//! - `source != target` under normal construction; mutation operations
//!   reject self-loops, the store itself stays tolerant.
//! - Rendering-style fields the engine does not understand are preserved
//!   verbatim through the flattened `style` map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::node::NodeId;

/// Opaque edge identifier.
pub type EdgeId = String;

/// Structural or auxiliary link between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Stable opaque id.
    pub id: EdgeId,
    /// Parent-side node id.
    pub source: NodeId,
    /// Child-side node id.
    pub target: NodeId,
    /// Visibility flag owned by collapse state.
    #[serde(default)]
    pub hidden: bool,
    /// Stroke tint applied by branch coloring. `None` keeps renderer default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Opaque rendering-style fields, passed through untouched.
    #[serde(flatten)]
    pub style: Map<String, Value>,
}

impl Edge {
    /// Creates an edge with a generated id.
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), source, target)
    }

    /// Creates an edge with a caller-provided id.
    pub fn with_id(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            hidden: false,
            stroke: None,
            style: Map::new(),
        }
    }

    /// True when this edge links the same ordered pair as `other`.
    pub fn same_pair(&self, source: &str, target: &str) -> bool {
        self.source == source && self.target == target
    }
}
