//! Node record and its engine-relevant presentation attributes.
//!
//! # Invariants
//! - `id` is stable and never reused for another node.
//! - `level` is 1-based; normalization clamps smaller values up to 1.
//! - A node with `custom_color == true` keeps its explicit `color` through
//!   every derived-color pass.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque node identifier. Compared for equality only, never parsed.
pub type NodeId = String;

/// Layout-assigned 2D position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Canonical node record: identity, position, and display payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Stable opaque id.
    pub id: NodeId,
    /// Layout-assigned position, mutable across layout passes.
    #[serde(default)]
    pub position: Position,
    /// Display payload and engine-relevant presentation state.
    #[serde(default)]
    pub data: NodeData,
}

/// Display payload carried by every node.
///
/// Field names follow the camelCase exchange shape used at the
/// outline-exchange boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeData {
    /// User-facing title.
    pub label: String,
    /// Free-form body text; multi-line.
    pub description: String,
    /// Depth in the primary hierarchy. Root = 1.
    pub level: u32,
    /// Detached from tree positioning; layouts leave this node in place.
    pub is_floating: bool,
    /// Flashcard display state: label hidden until revealed.
    pub flashcard_mode: bool,
    /// Flashcard visibility flag.
    pub is_revealed: bool,
    /// Subtree below this node is folded away.
    pub is_collapsed: bool,
    /// Number of descendants hidden by the current fold. 0 when expanded.
    pub collapsed_children_count: usize,
    /// Derived direct-child count. Informational, never authoritative.
    pub child_count: usize,
    /// Derived branch identity: id of the branch root this node belongs to.
    pub branch_key: Option<NodeId>,
    /// Derived branch color (depth-tinted toward white).
    pub branch_color: Option<String>,
    /// User override flag: derived color passes must not touch `color`.
    pub custom_color: bool,
    /// Derived visibility flag owned by collapse state.
    pub hidden: bool,
    /// Fill/border accent color (`#rrggbb`).
    pub color: Option<String>,
    /// Label font size in points.
    pub font_size: Option<f64>,
    /// Node body width in canvas units.
    pub body_width: Option<f64>,
    /// Highlight color; `#00000000` means no highlight.
    pub highlight_color: Option<String>,
}

impl Default for NodeData {
    fn default() -> Self {
        Self {
            label: String::new(),
            description: String::new(),
            level: 1,
            is_floating: false,
            flashcard_mode: false,
            is_revealed: true,
            is_collapsed: false,
            collapsed_children_count: 0,
            child_count: 0,
            branch_key: None,
            branch_color: None,
            custom_color: false,
            hidden: false,
            color: None,
            font_size: None,
            body_width: None,
            highlight_color: None,
        }
    }
}

impl Node {
    /// Creates a node with a generated id and default presentation state.
    pub fn new(label: impl Into<String>, level: u32) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), label, level)
    }

    /// Creates a node with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: impl Into<NodeId>, label: impl Into<String>, level: u32) -> Self {
        Self {
            id: id.into(),
            position: Position::default(),
            data: NodeData {
                label: label.into(),
                level: level.max(1),
                ..NodeData::default()
            },
        }
    }

    /// Appends one line to the node description.
    pub fn push_description_line(&mut self, line: &str) {
        if !self.data.description.is_empty() {
            self.data.description.push('\n');
        }
        self.data.description.push_str(line);
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, NodeData};

    #[test]
    fn new_node_clamps_level_to_one() {
        let node = Node::new("root", 0);
        assert_eq!(node.data.level, 1);
    }

    #[test]
    fn default_data_is_revealed_and_expanded() {
        let data = NodeData::default();
        assert!(data.is_revealed);
        assert!(!data.is_collapsed);
        assert_eq!(data.collapsed_children_count, 0);
    }

    #[test]
    fn description_lines_join_with_newline() {
        let mut node = Node::new("n", 1);
        node.push_description_line("fever");
        node.push_description_line("rash");
        assert_eq!(node.data.description, "fever\nrash");
    }

    #[test]
    fn wire_shape_uses_camel_case_data_fields() {
        let node = Node::with_id("n1", "Measles", 1);
        let value = serde_json::to_value(&node).expect("node serializes");
        assert_eq!(value["id"], "n1");
        assert_eq!(value["data"]["label"], "Measles");
        assert_eq!(value["data"]["level"], 1);
        assert_eq!(value["data"]["isRevealed"], true);
        assert!(value["position"]["x"].is_number());
    }
}
