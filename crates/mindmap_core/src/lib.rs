//! Core engine for the hierarchical mind-map editor.
//! This crate is the single source of truth for structural invariants.

pub mod collapse;
pub mod config;
pub mod document;
pub mod exchange;
pub mod graph;
pub mod history;
pub mod layout;
pub mod logging;
pub mod model;
pub mod outline;

pub use config::EngineConfig;
pub use document::{CommitOptions, DocumentError, DocumentStore};
pub use exchange::{ExportPayload, ImportPayload, ImportSummary};
pub use graph::branch::assign_branch_metadata;
pub use graph::{
    build_graph_maps, collect_subtree_ids, merge_engine_state, normalize, GraphMaps,
};
pub use history::{HistoryEntry, HistoryStack};
pub use layout::{apply_layout, LayoutMode, Orientation};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::edge::{Edge, EdgeId};
pub use model::node::{Node, NodeData, NodeId, Position};
pub use outline::{parse_outline, serialize_outline, OutlineError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
