//! Document store: the single-owner mutation surface.
//!
//! # Responsibility
//! - Own the canonical `(nodes, edges)` pair for the active document.
//! - Run every mutation through one commit pipeline: normalize, branch
//!   metadata, optional layout, engine-state merge, history push.
//! - Enforce the history discipline: structural mutations push a
//!   snapshot, visibility-only changes never do.
//!
//! # Invariants
//! - Canonical state changes only inside `commit`, `undo`, or `redo`.
//! - A failed import leaves canonical state untouched and sets a status
//!   message instead.
//! - `connect` is idempotent for duplicate pairs and rejects self-loops
//!   and cycle-creating edges.

use std::error::Error;
use std::fmt::{Display, Formatter};

use log::{debug, info};

use crate::collapse;
use crate::config::EngineConfig;
use crate::exchange::ImportSummary;
use crate::graph::{self, branch};
use crate::history::HistoryStack;
use crate::layout::{self, LayoutMode};
use crate::model::edge::Edge;
use crate::model::node::{Node, NodeId, Position};
use crate::outline::{self, OutlineError};

/// Per-commit pipeline switches.
#[derive(Debug, Clone, Copy)]
pub struct CommitOptions {
    /// Push the committed state onto the history stack.
    pub record_history: bool,
    /// Run this layout mode before committing.
    pub relayout: Option<LayoutMode>,
    /// Re-attach collapse/flashcard/custom-color state from the previous
    /// canonical nodes. Disable when the candidate state is itself the
    /// source of truth for those flags (collapse ops, imports).
    pub preserve_engine_state: bool,
}

impl Default for CommitOptions {
    fn default() -> Self {
        Self {
            record_history: true,
            relayout: None,
            preserve_engine_state: true,
        }
    }
}

/// Errors from document-level operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Import input text is empty or whitespace-only.
    EmptyOutline,
    /// Referenced node does not exist in the document.
    NodeNotFound(NodeId),
    /// Edge endpoints are the same node.
    SelfLoop(NodeId),
    /// Connecting would create a cycle in the primary hierarchy.
    CycleDetected { source: NodeId, target: NodeId },
    /// Transcoding failure.
    Outline(OutlineError),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyOutline => write!(f, "outline text is empty"),
            Self::NodeNotFound(id) => write!(f, "node not found: {id}"),
            Self::SelfLoop(id) => write!(f, "edge endpoints are the same node: {id}"),
            Self::CycleDetected { source, target } => {
                write!(f, "edge would create cycle: {source} -> {target}")
            }
            Self::Outline(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Outline(err) => Some(err),
            _ => None,
        }
    }
}

impl From<OutlineError> for DocumentError {
    fn from(value: OutlineError) -> Self {
        match value {
            OutlineError::EmptyInput => Self::EmptyOutline,
            other => Self::Outline(other),
        }
    }
}

/// Canonical document state and its history.
pub struct DocumentStore {
    config: EngineConfig,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    history: HistoryStack,
    status: Option<String>,
}

impl DocumentStore {
    /// Creates an empty document with the given tunables.
    pub fn new(config: EngineConfig) -> Self {
        let history = HistoryStack::new(config.history_capacity);
        Self {
            config,
            nodes: Vec::new(),
            edges: Vec::new(),
            history,
            status: None,
        }
    }

    /// Creates an empty document with default tunables.
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Last user-facing status message, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Runs the commit pipeline and replaces canonical state.
    ///
    /// This is the only entry point that mutates canonical state from a
    /// candidate `(nodes, edges)` pair.
    pub fn commit(&mut self, nodes: Vec<Node>, edges: Vec<Edge>, options: CommitOptions) {
        let normalized = graph::normalize(nodes, &self.config);
        let (mut nodes, edges) = branch::assign_branch_metadata(normalized, edges, &self.config);
        if let Some(mode) = options.relayout {
            nodes = layout::apply_layout(&nodes, &edges, mode, &self.config);
        }
        if options.preserve_engine_state {
            nodes = graph::merge_engine_state(&self.nodes, nodes);
        }
        graph::refresh_child_counts(&mut nodes, &edges);

        self.nodes = nodes;
        self.edges = edges;
        if options.record_history {
            self.history.push(&self.nodes, &self.edges);
        }
        debug!(
            "event=commit module=document status=ok nodes={} edges={} history_len={} recorded={}",
            self.nodes.len(),
            self.edges.len(),
            self.history.len(),
            options.record_history
        );
    }

    /// Adds a node under `parent` (or as a new root) and returns its id.
    pub fn add_node(
        &mut self,
        parent: Option<&str>,
        label: &str,
    ) -> Result<NodeId, DocumentError> {
        let mut nodes = self.nodes.clone();
        let mut edges = self.edges.clone();

        let (level, position) = match parent {
            Some(parent_id) => {
                let parent_node = self.require_node(parent_id)?;
                (
                    parent_node.data.level + 1,
                    Position::new(
                        parent_node.position.x + self.config.level_spacing_x,
                        parent_node.position.y + self.config.sibling_spacing,
                    ),
                )
            }
            None => (1, Position::new(self.config.layout_margin, self.config.layout_margin)),
        };

        let mut node = Node::new(label, level);
        node.position = position;
        let id = node.id.clone();
        nodes.push(node);
        if let Some(parent_id) = parent {
            edges.push(Edge::new(parent_id, id.clone()));
        }
        self.commit(nodes, edges, CommitOptions::default());
        Ok(id)
    }

    /// Deletes a node together with its whole subtree.
    pub fn delete_node(&mut self, id: &str) -> Result<(), DocumentError> {
        self.require_node(id)?;
        let subtree = graph::collect_subtree_ids(id, &self.edges);

        let nodes: Vec<Node> = self
            .nodes
            .iter()
            .filter(|node| !subtree.contains(&node.id))
            .cloned()
            .collect();
        let edges: Vec<Edge> = self
            .edges
            .iter()
            .filter(|edge| !subtree.contains(&edge.source) && !subtree.contains(&edge.target))
            .cloned()
            .collect();
        self.commit(nodes, edges, CommitOptions::default());
        Ok(())
    }

    /// Duplicates a single node next to the original, under the same
    /// parent, and returns the copy's id.
    pub fn duplicate_node(&mut self, id: &str) -> Result<NodeId, DocumentError> {
        let original = self.require_node(id)?.clone();
        let maps = graph::build_graph_maps(&self.nodes, &self.edges);

        let mut copy = original.clone();
        copy.id = uuid::Uuid::new_v4().to_string();
        copy.position.x += self.config.sibling_spacing / 2.0;
        copy.position.y += self.config.sibling_spacing / 2.0;
        copy.data.child_count = 0;
        copy.data.is_collapsed = false;
        copy.data.collapsed_children_count = 0;
        let copy_id = copy.id.clone();

        let mut nodes = self.nodes.clone();
        let mut edges = self.edges.clone();
        nodes.push(copy);
        if let Some(parent_id) = maps.parent.get(id) {
            edges.push(Edge::new(parent_id.clone(), copy_id.clone()));
        }
        self.commit(nodes, edges, CommitOptions::default());
        Ok(copy_id)
    }

    /// Moves a node (with its subtree) under a new parent.
    pub fn reparent(&mut self, id: &str, new_parent: &str) -> Result<(), DocumentError> {
        if id == new_parent {
            return Err(DocumentError::SelfLoop(id.to_string()));
        }
        let node_level = self.require_node(id)?.data.level;
        let parent_level = self.require_node(new_parent)?.data.level;

        let subtree = graph::collect_subtree_ids(id, &self.edges);
        if subtree.contains(new_parent) {
            return Err(DocumentError::CycleDetected {
                source: new_parent.to_string(),
                target: id.to_string(),
            });
        }

        let delta = i64::from(parent_level) + 1 - i64::from(node_level);
        let mut nodes = self.nodes.clone();
        for node in &mut nodes {
            if subtree.contains(&node.id) {
                let level = i64::from(node.data.level) + delta;
                node.data.level = u32::try_from(level.max(1)).unwrap_or(1);
            }
        }
        let mut edges: Vec<Edge> = self
            .edges
            .iter()
            .filter(|edge| edge.target != id)
            .cloned()
            .collect();
        edges.push(Edge::new(new_parent, id));
        self.commit(nodes, edges, CommitOptions::default());
        Ok(())
    }

    /// Connects two existing nodes.
    ///
    /// Returns `Ok(false)` without mutating when the pair is already
    /// connected (idempotent connect).
    pub fn connect(&mut self, source: &str, target: &str) -> Result<bool, DocumentError> {
        if source == target {
            return Err(DocumentError::SelfLoop(source.to_string()));
        }
        self.require_node(source)?;
        self.require_node(target)?;

        if self.edges.iter().any(|edge| edge.same_pair(source, target)) {
            debug!("event=connect module=document status=noop source={source} target={target}");
            return Ok(false);
        }
        let downstream = graph::collect_subtree_ids(target, &self.edges);
        if downstream.contains(source) {
            return Err(DocumentError::CycleDetected {
                source: source.to_string(),
                target: target.to_string(),
            });
        }

        let nodes = self.nodes.clone();
        let mut edges = self.edges.clone();
        edges.push(Edge::new(source, target));
        self.commit(nodes, edges, CommitOptions::default());
        Ok(true)
    }

    /// Renames a node label.
    pub fn rename_node(&mut self, id: &str, label: &str) -> Result<(), DocumentError> {
        self.require_node(id)?;
        let mut nodes = self.nodes.clone();
        if let Some(node) = nodes.iter_mut().find(|node| node.id == id) {
            node.data.label = label.to_string();
        }
        self.commit(nodes, self.edges.clone(), CommitOptions::default());
        Ok(())
    }

    /// Sets an explicit node color, marking it as a user override.
    pub fn set_node_color(&mut self, id: &str, color: &str) -> Result<(), DocumentError> {
        self.require_node(id)?;
        let mut nodes = self.nodes.clone();
        if let Some(node) = nodes.iter_mut().find(|node| node.id == id) {
            node.data.custom_color = true;
            node.data.color = Some(color.to_string());
        }
        // The candidate owns the custom-color flag here; merging the prior
        // state back in would undo the override.
        self.commit(
            nodes,
            self.edges.clone(),
            CommitOptions {
                preserve_engine_state: false,
                ..CommitOptions::default()
            },
        );
        Ok(())
    }

    /// Collapses the subtree below `id`. Returns whether anything changed.
    /// Visibility-only: never pushes history.
    pub fn fold(&mut self, id: &str) -> bool {
        let outcome = collapse::fold_branch(self.nodes.clone(), self.edges.clone(), id);
        self.adopt_collapse(outcome)
    }

    /// Expands the subtree below `id`. Returns whether anything changed.
    pub fn unfold(&mut self, id: &str) -> bool {
        let outcome = collapse::unfold_branch(self.nodes.clone(), self.edges.clone(), id);
        self.adopt_collapse(outcome)
    }

    /// Collapses every top-level root, or only `selected` when given.
    pub fn fold_all(&mut self, selected: Option<&str>) {
        let (nodes, edges) = collapse::fold_all(self.nodes.clone(), self.edges.clone(), selected);
        self.commit(nodes, edges, visibility_only());
    }

    /// Expands every top-level root, or only `selected` when given.
    pub fn unfold_all(&mut self, selected: Option<&str>) {
        let (nodes, edges) = collapse::unfold_all(self.nodes.clone(), self.edges.clone(), selected);
        self.commit(nodes, edges, visibility_only());
    }

    /// Repositions the document with the given layout mode.
    pub fn apply_layout(&mut self, mode: LayoutMode) {
        self.commit(
            self.nodes.clone(),
            self.edges.clone(),
            CommitOptions {
                relayout: Some(mode),
                ..CommitOptions::default()
            },
        );
    }

    /// Steps canonical state one snapshot back. Silent no-op at the start.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(entry) => {
                self.nodes = entry.nodes;
                self.edges = entry.edges;
                true
            }
            None => false,
        }
    }

    /// Steps canonical state one snapshot forward. Silent no-op at the end.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(entry) => {
                self.nodes = entry.nodes;
                self.edges = entry.edges;
                true
            }
            None => false,
        }
    }

    /// Replaces the document with a parsed outline.
    ///
    /// On any error canonical state is unchanged and the status message
    /// carries the failure.
    pub fn import_outline(
        &mut self,
        text: &str,
        relayout: Option<LayoutMode>,
    ) -> Result<ImportSummary, DocumentError> {
        let parsed = outline::parse_outline(text, &self.config);
        let (nodes, edges) = match parsed {
            Ok(pair) => pair,
            Err(err) => {
                let err: DocumentError = err.into();
                self.status = Some(err.to_string());
                return Err(err);
            }
        };

        self.commit(
            nodes,
            edges,
            CommitOptions {
                record_history: true,
                relayout,
                preserve_engine_state: false,
            },
        );
        let summary = ImportSummary {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
        };
        self.status = Some(format!(
            "imported {} nodes, {} edges",
            summary.node_count, summary.edge_count
        ));
        info!(
            "event=import module=document status=ok nodes={} edges={}",
            summary.node_count, summary.edge_count
        );
        Ok(summary)
    }

    /// Serializes the document to outline text.
    pub fn export_outline(&self) -> String {
        outline::serialize_outline(&self.nodes, &self.edges)
    }

    fn adopt_collapse(&mut self, outcome: collapse::CollapseOutcome) -> bool {
        if !outcome.changed {
            return false;
        }
        self.commit(outcome.nodes, outcome.edges, visibility_only());
        true
    }

    fn require_node(&self, id: &str) -> Result<&Node, DocumentError> {
        self.nodes
            .iter()
            .find(|node| node.id == id)
            .ok_or_else(|| DocumentError::NodeNotFound(id.to_string()))
    }
}

/// Commit switches for hidden-flag-only changes: no history, and the
/// candidate state owns the visibility flags.
fn visibility_only() -> CommitOptions {
    CommitOptions {
        record_history: false,
        relayout: None,
        preserve_engine_state: false,
    }
}
