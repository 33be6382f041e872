//! Outline text to graph conversion.
//!
//! Two productions create nodes: a heading line (`#{1..6} label`) and an
//! indented bullet line (`- label`, indent counted in 2-space units, one
//! level per unit below the most recent heading). Unindented bullets and
//! any other non-blank line append a description line to the node
//! produced most recently.
//!
//! # Invariants
//! - Levels are capped at `MAX_OUTLINE_LEVEL`.
//! - The per-level last-seen stack is truncated after every insertion, so
//!   a shallower node invalidates all deeper parent candidates.
//! - Positions assigned here are provisional; a layout pass supersedes
//!   them.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::EngineConfig;
use crate::model::edge::Edge;
use crate::model::node::Node;

use super::{OutlineError, MAX_OUTLINE_LEVEL};

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").expect("valid heading regex"));
static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^( *)-\s+(.*)$").expect("valid bullet regex"));

const INDENT_UNIT: usize = 2;

/// Parses outline text into nodes and parent edges.
///
/// # Errors
/// - `OutlineError::EmptyInput` for empty/whitespace-only text.
/// - `OutlineError::NoContent` when no line produces a node.
pub fn parse_outline(
    text: &str,
    config: &EngineConfig,
) -> Result<(Vec<Node>, Vec<Edge>), OutlineError> {
    if text.trim().is_empty() {
        return Err(OutlineError::EmptyInput);
    }

    let mut parser = Parser {
        config,
        nodes: Vec::new(),
        edges: Vec::new(),
        last_at_level: Vec::new(),
        level_counts: HashMap::new(),
        last_heading_level: 0,
        last_node: None,
    };

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(captures) = HEADING_RE.captures(line) {
            let level = captures[1].len() as u32;
            let label = captures[2].trim().to_string();
            parser.insert_node(label, level);
            parser.last_heading_level = level;
            continue;
        }
        if let Some(captures) = BULLET_RE.captures(line) {
            let units = (captures[1].len() / INDENT_UNIT) as u32;
            let content = captures[2].trim_end().to_string();
            if units == 0 {
                parser.push_description(&content);
            } else {
                let level = parser.last_heading_level + units;
                parser.insert_node(content, level);
            }
            continue;
        }
        parser.push_description(line.trim());
    }

    if parser.nodes.is_empty() {
        return Err(OutlineError::NoContent);
    }
    Ok((parser.nodes, parser.edges))
}

struct Parser<'a> {
    config: &'a EngineConfig,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// Slot `l` holds the index of the last node seen at level `l + 1`.
    last_at_level: Vec<Option<usize>>,
    level_counts: HashMap<u32, usize>,
    last_heading_level: u32,
    last_node: Option<usize>,
}

impl Parser<'_> {
    fn insert_node(&mut self, label: String, level: u32) {
        let level = level.clamp(1, MAX_OUTLINE_LEVEL);
        let mut node = Node::new(label, level);

        let produced_at_level = *self.level_counts.get(&level).unwrap_or(&0);
        node.position.x = f64::from(level - 1) * self.config.level_spacing_x;
        node.position.y = produced_at_level as f64 * self.config.level_spacing_y;

        if let Some(parent_index) = self.resolve_parent(level) {
            let parent_id = self.nodes[parent_index].id.clone();
            self.edges.push(Edge::new(parent_id, node.id.clone()));
        }

        let index = self.nodes.len();
        self.nodes.push(node);
        *self.level_counts.entry(level).or_insert(0) += 1;

        let slot = (level - 1) as usize;
        if self.last_at_level.len() <= slot {
            self.last_at_level.resize(slot + 1, None);
        }
        self.last_at_level[slot] = Some(index);
        self.last_at_level.truncate(level as usize);
        self.last_node = Some(index);
    }

    /// Nearest tracked ancestor: first occupied slot scanning from level
    /// `L - 1` downward, else the deepest tracked node. Level-1 nodes are
    /// roots and take no parent, as does any node before the first one
    /// is tracked.
    fn resolve_parent(&self, level: u32) -> Option<usize> {
        if level <= 1 || self.last_at_level.is_empty() {
            return None;
        }
        let top_candidate = ((level - 2) as usize).min(self.last_at_level.len() - 1);
        for slot in (0..=top_candidate).rev() {
            if let Some(index) = self.last_at_level[slot] {
                return Some(index);
            }
        }
        self.last_at_level.iter().rev().flatten().next().copied()
    }

    fn push_description(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        if let Some(index) = self.last_node {
            self.nodes[index].push_description_line(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_outline;
    use crate::config::EngineConfig;
    use crate::graph::build_graph_maps;
    use crate::outline::OutlineError;

    #[test]
    fn empty_text_is_a_client_input_error() {
        let config = EngineConfig::default();
        assert_eq!(parse_outline("   \n\n", &config), Err(OutlineError::EmptyInput));
    }

    #[test]
    fn free_text_without_nodes_is_no_content() {
        let config = EngineConfig::default();
        assert_eq!(
            parse_outline("just a sentence\nanother", &config),
            Err(OutlineError::NoContent)
        );
    }

    #[test]
    fn headings_nest_by_marker_count() {
        let config = EngineConfig::default();
        let (nodes, edges) = parse_outline("# A\n## B\n### C\n## D", &config).expect("parses");
        assert_eq!(nodes.len(), 4);

        let maps = build_graph_maps(&nodes, &edges);
        assert_eq!(maps.parent.get(&nodes[1].id), Some(&nodes[0].id));
        assert_eq!(maps.parent.get(&nodes[2].id), Some(&nodes[1].id));
        // D returns to level 2; its parent is A, not C.
        assert_eq!(maps.parent.get(&nodes[3].id), Some(&nodes[0].id));
    }

    #[test]
    fn unindented_bullets_become_description_lines() {
        let config = EngineConfig::default();
        let text = "# Measles\n- fever\n- rash\n## Complications\n- pneumonia\n";
        let (nodes, edges) = parse_outline(text, &config).expect("parses");

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].data.label, "Measles");
        assert_eq!(nodes[0].data.description, "fever\nrash");
        assert_eq!(nodes[1].data.label, "Complications");
        assert_eq!(nodes[1].data.description, "pneumonia");
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, nodes[0].id);
    }

    #[test]
    fn indented_bullets_create_nodes_below_the_heading() {
        let config = EngineConfig::default();
        let text = "### Deep\n  - four\n    - five\n";
        let (nodes, edges) = parse_outline(text, &config).expect("parses");

        assert_eq!(nodes[1].data.level, 4);
        assert_eq!(nodes[2].data.level, 5);
        let maps = build_graph_maps(&nodes, &edges);
        assert_eq!(maps.parent.get(&nodes[1].id), Some(&nodes[0].id));
        assert_eq!(maps.parent.get(&nodes[2].id), Some(&nodes[1].id));
    }

    #[test]
    fn deep_heading_as_first_line_becomes_a_root() {
        let config = EngineConfig::default();
        let (nodes, edges) = parse_outline("## Orphan\n", &config).expect("parses");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].data.level, 2);
        assert!(edges.is_empty());

        let (nodes, edges) = parse_outline("###### Six\n# After\n", &config).expect("parses");
        assert_eq!(nodes.len(), 2);
        assert!(edges.is_empty());
    }

    #[test]
    fn level_jump_attaches_to_nearest_shallower_node() {
        let config = EngineConfig::default();
        let text = "# A\n#### Jump\n";
        let (nodes, edges) = parse_outline(text, &config).expect("parses");
        let maps = build_graph_maps(&nodes, &edges);
        assert_eq!(maps.parent.get(&nodes[1].id), Some(&nodes[0].id));
    }

    #[test]
    fn bullet_levels_cap_at_six() {
        let config = EngineConfig::default();
        let text = "###### Six\n          - very deep\n";
        let (nodes, _) = parse_outline(text, &config).expect("parses");
        assert_eq!(nodes[1].data.level, 6);
    }

    #[test]
    fn provisional_positions_step_by_level_and_count() {
        let config = EngineConfig::default();
        let (nodes, _) = parse_outline("# A\n## B\n## C", &config).expect("parses");
        assert_eq!(nodes[1].position.x, config.level_spacing_x);
        assert_eq!(nodes[2].position.y, config.level_spacing_y);
    }

    #[test]
    fn two_roots_stay_separate() {
        let config = EngineConfig::default();
        let (nodes, edges) = parse_outline("# One\n# Two", &config).expect("parses");
        assert_eq!(nodes.len(), 2);
        assert!(edges.is_empty());
    }
}
