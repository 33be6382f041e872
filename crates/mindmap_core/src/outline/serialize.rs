//! Graph to outline text conversion.
//!
//! Roots are visited in ascending-y order, pre-order within each tree,
//! children also in ascending-y order. Depth <= 3 renders as a heading of
//! that depth, deeper nodes as an indented bullet; description lines
//! render as unindented bullets right after the node's own line.

use std::collections::{HashMap, HashSet};

use crate::graph::build_graph_maps;
use crate::model::edge::Edge;
use crate::model::node::Node;

const HEADING_DEPTH_MAX: usize = 3;
const INDENT: &str = "  ";

/// Serializes the graph to outline text.
///
/// Structure and labels round-trip through `parse_outline`; positions and
/// styling do not.
pub fn serialize_outline(nodes: &[Node], edges: &[Edge]) -> String {
    let maps = build_graph_maps(nodes, edges);
    let by_id: HashMap<&str, &Node> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    let mut roots: Vec<&Node> = nodes.iter().filter(|n| maps.is_root(&n.id)).collect();
    roots.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));

    let mut out = String::new();
    let mut visited: HashSet<&str> = HashSet::new();
    for root in roots {
        emit(root, 1, &maps, &by_id, &mut visited, &mut out);
    }
    out
}

fn emit<'a>(
    node: &'a Node,
    depth: usize,
    maps: &crate::graph::GraphMaps,
    by_id: &HashMap<&'a str, &'a Node>,
    visited: &mut HashSet<&'a str>,
    out: &mut String,
) {
    if !visited.insert(node.id.as_str()) {
        return;
    }

    if depth <= HEADING_DEPTH_MAX {
        out.push_str(&"#".repeat(depth));
        out.push(' ');
    } else {
        out.push_str(&INDENT.repeat(depth - HEADING_DEPTH_MAX));
        out.push_str("- ");
    }
    out.push_str(&node.data.label);
    out.push('\n');

    for line in node.data.description.lines() {
        if line.trim().is_empty() {
            continue;
        }
        out.push_str("- ");
        out.push_str(line);
        out.push('\n');
    }

    let mut children: Vec<&Node> = maps
        .children_of(&node.id)
        .iter()
        .filter_map(|id| by_id.get(id.as_str()).copied())
        .collect();
    children.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));
    for child in children {
        emit(child, depth + 1, maps, by_id, visited, out);
    }
}

#[cfg(test)]
mod tests {
    use super::serialize_outline;
    use crate::model::edge::Edge;
    use crate::model::node::{Node, Position};

    #[test]
    fn headings_then_bullets_by_depth() {
        let mut nodes = vec![
            Node::with_id("a", "A", 1),
            Node::with_id("b", "B", 2),
            Node::with_id("c", "C", 3),
            Node::with_id("d", "D", 4),
        ];
        for (i, node) in nodes.iter_mut().enumerate() {
            node.position = Position::new(0.0, i as f64 * 10.0);
        }
        let edges = vec![
            Edge::with_id("e1", "a", "b"),
            Edge::with_id("e2", "b", "c"),
            Edge::with_id("e3", "c", "d"),
        ];
        let text = serialize_outline(&nodes, &edges);
        assert_eq!(text, "# A\n## B\n### C\n  - D\n");
    }

    #[test]
    fn description_lines_render_as_unindented_bullets() {
        let mut node = Node::with_id("a", "Measles", 1);
        node.data.description = "fever\nrash".to_string();
        let text = serialize_outline(&[node], &[]);
        assert_eq!(text, "# Measles\n- fever\n- rash\n");
    }

    #[test]
    fn roots_and_children_order_by_y() {
        let mut top = Node::with_id("top", "Top", 1);
        top.position = Position::new(0.0, 5.0);
        let mut bottom = Node::with_id("bottom", "Bottom", 1);
        bottom.position = Position::new(0.0, 50.0);

        let text = serialize_outline(&[bottom.clone(), top.clone()], &[]);
        assert_eq!(text, "# Top\n# Bottom\n");
    }

    #[test]
    fn empty_graph_serializes_to_empty_text() {
        assert!(serialize_outline(&[], &[]).is_empty());
    }
}
