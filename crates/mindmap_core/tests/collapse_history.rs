use mindmap_core::{DocumentStore, Edge, HistoryStack, Node};

const OUTLINE: &str = "# Root\n## Alpha\n### A1\n### A2\n## Beta\n";

fn import(text: &str) -> DocumentStore {
    let mut document = DocumentStore::with_defaults();
    document.import_outline(text, None).expect("outline imports");
    document
}

fn node<'a>(document: &'a DocumentStore, label: &str) -> &'a Node {
    document
        .nodes()
        .iter()
        .find(|n| n.data.label == label)
        .expect("node present")
}

#[test]
fn fold_then_unfold_restores_visibility_exactly() {
    let mut document = import(OUTLINE);
    let alpha_id = node(&document, "Alpha").id.clone();

    let hidden_before: Vec<bool> = document.nodes().iter().map(|n| n.data.hidden).collect();
    let edges_before: Vec<bool> = document.edges().iter().map(|e| e.hidden).collect();

    assert!(document.fold(&alpha_id));
    assert!(node(&document, "A1").data.hidden);
    assert!(node(&document, "A2").data.hidden);
    assert!(!node(&document, "Beta").data.hidden);
    assert_eq!(node(&document, "Alpha").data.collapsed_children_count, 2);

    assert!(document.unfold(&alpha_id));
    let hidden_after: Vec<bool> = document.nodes().iter().map(|n| n.data.hidden).collect();
    let edges_after: Vec<bool> = document.edges().iter().map(|e| e.hidden).collect();
    assert_eq!(hidden_before, hidden_after);
    assert_eq!(edges_before, edges_after);
    assert_eq!(node(&document, "Alpha").data.collapsed_children_count, 0);
    assert!(!node(&document, "Alpha").data.is_collapsed);
}

#[test]
fn folding_a_leaf_is_a_silent_no_op() {
    let mut document = import(OUTLINE);
    let leaf_id = node(&document, "A1").id.clone();
    let before: Vec<Node> = document.nodes().to_vec();

    assert!(!document.fold(&leaf_id));
    assert_eq!(document.nodes(), before.as_slice());
}

#[test]
fn collapse_never_pushes_history() {
    let mut document = import(OUTLINE);
    let alpha_id = node(&document, "Alpha").id.clone();

    document.fold(&alpha_id);
    document.unfold(&alpha_id);
    // Only the import snapshot exists, so undo has nowhere to go.
    assert!(!document.undo());
}

#[test]
fn undo_redo_symmetry_over_three_mutations() {
    let mut document = import(OUTLINE);
    let s0_nodes = document.nodes().to_vec();
    let s0_edges = document.edges().to_vec();

    let root_id = node(&document, "Root").id.clone();
    document.add_node(Some(&root_id), "Gamma").expect("adds");
    document.add_node(Some(&root_id), "Delta").expect("adds");
    document.add_node(None, "Orphan").expect("adds");
    let s3_nodes = document.nodes().to_vec();
    let s3_edges = document.edges().to_vec();

    assert!(document.undo());
    assert!(document.undo());
    assert!(document.undo());
    assert_eq!(document.nodes(), s0_nodes.as_slice());
    assert_eq!(document.edges(), s0_edges.as_slice());

    assert!(document.redo());
    assert!(document.redo());
    assert!(document.redo());
    assert_eq!(document.nodes(), s3_nodes.as_slice());
    assert_eq!(document.edges(), s3_edges.as_slice());

    // Past the ends both directions are silent no-ops.
    assert!(!document.redo());
}

#[test]
fn history_capacity_keeps_the_newest_hundred() {
    let mut history = HistoryStack::new(100);
    for i in 0..150 {
        let nodes = vec![Node::with_id("n", format!("s{i}"), 1)];
        history.push(&nodes, &[]);
    }
    assert_eq!(history.len(), 100);

    let mut oldest = None;
    while let Some(entry) = history.undo() {
        oldest = Some(entry);
    }
    let oldest = oldest.expect("history not empty");
    assert_eq!(oldest.nodes[0].data.label, "s50");
}

#[test]
fn history_snapshots_do_not_alias_canonical_state() {
    let mut history = HistoryStack::new(10);
    let mut nodes = vec![Node::with_id("n", "original", 1)];
    let edges = vec![Edge::with_id("e", "n", "m")];
    history.push(&nodes, &edges);
    history.push(&nodes, &edges);

    nodes[0].data.label = "mutated".to_string();
    let entry = history.undo().expect("snapshot available");
    assert_eq!(entry.nodes[0].data.label, "original");
}
