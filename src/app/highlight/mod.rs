use std::collections::HashSet;

use citation_graph::graph::KnowledgeGraph;

use super::HighlightState;

/// The selected node, its direct citations, and the edges joining them.
pub(super) fn build_highlight_state(graph: &KnowledgeGraph, selected_id: &str) -> Option<HighlightState> {
    let selected_index = graph.index_of(selected_id)?;

    let mut nodes = HashSet::new();
    let mut edges = HashSet::new();
    nodes.insert(selected_index);

    for (edge_index, (source, target, _)) in graph.resolved_edges().enumerate() {
        if source == selected_index || target == selected_index {
            nodes.insert(source);
            nodes.insert(target);
            edges.insert(edge_index);
        }
    }

    Some(HighlightState { nodes, edges })
}

/// Ids of nodes sharing an edge with `selected_id`, in node order.
pub(super) fn neighbor_ids<'a>(graph: &'a KnowledgeGraph, selected_id: &str) -> Vec<&'a str> {
    let Some(state) = build_highlight_state(graph, selected_id) else {
        return Vec::new();
    };

    graph
        .nodes()
        .iter()
        .enumerate()
        .filter(|(index, node)| state.nodes.contains(index) && node.id != selected_id)
        .map(|(_, node)| node.id.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use citation_graph::corpus::load_corpus;
    use citation_graph::graph::build_for_entity;

    #[test]
    fn highlight_covers_selected_node_and_its_edges() {
        let corpus = load_corpus(None).expect("bundled corpus");
        let graph = build_for_entity(&corpus, "Causation_Alpha");

        let state = build_highlight_state(&graph, "#023").expect("node exists");
        assert!(state.nodes.contains(&graph.index_of("#023").expect("indexed")));
        assert!(!state.edges.is_empty());

        assert!(build_highlight_state(&graph, "#999").is_none());
    }

    #[test]
    fn neighbors_exclude_the_selection() {
        let corpus = load_corpus(None).expect("bundled corpus");
        let graph = build_for_entity(&corpus, "Causation_Alpha");

        let neighbors = neighbor_ids(&graph, "#023");
        assert!(!neighbors.contains(&"#023"));
        assert!(neighbors.contains(&"#029"));
        assert!(neighbors.contains(&"#024"));
    }
}
