use std::sync::Arc;

use crate::corpus::{Corpus, Record};

use super::types::{GraphEdge, GraphNode, KnowledgeGraph};

fn cycles_adjacent(a: &Record, b: &Record) -> bool {
    a.cycle.abs_diff(b.cycle) == 1
}

fn edge(source: &Record, target: &Record, is_local: bool) -> GraphEdge {
    GraphEdge {
        source: source.id.clone(),
        target: target.id.clone(),
        is_local,
    }
}

/// Builds the citation network around `focal_entity`.
///
/// The topical domain is taken from the first focal record; related records
/// are every corpus record in that domain owned by another entity. Edges are
/// the union of three independent families and are not deduplicated:
///
/// - evolution: focal record pairs one cycle apart (local),
/// - same cycle: focal/related pairs sharing a cycle,
/// - adjacent cycle: focal/related pairs one cycle apart.
pub fn build_graph(
    focal_entity: &str,
    focal_records: &[Arc<Record>],
    corpus: &[Arc<Record>],
) -> KnowledgeGraph {
    let Some(first) = focal_records.first() else {
        return KnowledgeGraph::new(focal_entity, Vec::new(), Vec::new());
    };
    let domain = first.domain.as_str();

    let related = corpus
        .iter()
        .filter(|record| record.domain == domain && record.entity != focal_entity)
        .collect::<Vec<_>>();

    let nodes = focal_records
        .iter()
        .chain(related.iter().copied())
        .map(|record| GraphNode::new(Arc::clone(record), record.entity == focal_entity))
        .collect::<Vec<_>>();

    let mut edges = Vec::new();

    for (i, earlier) in focal_records.iter().enumerate() {
        for later in &focal_records[i + 1..] {
            if cycles_adjacent(earlier, later) {
                let is_local = earlier.entity == focal_entity && later.entity == focal_entity;
                edges.push(edge(earlier, later, is_local));
            }
        }
    }

    for local in focal_records {
        for other in &related {
            if local.cycle == other.cycle {
                edges.push(edge(local, other, false));
            }
        }
    }

    for local in focal_records {
        for other in &related {
            if cycles_adjacent(local, other) {
                edges.push(edge(local, other, false));
            }
        }
    }

    KnowledgeGraph::new(focal_entity, nodes, edges)
}

/// Builds the graph for `entity` using its records from `corpus`. An unknown
/// entity yields an empty graph.
pub fn build_for_entity(corpus: &Corpus, entity: &str) -> KnowledgeGraph {
    let focal_records = corpus.records_for(entity);
    build_graph(entity, &focal_records, corpus.records())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Ruling;
    use crate::graph::types::{LOCAL_RADIUS, RELATED_RADIUS};

    fn record(id: &str, entity: &str, domain: &str, cycle: u32) -> Arc<Record> {
        Arc::new(Record {
            id: id.to_owned(),
            domain: domain.to_owned(),
            cycle,
            entity: entity.to_owned(),
            ruling: Ruling::PartiallyValidated,
            position: String::new(),
        })
    }

    fn edge_triples(graph: &KnowledgeGraph) -> Vec<(&str, &str, bool)> {
        graph
            .edges()
            .iter()
            .map(|edge| (edge.source.as_str(), edge.target.as_str(), edge.is_local))
            .collect()
    }

    #[test]
    fn two_entity_scenario() {
        let a1 = record("A1", "E1", "X", 1);
        let a2 = record("A2", "E1", "X", 2);
        let b1 = record("B1", "E2", "X", 2);
        let corpus = vec![a1.clone(), a2.clone(), b1];

        let graph = build_graph("E1", &[a1, a2], &corpus);

        let ids = graph.nodes().iter().map(|n| n.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["A1", "A2", "B1"]);
        assert!(graph.nodes()[0].is_local && graph.nodes()[1].is_local);
        assert!(!graph.nodes()[2].is_local);
        assert_eq!(graph.nodes()[0].radius, LOCAL_RADIUS);
        assert_eq!(graph.nodes()[2].radius, RELATED_RADIUS);

        assert_eq!(
            edge_triples(&graph),
            [("A1", "A2", true), ("A2", "B1", false), ("A1", "B1", false)]
        );
    }

    #[test]
    fn empty_focal_records_yield_empty_graph() {
        let corpus = vec![record("B1", "E2", "X", 1)];
        let graph = build_graph("E1", &[], &corpus);
        assert!(graph.is_empty());
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn related_records_come_from_same_domain_other_entities() {
        let a1 = record("A1", "E1", "X", 1);
        let corpus = vec![
            record("C1", "E3", "Y", 1),
            a1.clone(),
            record("B2", "E2", "X", 5),
            record("B1", "E2", "X", 4),
        ];

        let graph = build_graph("E1", &[a1], &corpus);
        let ids = graph.nodes().iter().map(|n| n.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["A1", "B2", "B1"]);
        assert!(!graph.has_citations());
    }

    #[test]
    fn focal_pairs_need_exactly_one_cycle_gap() {
        let focal = vec![
            record("A1", "E1", "X", 1),
            record("A2", "E1", "X", 3),
            record("A3", "E1", "X", 2),
            record("A4", "E1", "X", 2),
        ];

        let graph = build_graph("E1", &focal, &focal);
        assert_eq!(
            edge_triples(&graph),
            [
                ("A1", "A3", true),
                ("A1", "A4", true),
                ("A2", "A3", true),
                ("A2", "A4", true),
            ]
        );
    }

    #[test]
    fn cross_entity_families_are_not_deduplicated() {
        let a1 = record("A1", "E1", "X", 2);
        let corpus = vec![
            a1.clone(),
            record("B1", "E2", "X", 1),
            record("B2", "E2", "X", 2),
            record("B3", "E2", "X", 3),
            record("B4", "E2", "X", 7),
        ];

        let graph = build_graph("E1", &[a1], &corpus);
        assert_eq!(graph.nodes().len(), 5);
        assert_eq!(
            edge_triples(&graph),
            [("A1", "B2", false), ("A1", "B1", false), ("A1", "B3", false)]
        );
    }

    #[test]
    fn local_edges_only_join_local_nodes() {
        let corpus = crate::corpus::load_corpus(None).expect("bundled corpus");
        for entity in corpus.entities() {
            let graph = build_for_entity(&corpus, entity);
            for (source, target, edge) in graph.resolved_edges() {
                if edge.is_local {
                    assert!(graph.nodes()[source].is_local);
                    assert!(graph.nodes()[target].is_local);
                } else {
                    assert!(!graph.nodes()[target].is_local);
                }
            }
            assert_eq!(graph.dangling_edge_count(), 0);
        }
    }

    #[test]
    fn unknown_entity_builds_empty_graph() {
        let corpus = crate::corpus::load_corpus(None).expect("bundled corpus");
        let graph = build_for_entity(&corpus, "Nobody");
        assert!(graph.is_empty());
        assert_eq!(graph.focal_entity(), "Nobody");
    }

    #[test]
    fn node_count_is_focal_plus_related() {
        let corpus = crate::corpus::load_corpus(None).expect("bundled corpus");
        let graph = build_for_entity(&corpus, "Causation_Alpha");
        let focal = corpus.records_for("Causation_Alpha").len();
        let related = corpus
            .records()
            .iter()
            .filter(|r| r.domain == "Causation" && r.entity != "Causation_Alpha")
            .count();
        assert_eq!(graph.nodes().len(), focal + related);
        assert_eq!(graph.nodes().len(), 6);
    }
}
