use std::collections::HashMap;
use std::sync::Arc;

use eframe::egui::Vec2;

use crate::corpus::Record;

pub const LOCAL_RADIUS: f32 = 24.0;
pub const RELATED_RADIUS: f32 = 16.0;

#[derive(Clone, Debug)]
pub struct GraphNode {
    pub id: String,
    pub record: Arc<Record>,
    /// `None` until a layout run has positioned the node.
    pub position: Option<Vec2>,
    pub radius: f32,
    pub is_local: bool,
}

impl GraphNode {
    pub fn new(record: Arc<Record>, is_local: bool) -> Self {
        Self {
            id: record.id.clone(),
            record,
            position: None,
            radius: if is_local { LOCAL_RADIUS } else { RELATED_RADIUS },
            is_local,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub is_local: bool,
}

/// Nodes and edges of one focal entity's citation network.
///
/// The node and edge sets are fixed at construction; only node positions
/// change afterwards, and only through the layout engine.
#[derive(Clone, Debug, Default)]
pub struct KnowledgeGraph {
    focal_entity: String,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    index_by_id: HashMap<String, usize>,
}

impl KnowledgeGraph {
    pub fn new(focal_entity: &str, nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        let mut index_by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            index_by_id.entry(node.id.clone()).or_insert(index);
        }

        Self {
            focal_entity: focal_entity.to_owned(),
            nodes,
            edges,
            index_by_id,
        }
    }

    pub fn focal_entity(&self) -> &str {
        &self.focal_entity
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [GraphNode] {
        &mut self.nodes
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `false` means there is no citation network to draw yet.
    pub fn has_citations(&self) -> bool {
        !self.edges.is_empty()
    }

    pub fn is_positioned(&self) -> bool {
        !self.nodes.is_empty() && self.nodes.iter().all(|node| node.position.is_some())
    }

    /// Edges whose endpoints both exist, as node indices. Dangling edges are
    /// skipped.
    pub fn resolved_edges(&self) -> impl Iterator<Item = (usize, usize, &GraphEdge)> + '_ {
        self.edges.iter().filter_map(|edge| {
            let source = self.index_of(&edge.source)?;
            let target = self.index_of(&edge.target)?;
            Some((source, target, edge))
        })
    }

    pub fn dangling_edge_count(&self) -> usize {
        self.edges.len() - self.resolved_edges().count()
    }
}
