mod build;
mod types;

pub use build::{build_for_entity, build_graph};
pub use types::{GraphEdge, GraphNode, KnowledgeGraph, LOCAL_RADIUS, RELATED_RADIUS};
