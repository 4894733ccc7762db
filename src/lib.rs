//! Citation graphs for adversarial claim archives.
//!
//! A [`corpus::Corpus`] holds the immutable claim records. For a focal
//! entity, [`graph::build_graph`] assembles the citation network and
//! [`layout::force_layout`] positions it on a canvas with a fixed-length,
//! fully deterministic force simulation. [`explain::Explainer`] wraps the
//! plain-language paraphrase service used by the viewer.

pub mod corpus;
pub mod explain;
pub mod graph;
pub mod layout;
pub mod util;
