use log::info;

use citation_graph::graph::build_for_entity;
use citation_graph::layout::{Canvas, LayoutStatus, force_layout};

use super::super::{RenderGraph, ViewModel};

impl ViewModel {
    fn render_graph_is_current(&self, focal: &str, canvas: Canvas) -> bool {
        self.graph_cache
            .as_ref()
            .is_some_and(|cache| cache.focal == focal && cache.canvas == canvas)
    }

    /// Rebuilds and re-lays out the focal graph whenever the focal entity or
    /// the canvas size changed. Nothing is reused from the previous graph.
    pub(in crate::app) fn ensure_render_graph(&mut self, canvas: Canvas) {
        let Some(focal) = self.focal.clone() else {
            self.graph_cache = None;
            return;
        };

        if self.render_graph_is_current(&focal, canvas) {
            return;
        }

        let mut graph = build_for_entity(&self.corpus, &focal);
        let report = force_layout(&mut graph, canvas, &self.layout_config);
        if report.status == LayoutStatus::Positioned {
            info!(
                "citation graph for {focal}: {} nodes, {} edges",
                graph.nodes().len(),
                graph.edges().len()
            );
        }

        if let Some(selected) = &self.selected
            && graph.node(selected).is_none()
        {
            self.selected = None;
            self.explanation = None;
        }

        self.graph_cache = Some(RenderGraph {
            focal,
            canvas,
            graph,
            report,
        });
    }

    pub(in crate::app) fn invalidate_render_graph(&mut self) {
        self.graph_cache = None;
    }
}
