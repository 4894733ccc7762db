use eframe::egui::{Pos2, Rect};

use citation_graph::graph::KnowledgeGraph;

use super::super::ViewModel;
use super::super::render_utils::canvas_to_screen;

impl ViewModel {
    /// Index of the node under `pointer`, preferring the closest center.
    pub(in crate::app) fn hovered_index(
        graph: &KnowledgeGraph,
        rect: Rect,
        pointer: Option<Pos2>,
    ) -> Option<usize> {
        let pointer = pointer?;
        graph
            .nodes()
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let position = canvas_to_screen(rect, node.position?);
                let distance = position.distance(pointer);
                if distance <= node.radius {
                    Some((index, distance))
                } else {
                    None
                }
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<String>) {
        if self.selected == selected {
            return;
        }

        self.selected = selected;
        self.explanation = None;
    }

    pub(in crate::app) fn set_focal(&mut self, focal: Option<String>) {
        if self.focal == focal {
            return;
        }

        self.focal = focal;
        self.set_selected(None);
        self.invalidate_render_graph();
    }
}
