use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Stroke, Ui};

use citation_graph::corpus::Ruling;
use citation_graph::layout::Canvas;
use citation_graph::util::{display_entity, truncate_chars};

use super::super::ViewModel;
use super::super::highlight::build_highlight_state;
use super::super::render_utils::{
    ACCENT, BACKGROUND, MUTED, blend_color, canvas_to_screen, draw_legend, node_fill, node_stroke,
    with_opacity,
};

const NO_NETWORK_TEXT: &str = "No citation network yet. Knowledge graphs form as claims begin\nreferencing each other across cycles.";
const TOOLTIP_TEXT_LIMIT: usize = 150;
const SELECTED: Color32 = Color32::from_rgb(245, 206, 93);

struct NodeTooltip {
    id: String,
    ruling: Ruling,
    cycle: u32,
    text: String,
    foreign_entity: Option<String>,
}

fn show_tooltip(ui: &mut Ui, tooltip: &NodeTooltip) {
    ui.set_max_width(260.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new(&tooltip.id).monospace().strong().color(ACCENT));
        let ruling_color = if tooltip.ruling.survived() {
            Color32::from_gray(163)
        } else {
            ACCENT
        };
        ui.label(
            RichText::new(tooltip.ruling.label())
                .monospace()
                .small()
                .color(ruling_color),
        );
        ui.label(
            RichText::new(format!("CYCLE {}", tooltip.cycle))
                .monospace()
                .small()
                .color(MUTED),
        );
    });
    if !tooltip.text.is_empty() {
        ui.label(
            RichText::new(truncate_chars(&tooltip.text, TOOLTIP_TEXT_LIMIT))
                .color(Color32::from_gray(212)),
        );
    }
    if let Some(entity) = &tooltip.foreign_entity {
        ui.label(RichText::new(display_entity(entity)).monospace().small().color(MUTED));
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 12.0, BACKGROUND);

        self.ensure_render_graph(Canvas::new(rect.width().floor(), rect.height().floor()));

        let mut pending_selection = None;
        let mut tooltip = None;

        {
            let Some(cache) = self.graph_cache.as_ref() else {
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    "Select a state to see its citation network.",
                    FontId::proportional(15.0),
                    MUTED,
                );
                return;
            };
            let graph = &cache.graph;

            if !graph.has_citations() {
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    NO_NETWORK_TEXT,
                    FontId::proportional(16.0),
                    MUTED,
                );
                draw_legend(&painter, rect);
                return;
            }

            if !graph.is_positioned() {
                ui.ctx().request_repaint();
                return;
            }

            let nodes = graph.nodes();
            let hovered = Self::hovered_index(graph, rect, response.hover_pos());
            let highlight = self
                .selected
                .as_deref()
                .and_then(|id| build_highlight_state(graph, id));

            for (edge_index, (source, target, _edge)) in graph.resolved_edges().enumerate() {
                let (Some(start), Some(end)) = (nodes[source].position, nodes[target].position)
                else {
                    continue;
                };

                let is_local = nodes[source].is_local && nodes[target].is_local;
                let (mut width, mut color) = if is_local {
                    (1.5, with_opacity(ACCENT, 0.5))
                } else {
                    (0.8, with_opacity(Color32::from_gray(110), 0.3))
                };

                if let Some(state) = &highlight {
                    if state.edges.contains(&edge_index) {
                        width *= 2.0;
                        color = blend_color(color, SELECTED, 0.6);
                    } else {
                        color = with_opacity(color, 0.12);
                    }
                }

                painter.line_segment(
                    [canvas_to_screen(rect, start), canvas_to_screen(rect, end)],
                    Stroke::new(width, color),
                );
            }

            for (index, node) in nodes.iter().enumerate() {
                let Some(position) = node.position else {
                    continue;
                };
                let center = canvas_to_screen(rect, position);
                let is_selected = self.selected.as_deref() == Some(node.id.as_str());
                let dimmed = highlight
                    .as_ref()
                    .is_some_and(|state| !state.nodes.contains(&index));

                if node.is_local && node.record.ruling.survived() && !dimmed {
                    painter.circle_stroke(
                        center,
                        node.radius + 6.0,
                        Stroke::new(1.0, with_opacity(ACCENT, 0.15)),
                    );
                }

                let mut fill = node_fill(node);
                if hovered == Some(index) {
                    fill = blend_color(fill, Color32::WHITE, 0.18);
                }
                if dimmed {
                    fill = blend_color(fill, BACKGROUND, 0.6);
                }
                painter.circle_filled(center, node.radius, fill);

                let stroke = if is_selected {
                    Stroke::new(3.0, SELECTED)
                } else {
                    Stroke::new(1.5, node_stroke(node))
                };
                painter.circle_stroke(center, node.radius, stroke);

                let (font_size, label_color) = if node.is_local {
                    (10.0, Color32::from_gray(245))
                } else {
                    (8.0, Color32::from_gray(115))
                };
                painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    &node.id,
                    FontId::monospace(font_size),
                    label_color,
                );
            }

            draw_legend(&painter, rect);
            painter.text(
                rect.right_top() + egui::vec2(-12.0, 12.0),
                Align2::RIGHT_TOP,
                Self::layout_status_text(&cache.report),
                FontId::monospace(9.0),
                MUTED,
            );

            if let Some(index) = hovered {
                ui.output_mut(|output| {
                    output.cursor_icon = egui::CursorIcon::PointingHand;
                });

                let node = &nodes[index];
                tooltip = Some(NodeTooltip {
                    id: node.id.clone(),
                    ruling: node.record.ruling,
                    cycle: node.record.cycle,
                    text: node.record.position.clone(),
                    foreign_entity: (!node.is_local).then(|| node.record.entity.clone()),
                });
            }

            if response.clicked() {
                pending_selection = Some(hovered.map(|index| nodes[index].id.clone()));
            }
        }

        if let Some(selected) = pending_selection {
            self.set_selected(selected);
        }

        if let Some(tooltip) = tooltip {
            response.on_hover_ui_at_pointer(|ui| show_tooltip(ui, &tooltip));
        }
    }
}
