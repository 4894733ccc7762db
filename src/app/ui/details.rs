use std::sync::Arc;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;

use eframe::egui::{Context, RichText, Ui};
use log::warn;

use citation_graph::corpus::Record;
use citation_graph::util::display_entity;

use super::super::highlight::neighbor_ids;
use super::super::render_utils::{ACCENT, MUTED};
use super::super::{ExplainRequest, ExplainState, ViewModel};

const EXPLAIN_CATEGORY: &str = "claim";
const EXPLAIN_FAILED_TEXT: &str = "Unable to generate explanation. Please try again.";

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Claim Details");
        ui.add_space(6.0);

        let Some(selected_id) = self.selected.clone() else {
            self.draw_focal_summary(ui);
            return;
        };

        let Some(record) = self.corpus.find(&selected_id).cloned() else {
            ui.label("Selected claim no longer exists in the archive.");
            return;
        };

        ui.horizontal(|ui| {
            ui.label(RichText::new(&record.id).monospace().strong().color(ACCENT));
            ui.label(RichText::new(record.ruling.label()).monospace().small());
            ui.label(
                RichText::new(format!("CYCLE {}", record.cycle))
                    .monospace()
                    .small()
                    .color(MUTED),
            );
        });
        ui.small(format!(
            "{} | {}",
            display_entity(&record.entity),
            record.domain
        ));
        ui.add_space(6.0);
        ui.label(record.position.as_str());

        ui.separator();
        self.draw_explanation(ui, &record);

        ui.separator();
        ui.label(RichText::new("Linked claims").strong());
        let neighbors: Vec<String> = self
            .graph_cache
            .as_ref()
            .map(|cache| {
                neighbor_ids(&cache.graph, &selected_id)
                    .into_iter()
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        if neighbors.is_empty() {
            ui.label("This claim has no links in the current graph.");
        }

        let mut next_selection = None;
        for id in &neighbors {
            let Some(neighbor) = self.corpus.find(id) else {
                continue;
            };
            let label = format!(
                "{}  {}  [{}]",
                neighbor.id,
                display_entity(&neighbor.entity),
                neighbor.ruling.label()
            );
            if ui.link(label).on_hover_text(neighbor.position.as_str()).clicked() {
                next_selection = Some(neighbor.id.clone());
            }
        }

        if let Some(id) = next_selection {
            self.set_selected(Some(id));
        }
    }

    fn draw_focal_summary(&self, ui: &mut Ui) {
        let summary = self
            .focal
            .as_deref()
            .and_then(|focal| self.summaries.iter().find(|summary| summary.name == focal));

        let Some(summary) = summary else {
            ui.label("Select a state to inspect its claims.");
            return;
        };

        ui.label(RichText::new(display_entity(&summary.name)).strong());
        ui.small(summary.domain.as_str());
        ui.add_space(6.0);
        ui.label(format!("Claims: {}", summary.record_count));
        ui.label(format!("Validated: {}", summary.validated));
        ui.label(format!("Partially validated: {}", summary.partial));
        ui.label(format!("Refuted: {}", summary.refuted));
        ui.add_space(6.0);
        ui.label(format!(
            "Latest claim: {} (cycle {})",
            summary.latest.id, summary.latest.cycle
        ));
        ui.add_space(6.0);
        ui.label(RichText::new("Click a node in the graph to inspect a claim.").color(MUTED));
    }

    fn draw_explanation(&mut self, ui: &mut Ui, record: &Arc<Record>) {
        self.poll_explanation(ui.ctx());

        let is_open = self
            .explanation
            .as_ref()
            .is_some_and(|request| request.record_id == record.id);
        if ui.selectable_label(is_open, "Explain simply").clicked() {
            if is_open {
                self.explanation = None;
            } else {
                self.request_explanation(record);
            }
        }

        let Some(request) = self.explanation.as_ref() else {
            return;
        };
        if request.record_id != record.id {
            return;
        }

        match &request.state {
            ExplainState::Pending(_) => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Generating explanation...");
                });
            }
            ExplainState::Done(text) => {
                ui.label(text.as_str());
            }
            ExplainState::Failed(error) => {
                ui.label(RichText::new(EXPLAIN_FAILED_TEXT).color(ACCENT))
                    .on_hover_text(error.as_str());
            }
        }
    }

    fn request_explanation(&mut self, record: &Arc<Record>) {
        let (tx, rx) = mpsc::channel();
        let explainer = Arc::clone(&self.explainer);
        let text = record.position.clone();

        thread::spawn(move || {
            let result = explainer
                .explain(&text, EXPLAIN_CATEGORY)
                .map_err(|error| error.to_string());
            let _ = tx.send(result);
        });

        self.explanation = Some(ExplainRequest {
            record_id: record.id.clone(),
            state: ExplainState::Pending(rx),
        });
    }

    fn poll_explanation(&mut self, ctx: &Context) {
        let Some(request) = self.explanation.as_mut() else {
            return;
        };
        let ExplainState::Pending(rx) = &request.state else {
            return;
        };

        let next_state = match rx.try_recv() {
            Ok(Ok(text)) => ExplainState::Done(text),
            Ok(Err(error)) => {
                warn!("explanation for {} failed: {error}", request.record_id);
                ExplainState::Failed(error)
            }
            Err(TryRecvError::Empty) => {
                ctx.request_repaint();
                return;
            }
            Err(TryRecvError::Disconnected) => {
                ExplainState::Failed("explanation worker stopped".to_owned())
            }
        };

        request.state = next_state;
    }
}
