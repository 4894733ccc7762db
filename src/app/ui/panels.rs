use std::sync::Arc;

use eframe::egui::{self, Align, Context, Layout};
use log::warn;

use citation_graph::corpus::Corpus;
use citation_graph::explain::Explainer;
use citation_graph::layout::LayoutConfig;
use citation_graph::util::display_entity;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(
        corpus: Corpus,
        initial_entity: Option<String>,
        layout_config: LayoutConfig,
        explainer: Arc<Explainer>,
    ) -> Self {
        let summaries = corpus.summaries();
        let focal = Self::initial_focal(&corpus, initial_entity);

        Self {
            corpus,
            summaries,
            focal,
            search: String::new(),
            selected: None,
            layout_config,
            graph_cache: None,
            explainer,
            explanation: None,
        }
    }

    /// The requested entity when the archive knows it, otherwise the first
    /// entity in archive order.
    fn initial_focal(corpus: &Corpus, requested: Option<String>) -> Option<String> {
        if let Some(entity) = requested {
            if corpus.entities().contains(&entity.as_str()) {
                return Some(entity);
            }
            warn!("state {entity} is not in the archive, showing the first state instead");
        }

        corpus.entities().first().map(|entity| (*entity).to_owned())
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, reload_requested: &mut bool) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("citation-graph");
                    ui.separator();
                    ui.label(self.archive_summary_text());
                    if let Some(focal) = &self.focal {
                        ui.label(format!("focus: {}", display_entity(focal)));
                    }
                    if ui.button("Reload archive").clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Re-run layout").clicked() {
                        self.invalidate_render_graph();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!(
                            "explanations cached: {}",
                            self.explainer.cached_len()
                        ));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }
}
