use eframe::egui::{self, Align, Layout, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use citation_graph::corpus::EntitySummary;
use citation_graph::layout::LayoutConfig;
use citation_graph::util::display_entity;

use super::super::ViewModel;
use super::super::render_utils::MUTED;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

/// Summaries whose name or domain fuzzily matches `query`, in archive order.
fn matching_entities<'a>(summaries: &'a [EntitySummary], query: &str) -> Vec<&'a EntitySummary> {
    let query = query.trim();
    if query.is_empty() {
        return summaries.iter().collect();
    }

    let matcher = SkimMatcherV2::default();
    summaries
        .iter()
        .filter(|summary| {
            fuzzy_match_score(&matcher, &display_entity(&summary.name), query).is_some()
                || fuzzy_match_score(&matcher, &summary.name, query).is_some()
                || fuzzy_match_score(&matcher, &summary.domain, query).is_some()
        })
        .collect()
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("States");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search (state or domain)")
            .on_hover_text("Fuzzy-filter the state list by name or domain.");
        ui.text_edit_singleline(&mut self.search);
        ui.add_space(6.0);

        let mut next_focal = None;
        let matches = matching_entities(&self.summaries, &self.search);

        egui::ScrollArea::vertical()
            .id_salt("state_list_scroll")
            .max_height(320.0)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if matches.is_empty() {
                    ui.label(RichText::new("No states match this search.").color(MUTED));
                }

                for summary in &matches {
                    let is_focal = self.focal.as_deref() == Some(summary.name.as_str());
                    let tally = format!(
                        "{}W {}P {}L",
                        summary.validated, summary.partial, summary.refuted
                    );

                    let clicked = ui
                        .horizontal(|ui| {
                            let clicked = ui
                                .selectable_label(is_focal, display_entity(&summary.name))
                                .on_hover_text(format!(
                                    "{} claims, latest {} in cycle {}",
                                    summary.record_count, summary.latest.id, summary.latest.cycle
                                ))
                                .clicked();
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                ui.label(RichText::new(tally).monospace().small());
                                ui.label(RichText::new(&summary.domain).small().color(MUTED));
                            });
                            clicked
                        })
                        .inner;

                    if clicked {
                        next_focal = Some(summary.name.clone());
                    }
                }
            });

        if let Some(focal) = next_focal {
            self.set_focal(Some(focal));
        }

        ui.separator();
        self.draw_layout_tuning(ui);
    }

    fn draw_layout_tuning(&mut self, ui: &mut Ui) {
        let mut changed = false;

        egui::CollapsingHeader::new("Layout tuning")
            .default_open(false)
            .show(ui, |ui| {
                let config = &mut self.layout_config;

                changed |= ui
                    .add(egui::Slider::new(&mut config.iterations, 0..=1000).text("Passes"))
                    .on_hover_text("Number of relaxation passes run per layout.")
                    .changed();
                changed |= ui
                    .add(
                        egui::Slider::new(&mut config.spring_constant, 0.0..=0.2)
                            .text("Spring")
                            .clamping(egui::SliderClamping::Always),
                    )
                    .on_hover_text("How strongly cited claims pull toward their rest distance.")
                    .changed();
                changed |= ui
                    .add(
                        egui::Slider::new(&mut config.repulsion_strength, 0.0..=2.0)
                            .text("Repulsion")
                            .clamping(egui::SliderClamping::Always),
                    )
                    .on_hover_text("How strongly overlapping claims push apart.")
                    .changed();
                changed |= ui
                    .add(
                        egui::Slider::new(&mut config.center_gravity, 0.0..=0.1)
                            .text("Center gravity")
                            .clamping(egui::SliderClamping::Always),
                    )
                    .on_hover_text("Pull toward the canvas center.")
                    .changed();
                changed |= ui
                    .add(
                        egui::Slider::new(&mut config.ring_fraction, 0.05..=0.5)
                            .text("Initial ring")
                            .clamping(egui::SliderClamping::Always),
                    )
                    .on_hover_text("Starting ring radius as a fraction of the shorter side.")
                    .changed();

                ui.add_space(4.0);
                if ui.button("Reset to defaults").clicked() {
                    *config = LayoutConfig::default();
                    changed = true;
                }
            });

        if changed {
            self.invalidate_render_graph();
        }
    }
}
