use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use eframe::egui::{self, Context};

use citation_graph::corpus::{Corpus, EntitySummary, load_corpus};
use citation_graph::explain::Explainer;
use citation_graph::graph::KnowledgeGraph;
use citation_graph::layout::{Canvas, LayoutConfig, LayoutReport};

mod graph;
mod highlight;
mod render_utils;
mod ui;

pub struct CitationGraphApp {
    corpus_path: Option<PathBuf>,
    initial_entity: Option<String>,
    layout_config: LayoutConfig,
    explainer: Arc<Explainer>,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Corpus, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    corpus: Corpus,
    summaries: Vec<EntitySummary>,
    focal: Option<String>,
    search: String,
    selected: Option<String>,
    layout_config: LayoutConfig,
    graph_cache: Option<RenderGraph>,
    explainer: Arc<Explainer>,
    explanation: Option<ExplainRequest>,
}

/// A built and laid out graph, valid for one focal entity and canvas size.
struct RenderGraph {
    focal: String,
    canvas: Canvas,
    graph: KnowledgeGraph,
    report: LayoutReport,
}

struct ExplainRequest {
    record_id: String,
    state: ExplainState,
}

enum ExplainState {
    Pending(Receiver<Result<String, String>>),
    Done(String),
    Failed(String),
}

struct HighlightState {
    nodes: HashSet<usize>,
    edges: HashSet<usize>,
}

pub struct AppOptions {
    pub corpus_path: Option<PathBuf>,
    pub initial_entity: Option<String>,
    pub layout_config: LayoutConfig,
    pub explainer: Arc<Explainer>,
}

impl CitationGraphApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: AppOptions) -> Self {
        let state = Self::start_load(options.corpus_path.clone());
        Self {
            corpus_path: options.corpus_path,
            initial_entity: options.initial_entity,
            layout_config: options.layout_config,
            explainer: options.explainer,
            state,
        }
    }

    fn start_load(corpus_path: Option<PathBuf>) -> AppState {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_corpus(corpus_path.as_deref()).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        AppState::Loading { rx }
    }

    fn ready(
        corpus: Corpus,
        initial_entity: Option<String>,
        layout_config: &LayoutConfig,
        explainer: &Arc<Explainer>,
    ) -> AppState {
        AppState::Ready(Box::new(ViewModel::new(
            corpus,
            initial_entity,
            layout_config.clone(),
            Arc::clone(explainer),
        )))
    }
}

impl eframe::App for CitationGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(corpus) => Self::ready(
                            corpus,
                            self.initial_entity.clone(),
                            &self.layout_config,
                            &self.explainer,
                        ),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading claim archive...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the claim archive");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.corpus_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                model.show(ctx, &mut reload_requested);
                if reload_requested {
                    transition = Some(Self::start_load(self.corpus_path.clone()));
                }
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
