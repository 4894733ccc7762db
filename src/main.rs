mod app;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use log::info;
use serde::Serialize;

use citation_graph::corpus::load_corpus;
use citation_graph::explain::{DEFAULT_MODEL, ExplainConfig, Explainer, MessagesClient};
use citation_graph::graph::{KnowledgeGraph, build_for_entity};
use citation_graph::layout::{Canvas, LayoutConfig, LayoutReport, LayoutStatus, force_layout};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Claim archive to load instead of the bundled one.
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// State to focus, e.g. `Causation_Alpha`.
    #[arg(long)]
    entity: Option<String>,

    /// Print the positioned graph for `--entity` as JSON and exit.
    #[arg(long)]
    export: bool,

    #[arg(long, default_value_t = 960.0)]
    width: f32,

    #[arg(long, default_value_t = 400.0)]
    height: f32,

    /// Relaxation passes per layout.
    #[arg(long)]
    iterations: Option<usize>,

    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "CITATION_GRAPH_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct ExportNode<'a> {
    id: &'a str,
    entity: &'a str,
    cycle: u32,
    ruling: &'a str,
    is_local: bool,
    radius: f32,
    x: Option<f32>,
    y: Option<f32>,
}

#[derive(Serialize)]
struct ExportEdge<'a> {
    source: &'a str,
    target: &'a str,
    is_local: bool,
}

#[derive(Serialize)]
struct ExportGraph<'a> {
    entity: &'a str,
    width: f32,
    height: f32,
    status: &'static str,
    has_citations: bool,
    nodes: Vec<ExportNode<'a>>,
    edges: Vec<ExportEdge<'a>>,
}

fn export_graph<'a>(
    graph: &'a KnowledgeGraph,
    canvas: Canvas,
    report: &LayoutReport,
) -> ExportGraph<'a> {
    let status = match report.status {
        LayoutStatus::Positioned => "positioned",
        LayoutStatus::NotReady => "not_ready",
        LayoutStatus::Empty => "empty",
    };

    ExportGraph {
        entity: graph.focal_entity(),
        width: canvas.width,
        height: canvas.height,
        status,
        has_citations: graph.has_citations(),
        nodes: graph
            .nodes()
            .iter()
            .map(|node| ExportNode {
                id: &node.id,
                entity: &node.record.entity,
                cycle: node.record.cycle,
                ruling: node.record.ruling.label(),
                is_local: node.is_local,
                radius: node.radius,
                x: node.position.map(|position| position.x),
                y: node.position.map(|position| position.y),
            })
            .collect(),
        edges: graph
            .edges()
            .iter()
            .map(|edge| ExportEdge {
                source: &edge.source,
                target: &edge.target,
                is_local: edge.is_local,
            })
            .collect(),
    }
}

fn run_export(args: &Args, layout_config: &LayoutConfig) -> Result<()> {
    let entity = args
        .entity
        .as_deref()
        .ok_or_else(|| anyhow!("--export needs --entity"))?;

    let corpus = load_corpus(args.corpus.as_deref())?;
    if !corpus.entities().contains(&entity) {
        bail!("state {entity} is not in the archive");
    }

    let canvas = Canvas::new(args.width, args.height);
    let mut graph = build_for_entity(&corpus, entity);
    let report = force_layout(&mut graph, canvas, layout_config);
    info!(
        "exported {entity}: {} nodes, {} edges",
        graph.nodes().len(),
        graph.edges().len()
    );

    let json = serde_json::to_string_pretty(&export_graph(&graph, canvas, &report))
        .context("failed to serialize graph")?;
    println!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut layout_config = LayoutConfig::default();
    if let Some(iterations) = args.iterations {
        layout_config.iterations = iterations;
    }

    if args.export {
        return run_export(&args, &layout_config);
    }

    let client = MessagesClient::new(ExplainConfig {
        api_key: args.api_key.clone(),
        model: args.model.clone(),
        ..ExplainConfig::default()
    })
    .context("failed to create the explanation client")?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };
    let app_options = app::AppOptions {
        corpus_path: args.corpus,
        initial_entity: args.entity,
        layout_config,
        explainer: Arc::new(Explainer::new(client)),
    };

    eframe::run_native(
        "citation-graph",
        options,
        Box::new(move |cc| Ok(Box::new(app::CitationGraphApp::new(cc, app_options)))),
    )
    .map_err(|error| anyhow!("viewer failed: {error}"))
}
