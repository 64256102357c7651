mod app;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use authorship_map::data::load_dataset;
use authorship_map::export::Snapshot;
use authorship_map::{FilterCriteria, LayoutConfig, filter, initial_layout, relayout};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(
        long,
        default_value = "data",
        help = "Directory holding personnel.ndjson and publications.ndjson"
    )]
    data_dir: PathBuf,

    #[arg(long, help = "JSON file overriding layout constants")]
    layout_config: Option<PathBuf>,

    #[arg(long = "subteam", help = "Subteam tag to show; repeatable")]
    subteams: Vec<String>,

    #[arg(long)]
    pi_only: bool,

    #[arg(long = "person", help = "Person id to select explicitly; repeatable")]
    people: Vec<String>,

    #[arg(long, help = "Write a JSON snapshot here instead of opening the viewer")]
    export: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new()
            .with_subteams(&self.subteams)
            .with_pi_only(self.pi_only)
            .with_selected_people(&self.people)
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn export(args: &Args, config: &LayoutConfig, path: &Path) -> Result<()> {
    let mut graph = load_dataset(&args.data_dir)?;
    let criteria = args.criteria();

    initial_layout(&mut graph, &config.initial);
    let summary = filter::apply(&mut graph, &criteria);
    let layout = relayout(&mut graph, &criteria, config);

    Snapshot::capture(&graph, &criteria, summary, layout).write(path)?;
    info!(path = %path.display(), "wrote snapshot");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = match &args.layout_config {
        Some(path) => LayoutConfig::load(path)?,
        None => LayoutConfig::default(),
    };

    if let Some(path) = &args.export {
        return export(&args, &config, path)
            .with_context(|| format!("export to {} failed", path.display()));
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    let criteria = args.criteria();
    let data_dir = args.data_dir.clone();
    eframe::run_native(
        "Authorship Map",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::AuthorshipApp::new(
                cc,
                data_dir.clone(),
                config.clone(),
                criteria.clone(),
            )))
        }),
    )
    .map_err(|error| anyhow!("viewer failed: {error}"))
}
