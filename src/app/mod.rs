use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use authorship_map::data::{PersonEntry, load_dataset};
use authorship_map::{FilterCriteria, FilterSummary, GraphStore, LayoutConfig, NodeKind, RingLayout};
use eframe::egui::{self, Color32, Context, Vec2};

mod graph;
mod render_utils;
mod ui;

pub struct AuthorshipApp {
    data_dir: PathBuf,
    config: LayoutConfig,
    criteria: FilterCriteria,
    state: AppState,
    reload_rx: Option<Receiver<Result<GraphStore, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<GraphStore, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LabelMode {
    All,
    Hover,
}

struct ViewModel {
    graph: GraphStore,
    config: LayoutConfig,
    directory: Vec<PersonEntry>,
    subteam_tags: Vec<String>,
    draft: FilterCriteria,
    applied: FilterCriteria,
    summary: FilterSummary,
    layout: Option<RingLayout>,
    people_search: String,
    label_mode: LabelMode,
    selected: Option<String>,
    pan: Vec2,
    zoom: f32,
    fit_requested: bool,
    graph_dirty: bool,
    render_graph: Option<RenderGraph>,
}

struct RenderGraph {
    nodes: Vec<RenderNode>,
    edges: Vec<(usize, usize)>,
    neighbors: Vec<Vec<usize>>,
    index_by_id: HashMap<String, usize>,
    draw_order: Vec<usize>,
}

struct RenderNode {
    id: String,
    label: String,
    kind: NodeKind,
    world_pos: Vec2,
    radius: f32,
    color: Color32,
    is_pi: bool,
}

impl AuthorshipApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        data_dir: PathBuf,
        config: LayoutConfig,
        criteria: FilterCriteria,
    ) -> Self {
        let state = Self::start_load(data_dir.clone());
        Self {
            data_dir,
            config,
            criteria,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(data_dir: PathBuf) -> Receiver<Result<GraphStore, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_dataset(&data_dir).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(data_dir: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(data_dir),
        }
    }

    fn ready(&self, graph: GraphStore) -> AppState {
        AppState::Ready(Box::new(ViewModel::new(
            graph,
            self.config.clone(),
            self.criteria.clone(),
        )))
    }
}

impl eframe::App for AuthorshipApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let mut retry = false;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(result);
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading authorship data...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load authorship data");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    retry = ui.button("Retry").clicked();
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.data_dir, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    // Keep whatever the user has applied since launch.
                    self.criteria = model.applied.clone();
                    self.reload_rx = Some(Self::spawn_load(self.data_dir.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if retry {
            self.state = Self::start_load(self.data_dir.clone());
            return;
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = match result {
                Ok(graph) => self.ready(graph),
                Err(error) => AppState::Error(error),
            };
        }
    }
}
