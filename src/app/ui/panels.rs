use std::path::Path;

use authorship_map::data::people_directory;
use authorship_map::{
    FilterCriteria, GraphStore, LayoutConfig, NodeKind, filter, initial_layout, relayout,
};
use eframe::egui::{self, Align, Context, Layout, Vec2};
use tracing::debug;

use super::super::{LabelMode, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(
        mut graph: GraphStore,
        config: LayoutConfig,
        criteria: FilterCriteria,
    ) -> Self {
        let layout = initial_layout(&mut graph, &config.initial);
        debug!(
            people = layout.placed_people(),
            publications = layout.placed_publications,
            "placed initial layout"
        );

        let mut model = Self {
            directory: people_directory(&graph),
            subteam_tags: graph.subteam_tags(),
            graph,
            config,
            draft: criteria.clone(),
            applied: FilterCriteria::new(),
            summary: Default::default(),
            layout: Some(layout),
            people_search: String::new(),
            label_mode: LabelMode::Hover,
            selected: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
            fit_requested: true,
            graph_dirty: true,
            render_graph: None,
        };
        model.refresh_summary();

        if !criteria.is_unrestricted() {
            model.apply_filters();
        }
        model
    }

    fn refresh_summary(&mut self) {
        self.summary.visible_people = self.graph.visible_count(NodeKind::Person);
        self.summary.visible_publications = self.graph.visible_count(NodeKind::Publication);
        self.summary.visible_edges = self.graph.visible_edge_count();
    }

    pub(in crate::app) fn apply_filters(&mut self) {
        self.applied = self.draft.clone();
        self.summary = filter::apply(&mut self.graph, &self.applied);
        self.layout = Some(relayout(&mut self.graph, &self.applied, &self.config));

        let selected = self.selected.take();
        self.set_selected(selected);
        self.graph_dirty = true;
        self.fit_requested = true;
    }

    pub(in crate::app) fn clear_filters(&mut self) {
        self.draft = FilterCriteria::new();
        self.people_search.clear();
        self.apply_filters();
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        data_dir: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Authorship Map");
                    ui.separator();
                    ui.label(format!("data: {}", data_dir.display()));
                    ui.label(format!("people: {}", self.graph.people().count()));
                    ui.label(format!("publications: {}", self.graph.publication_count()));
                    ui.label(format!("links: {}", self.graph.edge_count()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload data"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!(
                            "visible: {} people, {} publications, {} links",
                            self.summary.visible_people,
                            self.summary.visible_publications,
                            self.summary.visible_edges
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
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if is_loading {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Reloading authorship data...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                } else {
                    self.draw_graph(ui);
                }
            });
    }
}
