use authorship_map::NodeData;
use eframe::egui::{self, RichText, Ui};

use super::super::ViewModel;

impl ViewModel {
    fn draw_linked_nodes(&mut self, ui: &mut Ui, heading: &str, selected_id: &str) {
        let mut linked = self
            .graph
            .visible_neighbors(selected_id)
            .into_iter()
            .filter_map(|id| self.graph.node(id))
            .map(|node| (node.id.clone(), node.label.clone()))
            .collect::<Vec<_>>();
        linked.sort_by(|a, b| a.1.to_lowercase().cmp(&b.1.to_lowercase()));

        ui.separator();
        ui.label(RichText::new(format!("{heading} ({})", linked.len())).strong());
        if linked.is_empty() {
            ui.label("Nothing visible under the current filters.");
            return;
        }

        let mut next = None;
        egui::ScrollArea::vertical()
            .id_salt("linked_nodes_scroll")
            .max_height(360.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for (id, label) in &linked {
                    if ui.link(label.as_str()).on_hover_text(id.as_str()).clicked() {
                        next = Some(id.clone());
                    }
                }
            });

        if let Some(id) = next {
            self.set_selected(Some(id));
        }
    }

    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let Some(selected_id) = self.selected.clone() else {
            ui.label("Click a person or publication on the canvas.");
            return;
        };

        let Some(node) = self.graph.node(&selected_id) else {
            ui.label("Selected node no longer exists.");
            return;
        };

        match &node.data {
            NodeData::Person(info) => {
                ui.label(RichText::new(info.name.as_str()).strong());
                ui.small(node.id.as_str());
                ui.add_space(6.0);
                if !info.subteam.is_empty() {
                    ui.label(format!("Subteam: {}", info.subteam));
                }
                if info.pi {
                    ui.label("Principal investigator");
                }
                ui.label(format!("Visible publications: {}", node.size));
                self.draw_linked_nodes(ui, "Publications", &selected_id);
            }
            NodeData::Publication(info) => {
                let title = if info.title.is_empty() {
                    node.label.as_str()
                } else {
                    info.title.as_str()
                };
                ui.label(RichText::new(title).strong());
                ui.small(node.id.as_str());
                ui.add_space(6.0);

                for (name, value) in [
                    ("Team", &info.team),
                    ("Type", &info.kind),
                    ("Year", &info.year),
                    ("Venue", &info.venue),
                ] {
                    if !value.is_empty() {
                        ui.label(format!("{name}: {value}"));
                    }
                }
                if let Some(doi) = &info.doi {
                    ui.hyperlink_to(format!("DOI: {doi}"), format!("https://doi.org/{doi}"));
                }
                ui.label(format!("PI authors: {}", info.pi_authors));
                if !info.authors.is_empty() {
                    ui.label(format!("Authors: {}", info.authors.join(", ")));
                }
                self.draw_linked_nodes(ui, "Visible authors", &selected_id);
            }
        }
    }
}
