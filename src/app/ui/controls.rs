use authorship_map::layout::LayoutMode;
use eframe::egui::{self, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::{LabelMode, ViewModel};

const PICKER_RESULT_LIMIT: usize = 60;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

impl ViewModel {
    fn picker_matches(&self) -> Vec<usize> {
        let query = self.people_search.trim();
        if query.is_empty() {
            return (0..self.directory.len()).take(PICKER_RESULT_LIMIT).collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored = self
            .directory
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                fuzzy_match_score(&matcher, &entry.name, query).map(|score| (score, index))
            })
            .collect::<Vec<_>>();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        scored
            .into_iter()
            .take(PICKER_RESULT_LIMIT)
            .map(|(_, index)| index)
            .collect()
    }

    fn draw_subteam_filters(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Subteams").strong());
        if self.subteam_tags.is_empty() {
            ui.label("No subteam tags in this dataset.");
            return;
        }

        ui.horizontal_wrapped(|ui| {
            for tag in &self.subteam_tags {
                let mut checked = self.draft.subteams.contains(tag);
                if ui.checkbox(&mut checked, tag.as_str()).changed() {
                    if checked {
                        self.draft.subteams.insert(tag.clone());
                    } else {
                        self.draft.subteams.remove(tag);
                    }
                }
            }
        });
    }

    fn draw_people_picker(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("People").strong())
            .on_hover_text("Explicitly selected people are always shown.");

        if !self.draft.selected_people.is_empty() {
            let mut removed = None;
            ui.horizontal_wrapped(|ui| {
                for (position, id) in self.draft.selected_people.iter().enumerate() {
                    let name = self
                        .directory
                        .iter()
                        .find(|entry| &entry.id == id)
                        .map_or(id.as_str(), |entry| entry.name.as_str());
                    if ui
                        .small_button(format!("{name} x"))
                        .on_hover_text("Remove from selection")
                        .clicked()
                    {
                        removed = Some(position);
                    }
                }
            });
            if let Some(position) = removed {
                self.draft.selected_people.remove(position);
            }
        }

        ui.add(
            egui::TextEdit::singleline(&mut self.people_search).hint_text("Search people..."),
        );

        let matches = self.picker_matches();
        let mut toggled = Vec::new();
        egui::ScrollArea::vertical()
            .id_salt("people_picker")
            .max_height(220.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for index in matches {
                    let entry = &self.directory[index];
                    let mut checked = self.draft.selected_people.contains(&entry.id);
                    let label = if entry.subteam.is_empty() {
                        entry.name.clone()
                    } else {
                        format!("{}  ({})", entry.name, entry.subteam)
                    };
                    if ui.checkbox(&mut checked, label).changed() {
                        toggled.push((entry.id.clone(), checked));
                    }
                }
            });

        for (id, checked) in toggled {
            if checked {
                if !self.draft.selected_people.contains(&id) {
                    self.draft.selected_people.push(id);
                }
            } else {
                self.draft.selected_people.retain(|selected| selected != &id);
            }
        }
    }

    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Filters");
        ui.separator();
        ui.add_space(4.0);

        self.draw_subteam_filters(ui);
        ui.add_space(6.0);
        ui.checkbox(&mut self.draft.pi_only, "PI only")
            .on_hover_text("Show only principal investigators.");
        ui.add_space(6.0);
        self.draw_people_picker(ui);

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let pending = self.draft != self.applied;
            if ui
                .add_enabled(pending, egui::Button::new("Apply"))
                .on_hover_text("Apply the filters and lay the graph out again.")
                .clicked()
            {
                self.apply_filters();
            }
            if ui.button("Clear").clicked() {
                self.clear_filters();
            }
        });

        ui.separator();
        ui.label(RichText::new("View").strong());
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.label_mode, LabelMode::All, "All labels");
            ui.selectable_value(&mut self.label_mode, LabelMode::Hover, "Labels on hover");
        });
        if ui
            .button("Center")
            .on_hover_text("Fit the visible graph into the canvas.")
            .clicked()
        {
            self.fit_requested = true;
        }

        ui.separator();
        ui.label(RichText::new("Layout").strong());
        if let Some(layout) = &self.layout {
            let mode = match layout.mode {
                LayoutMode::Rings => "rings",
                LayoutMode::Spread => "spread",
                LayoutMode::Initial => "initial",
            };
            ui.label(format!("mode: {mode}"));
            ui.label(format!(
                "publication ring: {:.0} ({} placed)",
                layout.publication_radius, layout.placed_publications
            ));
            for (ring, people) in layout.people_rings.iter().enumerate() {
                ui.label(format!(
                    "people ring {}: {:.0} ({} placed)",
                    ring + 1,
                    people.radius,
                    people.count
                ));
            }
        }
        if self.summary.pruned_people > 0 {
            ui.label(format!(
                "{} people hidden for lack of visible publications",
                self.summary.pruned_people
            ));
        }
    }
}
