use std::collections::HashSet;

use authorship_map::NodeKind;
use authorship_map::util::wrap_label;
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, vec2};

use super::super::render_utils::{
    blend_color, dim_color, draw_background, segment_visible, world_to_screen,
};
use super::super::{LabelMode, ViewModel};

const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(245, 206, 93);

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        if self.fit_requested {
            self.fit_to_view(rect);
        }

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);
        draw_background(&painter, rect, self.pan, self.zoom);

        let Some(cache) = self.render_graph.as_ref() else {
            return;
        };

        if cache.nodes.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No people or publications match the current filters.",
                FontId::proportional(15.0),
                Color32::from_gray(200),
            );
            return;
        }

        let pan = self.pan;
        let zoom = self.zoom;
        let radius_scale = zoom.sqrt();
        let screen_positions = cache
            .nodes
            .iter()
            .map(|node| world_to_screen(rect, pan, zoom, node.world_pos))
            .collect::<Vec<_>>();
        let screen_radii = cache
            .nodes
            .iter()
            .map(|node| (node.radius * radius_scale).clamp(2.0, 48.0))
            .collect::<Vec<_>>();

        let visible = self.visible_indices(rect, &screen_positions, &screen_radii);
        let mut on_screen = vec![false; cache.nodes.len()];
        for &index in &visible {
            on_screen[index] = true;
        }

        let hovered = self.hovered_index(ui, &visible, &screen_positions, &screen_radii);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let pending_selection = response
            .clicked_by(egui::PointerButton::Primary)
            .then(|| hovered.map(|index| cache.nodes[index].id.clone()));

        let selected_index = self
            .selected
            .as_ref()
            .and_then(|id| cache.index_by_id.get(id).copied());
        let related = selected_index
            .map(|index| cache.neighbors[index].iter().copied().collect::<HashSet<_>>())
            .unwrap_or_default();
        let selection_active = selected_index.is_some();

        let edge_width = (1.1 * radius_scale).clamp(0.5, 3.0);
        for &(person, publication) in &cache.edges {
            let start = screen_positions[person];
            let end = screen_positions[publication];
            if !on_screen[person] && !on_screen[publication] && !segment_visible(rect, start, end) {
                continue;
            }

            let touches_selection =
                selected_index.is_some_and(|index| index == person || index == publication);
            let stroke = if touches_selection {
                Stroke::new(edge_width * 2.0, HIGHLIGHT_COLOR)
            } else if selection_active {
                Stroke::new(edge_width, Color32::from_rgba_unmultiplied(70, 76, 86, 90))
            } else {
                Stroke::new(edge_width, Color32::from_rgba_unmultiplied(110, 118, 130, 150))
            };
            painter.line_segment([start, end], stroke);
        }

        for &index in &cache.draw_order {
            if !on_screen[index] {
                continue;
            }

            let node = &cache.nodes[index];
            let position = screen_positions[index];
            let radius = screen_radii[index];
            let is_selected = selected_index == Some(index);
            let is_related = related.contains(&index);
            let is_hovered = hovered == Some(index);

            let color = if is_selected {
                HIGHLIGHT_COLOR
            } else if is_hovered {
                blend_color(node.color, Color32::WHITE, 0.35)
            } else if is_related {
                blend_color(node.color, HIGHLIGHT_COLOR, 0.35)
            } else if selection_active {
                dim_color(node.color, 0.45)
            } else {
                node.color
            };
            let outline = if node.is_pi {
                Stroke::new(2.4, Color32::from_gray(235))
            } else {
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(10, 10, 10, 200))
            };

            match node.kind {
                NodeKind::Person => {
                    painter.circle_filled(position, radius, color);
                    painter.circle_stroke(position, radius, outline);
                }
                NodeKind::Publication => {
                    let square = Rect::from_center_size(position, vec2(radius * 2.0, radius * 2.0));
                    painter.rect_filled(square, 2.0, color);
                }
            }

            let draw_label = match self.label_mode {
                LabelMode::All => true,
                LabelMode::Hover => is_hovered || is_selected || is_related,
            };
            if draw_label {
                Self::draw_node_label(&painter, position, radius, &node.label, node.kind);
            }
        }

        if let Some(selected) = pending_selection {
            self.set_selected(selected);
        }
    }

    fn draw_node_label(
        painter: &egui::Painter,
        position: Pos2,
        radius: f32,
        label: &str,
        kind: NodeKind,
    ) {
        let text = match kind {
            NodeKind::Person => label.to_owned(),
            NodeKind::Publication => wrap_label(label, 24, 3),
        };
        painter.text(
            position + vec2(0.0, radius + 3.0),
            Align2::CENTER_TOP,
            text,
            FontId::proportional(11.5),
            Color32::from_gray(232),
        );
    }
}
