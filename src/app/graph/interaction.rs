use eframe::egui::{self, Pos2, Rect, Ui, Vec2};

use super::super::ViewModel;
use super::super::render_utils::{circle_visible, point_to_world, screen_to_world};

const FIT_MARGIN: f32 = 80.0;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.05, 6.0);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    pub(in crate::app) fn fit_to_view(&mut self, rect: Rect) {
        self.fit_requested = false;

        let Some((min, max)) = self.graph.visible_bounds() else {
            self.pan = Vec2::ZERO;
            self.zoom = 1.0;
            return;
        };

        let min = point_to_world(min);
        let max = point_to_world(max);
        let extent = (max - min) + Vec2::splat(FIT_MARGIN * 2.0);
        let zoom_x = rect.width() / extent.x.max(1.0);
        let zoom_y = rect.height() / extent.y.max(1.0);
        self.zoom = zoom_x.min(zoom_y).clamp(0.05, 6.0);

        let center = (min + max) * 0.5;
        self.pan = -center * self.zoom;
    }

    pub(in crate::app) fn visible_indices(
        &self,
        rect: Rect,
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Vec<usize> {
        (0..screen_positions.len())
            .filter(|&index| circle_visible(rect, screen_positions[index], screen_radii[index]))
            .collect()
    }

    pub(in crate::app) fn hovered_index(
        &self,
        ui: &Ui,
        visible_indices: &[usize],
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        visible_indices
            .iter()
            .filter_map(|&index| {
                let distance = screen_positions[index].distance(pointer);
                (distance <= screen_radii[index]).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<String>) {
        self.selected = selected.filter(|id| {
            self.graph
                .node(id)
                .is_some_and(|node| node.is_visible())
        });
    }
}
