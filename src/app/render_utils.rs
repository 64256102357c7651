use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use authorship_map::geometry::Point;

pub(super) const PERSON_RADIUS_MIN: f32 = 12.0;
pub(super) const PERSON_RADIUS_MAX: f32 = 40.0;
pub(super) const PUBLICATION_RADIUS: f32 = 9.0;

const SUBTEAM_PALETTE: [Color32; 8] = [
    Color32::from_rgb(86, 156, 214),
    Color32::from_rgb(106, 190, 120),
    Color32::from_rgb(206, 120, 186),
    Color32::from_rgb(94, 196, 196),
    Color32::from_rgb(222, 112, 104),
    Color32::from_rgb(150, 134, 224),
    Color32::from_rgb(196, 170, 96),
    Color32::from_rgb(140, 160, 176),
];
const UNTAGGED_COLOR: Color32 = Color32::from_rgb(150, 150, 150);
const PUBLICATION_COLOR: Color32 = Color32::from_rgb(120, 134, 152);
const MULTI_PI_COLOR: Color32 = Color32::from_rgb(240, 176, 48);

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f32::from(a) * (1.0 - amount) + f32::from(b) * amount) as u8;

    Color32::from_rgba_unmultiplied(
        mix(base.r(), overlay.r()),
        mix(base.g(), overlay.g()),
        mix(base.b(), overlay.b()),
        mix(base.a(), overlay.a()),
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    let scale = |channel: u8| (f32::from(channel) * factor) as u8;
    Color32::from_rgba_unmultiplied(
        scale(color.r()),
        scale(color.g()),
        scale(color.b()),
        (f32::from(color.a()) * (0.35 + factor * 0.65)) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(22, 24, 30));

    // Faint guide rings around the world origin.
    let origin = rect.center() + pan;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(70, 78, 92, 60));
    for ring in 1..=6 {
        let radius = ring as f32 * 250.0 * zoom;
        if radius > 4.0 {
            painter.circle_stroke(origin, radius, stroke);
        }
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    rect.expand(radius).contains(position)
}

pub(super) fn segment_visible(rect: Rect, start: Pos2, end: Pos2) -> bool {
    Rect::from_two_pos(start, end).intersects(rect)
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

pub(super) fn point_to_world(point: Point) -> Vec2 {
    Vec2::new(point.x as f32, point.y as f32)
}

pub(super) fn person_radius(size: u32, min: u32, max: u32) -> f32 {
    if max <= min {
        return (PERSON_RADIUS_MIN + PERSON_RADIUS_MAX) / 2.0;
    }

    let t = (size.clamp(min, max) - min) as f32 / (max - min) as f32;
    PERSON_RADIUS_MIN + t * (PERSON_RADIUS_MAX - PERSON_RADIUS_MIN)
}

pub(super) fn subteam_color(tag_index: Option<usize>) -> Color32 {
    tag_index
        .map(|index| SUBTEAM_PALETTE[index % SUBTEAM_PALETTE.len()])
        .unwrap_or(UNTAGGED_COLOR)
}

pub(super) fn publication_color(pi_authors: usize) -> Color32 {
    if pi_authors >= 2 {
        MULTI_PI_COLOR
    } else {
        PUBLICATION_COLOR
    }
}
