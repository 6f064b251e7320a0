use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::corps::RelationKind;

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn kind_color(kind: &RelationKind) -> Color32 {
    let [r, g, b] = kind.rgb();
    Color32::from_rgb(r, g, b)
}

/// Background fill plus the outline of the scene rectangle.
pub(super) fn draw_background(painter: &Painter, rect: Rect, scene: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));
    painter.rect_filled(scene, 6.0, Color32::from_rgb(24, 29, 36));

    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 110));
    let corners = [
        scene.left_top(),
        scene.right_top(),
        scene.right_bottom(),
        scene.left_bottom(),
    ];
    for (index, corner) in corners.iter().enumerate() {
        painter.line_segment([*corner, corners[(index + 1) % corners.len()]], stroke);
    }
}

/// Scene coordinates are centred on `scene_center` in the canvas, then panned
/// and zoomed.
pub(super) fn scene_to_screen(
    rect: Rect,
    scene_center: Vec2,
    pan: Vec2,
    zoom: f32,
    scene: Vec2,
) -> Pos2 {
    rect.center() + pan + (scene - scene_center) * zoom
}

pub(super) fn screen_to_scene(
    rect: Rect,
    scene_center: Vec2,
    pan: Vec2,
    zoom: f32,
    screen: Pos2,
) -> Vec2 {
    scene_center + (screen - rect.center() - pan) / zoom
}
