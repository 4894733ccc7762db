use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Vec2, vec2};

use citation_graph::graph::GraphNode;

pub(super) const BACKGROUND: Color32 = Color32::from_rgb(14, 14, 14);
pub(super) const ACCENT: Color32 = Color32::from_rgb(220, 38, 38);
pub(super) const MUTED: Color32 = Color32::from_rgb(82, 82, 82);
pub(super) const OTHER: Color32 = Color32::from_rgb(64, 64, 64);

pub(super) fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0) as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

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

pub(super) fn node_fill(node: &GraphNode) -> Color32 {
    if !node.is_local {
        return with_opacity(OTHER, 0.5);
    }
    if node.record.ruling.survived() {
        ACCENT
    } else {
        MUTED
    }
}

pub(super) fn node_stroke(node: &GraphNode) -> Color32 {
    if !node.is_local {
        return with_opacity(Color32::from_rgb(42, 42, 42), 0.5);
    }
    if node.record.ruling.survived() {
        Color32::from_rgb(153, 27, 27)
    } else {
        OTHER
    }
}

pub(super) fn canvas_to_screen(rect: Rect, position: Vec2) -> Pos2 {
    rect.min + position
}

pub(super) fn draw_legend(painter: &Painter, rect: Rect) {
    let entries = [
        (ACCENT, 5.0, "SURVIVING"),
        (MUTED, 5.0, "DESTROYED"),
        (with_opacity(OTHER, 0.5), 4.0, "OTHER STATE"),
    ];

    let mut cursor = rect.left_bottom() + vec2(16.0, -17.0);
    for (color, radius, label) in entries {
        painter.circle_filled(cursor + vec2(radius, 0.0), radius, color);
        let text_rect = painter.text(
            cursor + vec2(radius * 2.0 + 8.0, 0.0),
            Align2::LEFT_CENTER,
            label,
            FontId::monospace(9.0),
            MUTED,
        );
        cursor.x = text_rect.right() + 16.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_only_changes_alpha() {
        let faded = with_opacity(ACCENT, 0.5);
        assert_eq!(faded.a(), 127);
        let opaque = with_opacity(ACCENT, 2.0);
        assert_eq!(opaque.a(), 255);
    }

    #[test]
    fn canvas_coordinates_are_offset_by_rect_origin() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), vec2(100.0, 100.0));
        assert_eq!(canvas_to_screen(rect, vec2(5.0, 5.0)), Pos2::new(15.0, 25.0));
    }
}
