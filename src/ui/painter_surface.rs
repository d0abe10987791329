use egui::{pos2, Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, TextureId, Vec2};

use crate::render::Surface;
use crate::ui::theme;

/// `Surface` backed by an egui `Painter`. Canvas coordinates are offset by
/// the allocated rect's top-left corner.
pub struct PainterSurface {
    painter: Painter,
    offset: Vec2,
    clip_stack: Vec<Rect>,
}

impl PainterSurface {
    pub fn new(painter: Painter, origin: Pos2) -> Self {
        Self {
            painter,
            offset: origin.to_vec2(),
            clip_stack: Vec::new(),
        }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        pos + self.offset
    }

    fn rect_to_screen(&self, rect: Rect) -> Rect {
        rect.translate(self.offset)
    }
}

impl Surface for PainterSurface {
    fn clear(&mut self, size: Vec2) {
        let rect = self.rect_to_screen(Rect::from_min_size(Pos2::ZERO, size));
        self.painter.rect_filled(rect, 0.0, theme::BG_DARK);
    }

    fn fill_rect(&mut self, rect: Rect, rounding: f32, color: Color32) {
        self.painter
            .rect_filled(self.rect_to_screen(rect), rounding, color);
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter
            .circle_filled(self.to_screen(center), radius, color);
    }

    fn fill_triangle(&mut self, points: [Pos2; 3], color: Color32) {
        let points = points.iter().map(|p| self.to_screen(*p)).collect();
        self.painter
            .add(Shape::convex_polygon(points, color, Stroke::NONE));
    }

    fn draw_image(&mut self, texture: TextureId, rect: Rect, tint: Color32) {
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        self.painter
            .image(texture, self.rect_to_screen(rect), uv, tint);
    }

    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, font: FontId, color: Color32) {
        self.painter
            .text(self.to_screen(pos), anchor, text, font, color);
    }

    fn text_width(&mut self, text: &str, font: &FontId) -> f32 {
        self.painter
            .layout_no_wrap(text.to_string(), font.clone(), Color32::WHITE)
            .size()
            .x
    }

    fn push_clip(&mut self, rect: Rect) {
        let current = self.painter.clip_rect();
        self.clip_stack.push(current);
        self.painter
            .set_clip_rect(current.intersect(self.rect_to_screen(rect)));
    }

    fn pop_clip(&mut self) {
        if let Some(previous) = self.clip_stack.pop() {
            self.painter.set_clip_rect(previous);
        }
    }
}
