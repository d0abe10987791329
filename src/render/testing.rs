//! Test doubles for the render pipeline.

use egui::{Align2, Color32, FontId, Pos2, Rect, TextureId, Vec2};

use super::surface::{ImageProvider, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Clear(Vec2),
    Rect(Rect, Color32),
    Circle(Pos2, f32, Color32),
    Triangle([Pos2; 3], Color32),
    Image(TextureId, Rect),
    Text(Pos2, String, Color32),
    PushClip(Rect),
    PopClip,
}

/// Surface that records every call. Text is measured as half the font size
/// per character.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(_, t, _) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn images(&self) -> Vec<(TextureId, Rect)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Image(id, r) => Some((*id, *r)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, size: Vec2) {
        self.ops.push(Op::Clear(size));
    }

    fn fill_rect(&mut self, rect: Rect, _rounding: f32, color: Color32) {
        self.ops.push(Op::Rect(rect, color));
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.ops.push(Op::Circle(center, radius, color));
    }

    fn fill_triangle(&mut self, points: [Pos2; 3], color: Color32) {
        self.ops.push(Op::Triangle(points, color));
    }

    fn draw_image(&mut self, texture: TextureId, rect: Rect, _tint: Color32) {
        self.ops.push(Op::Image(texture, rect));
    }

    fn text(&mut self, pos: Pos2, _anchor: Align2, text: &str, _font: FontId, color: Color32) {
        self.ops.push(Op::Text(pos, text.to_string(), color));
    }

    fn text_width(&mut self, text: &str, font: &FontId) -> f32 {
        text.chars().count() as f32 * font.size * 0.5
    }

    fn push_clip(&mut self, rect: Rect) {
        self.ops.push(Op::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.ops.push(Op::PopClip);
    }
}

/// Provider with no images; cards are drawn text-only.
pub struct NoImages;

impl ImageProvider for NoImages {
    fn pool_size(&self) -> usize {
        0
    }

    fn image(&self, _index: usize) -> Option<TextureId> {
        None
    }
}

/// Provider whose every slot is a loaded texture.
pub struct FakeImages(pub usize);

impl ImageProvider for FakeImages {
    fn pool_size(&self) -> usize {
        self.0
    }

    fn image(&self, index: usize) -> Option<TextureId> {
        (index < self.0).then_some(TextureId::User(index as u64))
    }
}

/// Provider whose images never finish loading.
pub struct PendingImages;

impl ImageProvider for PendingImages {
    fn pool_size(&self) -> usize {
        3
    }

    fn image(&self, _index: usize) -> Option<TextureId> {
        None
    }
}
