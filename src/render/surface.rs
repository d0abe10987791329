use egui::{Align2, Color32, FontId, Pos2, Rect, TextureId};

use super::text;

/// The drawing operations the render pipeline needs. All coordinates are in
/// canvas pixel space with the origin at the canvas' top-left corner.
pub trait Surface {
    /// Clear the whole canvas.
    fn clear(&mut self, size: egui::Vec2);

    fn fill_rect(&mut self, rect: Rect, rounding: f32, color: Color32);

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);

    fn fill_triangle(&mut self, points: [Pos2; 3], color: Color32);

    /// Draw a texture stretched over `rect`, tinted with `tint`.
    fn draw_image(&mut self, texture: TextureId, rect: Rect, tint: Color32);

    /// Single line of text anchored at `pos`.
    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, font: FontId, color: Color32);

    /// Width of `text` laid out on one line.
    fn text_width(&mut self, text: &str, font: &FontId) -> f32;

    /// Restrict subsequent drawing to `rect` until the matching `pop_clip`.
    fn push_clip(&mut self, rect: Rect);

    fn pop_clip(&mut self);

    /// Greedy word wrap starting at `pos` (top-left of the first line).
    /// Lines whose top lies above `float_left`'s bottom start at its right
    /// edge instead, so text flows around a floated box.
    /// Returns the y coordinate just below the last drawn line.
    #[allow(clippy::too_many_arguments)]
    fn wrap_text(
        &mut self,
        text: &str,
        pos: Pos2,
        max_width: f32,
        line_height: f32,
        font: &FontId,
        color: Color32,
        float_left: Option<Rect>,
    ) -> f32 {
        let right = pos.x + max_width;
        let line_left = |y: f32| match float_left {
            Some(float) if y < float.bottom() => float.right().max(pos.x).min(right),
            _ => pos.x,
        };
        let lines = text::wrap_lines(self, text, font, |n| {
            right - line_left(pos.y + n as f32 * line_height)
        });
        let mut y = pos.y;
        for line in lines {
            self.text(Pos2::new(line_left(y), y), Align2::LEFT_TOP, &line, font.clone(), color);
            y += line_height;
        }
        y
    }
}

/// Source of decorative card images, keyed by pool index.
pub trait ImageProvider {
    /// Number of images in the pool.
    fn pool_size(&self) -> usize;

    /// The texture for `index`, or `None` while it is missing or still loading.
    fn image(&self, index: usize) -> Option<TextureId>;
}

/// Stable polynomial hash (base 31) of an item id.
pub fn id_hash(id: &str) -> u32 {
    id.bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32))
}

/// Pool slot for an item's decorative image.
pub fn image_index(id: &str, pool_size: usize) -> Option<usize> {
    if pool_size == 0 {
        None
    } else {
        Some(id_hash(id) as usize % pool_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable() {
        assert_eq!(id_hash(""), 0);
        assert_eq!(id_hash("a"), 97);
        assert_eq!(id_hash("ab"), 97 * 31 + 98);
        assert_eq!(id_hash("item-42"), id_hash("item-42"));
    }

    #[test]
    fn image_index_within_pool() {
        assert_eq!(image_index("anything", 0), None);
        for id in ["1", "2", "17", "long-identifier-value"] {
            let idx = image_index(id, 5).unwrap();
            assert!(idx < 5);
            assert_eq!(image_index(id, 5), Some(idx));
        }
        assert_eq!(image_index("ab", 5), Some((97 * 31 + 98) % 5));
    }
}
