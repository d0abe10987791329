use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::category::PALETTE_LEN;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(90, 140, 220);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);

// ── Timeline canvas ──────────────────────────────────────────────────────────

pub const CARD_BG: Color32 = Color32::from_rgb(44, 46, 60);
pub const CARD_SHADOW: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 90);
pub const CARD_TEXT: Color32 = TEXT_PRIMARY;
pub const CARD_TEXT_DIM: Color32 = TEXT_SECONDARY;
pub const SELECTION: Color32 = BORDER_ACCENT;

pub const LANE_BG: Color32 = Color32::from_rgb(38, 40, 54);
pub const LANE_TEXT: Color32 = TEXT_SECONDARY;
pub const ARROW: Color32 = Color32::WHITE;

// ── Minimap ──────────────────────────────────────────────────────────────────

pub const MINIMAP_BG: Color32 = Color32::from_rgb(20, 20, 28);
pub const MINIMAP_TICK: Color32 = Color32::from_rgb(70, 74, 90);
pub const INDICATOR_FILL: Color32 = Color32::from_rgba_premultiplied(40, 70, 110, 60);
pub const INDICATOR_STROKE: Color32 = BORDER_ACCENT;

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const DETAILS_PANEL_WIDTH: f32 = 300.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

// ── Category palette ─────────────────────────────────────────────────────────

pub const CATEGORY_COLORS: [Color32; PALETTE_LEN] = [
    Color32::from_rgb(0xf4, 0x43, 0x36), // red
    Color32::from_rgb(0xe9, 0x1e, 0x63), // pink
    Color32::from_rgb(0x9c, 0x27, 0xb0), // purple
    Color32::from_rgb(0x21, 0x96, 0xf3), // blue
    Color32::from_rgb(0x4c, 0xaf, 0x50), // green
    Color32::from_rgb(0xff, 0x98, 0x00), // orange
    Color32::from_rgb(0x79, 0x55, 0x48), // brown
];

/// Used for categories the filter doesn't know about.
pub const FALLBACK_CATEGORY: Color32 = Color32::from_rgb(0x9e, 0x9e, 0x9e);

pub fn category_color(index: Option<usize>) -> Color32 {
    index
        .and_then(|i| CATEGORY_COLORS.get(i).copied())
        .unwrap_or(FALLBACK_CATEGORY)
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = Color32::from_rgb(20, 20, 28);

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(42, 44, 56);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(52, 54, 68);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(60, 62, 76);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.striped = false;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_color_falls_back_for_unknown() {
        assert_eq!(category_color(Some(0)), CATEGORY_COLORS[0]);
        assert_eq!(category_color(Some(6)), CATEGORY_COLORS[6]);
        assert_eq!(category_color(None), FALLBACK_CATEGORY);
        assert_eq!(category_color(Some(PALETTE_LEN)), FALLBACK_CATEGORY);
    }
}
