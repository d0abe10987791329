use egui::{pos2, vec2, Rect, Sense, Stroke, Ui};

use crate::model::minimap::{compute_timeline_ticks, scroll_for_pointer, MinimapLayout};
use crate::model::{CategoryFilter, TimelineViewport};
use crate::render::TimelineRenderer;
use crate::ui::theme;

const TICK_SPACING: f32 = 15.0;
const TICK_HEIGHT: f32 = 6.0;
const MARK_HOVER_SLOP: f32 = 1.5;

/// Overview strip under the canvas. Clicking or dragging anywhere centres
/// the viewport indicator on the pointer.
pub fn show_minimap(
    renderer: &mut TimelineRenderer,
    viewport: &mut TimelineViewport,
    filter: &CategoryFilter,
    width: f32,
    height: f32,
    margin: f32,
    ui: &mut Ui,
) {
    let width = width.min(ui.available_width()).max(1.0);
    let (response, painter) = ui.allocate_painter(vec2(width, height), Sense::click_and_drag());
    let rect = response.rect;
    let origin = rect.min.to_vec2();

    if (response.clicked() || response.dragged()) && !viewport.is_degenerate() {
        if let Some(pos) = response.interact_pointer_pos() {
            let total_width = renderer.total_width(viewport.width);
            let target = scroll_for_pointer(pos.x - rect.min.x, viewport.width, total_width, width, margin);
            viewport.scroll_to(target);
        }
    }

    painter.rect_filled(rect, 4.0, theme::MINIMAP_BG);

    let layout = MinimapLayout {
        total_height: height,
        ..Default::default()
    };
    for tick in compute_timeline_ticks(width, margin, TICK_SPACING) {
        let x = rect.min.x + tick.left;
        painter.line_segment(
            [
                pos2(x, rect.top() + layout.timescale_height - TICK_HEIGHT),
                pos2(x, rect.top() + layout.timescale_height),
            ],
            Stroke::new(1.0, theme::MINIMAP_TICK),
        );
    }

    let hover = response.hover_pos().map(|pos| pos - origin);
    let mut hovered_title = None;
    for mark in renderer.minimap_rects(filter, width, layout) {
        if !filter.is_visible(&mark.category) {
            continue;
        }
        painter.rect_filled(
            mark.rect.translate(origin),
            0.0,
            theme::category_color(mark.color_index),
        );
        if hover.is_some_and(|pos| mark.rect.expand(MARK_HOVER_SLOP).contains(pos)) {
            hovered_title = Some(mark.title.clone());
        }
    }

    let indicator = renderer.update_indicator_transforms(viewport, width, margin);
    let indicator_rect = Rect::from_min_size(
        pos2(rect.min.x + indicator.left, rect.top()),
        vec2(indicator.width, height),
    );
    painter.rect_filled(indicator_rect, 2.0, theme::INDICATOR_FILL);
    painter.rect_stroke(indicator_rect, 2.0, Stroke::new(1.0, theme::INDICATOR_STROKE));

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    }
    if let Some(title) = hovered_title {
        response.on_hover_text_at_pointer(title);
    }
}
