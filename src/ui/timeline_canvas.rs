use std::sync::Arc;

use egui::{RichText, Sense, Ui};

use crate::model::item::year_label;
use crate::model::{CategoryFilter, Item, TimelineViewport, Track};
use crate::render::{ImageProvider, TimelineRenderer};
use crate::ui::painter_surface::PainterSurface;
use crate::ui::theme;

/// A click on the canvas this frame.
#[derive(Debug)]
pub enum CanvasClick {
    /// A card was clicked and is now selected.
    Item(Arc<Item>),
    /// Empty space was clicked; nothing is selected.
    Empty,
}

/// Render the timeline canvas into all remaining space and handle pointer
/// input: drag and wheel scroll, click to select.
pub fn show_timeline_canvas(
    renderer: &mut TimelineRenderer,
    viewport: &mut TimelineViewport,
    filter: &CategoryFilter,
    images: &dyn ImageProvider,
    ui: &mut Ui,
) -> Option<CanvasClick> {
    let size = ui.available_size();
    let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
    let rect = response.rect;
    viewport.resize(rect.width(), rect.height());

    if response.dragged() {
        viewport.scroll_by(-response.drag_delta().x);
    }
    if response.hovered() {
        // Either wheel axis scrolls the timeline sideways.
        let delta = ui.input(|i| i.smooth_scroll_delta);
        let d = if delta.x.abs() > delta.y.abs() { delta.x } else { delta.y };
        if d != 0.0 {
            viewport.scroll_by(-d);
        }
    }

    let now_ms = ui.input(|i| i.time) * 1000.0;
    let mut surface = PainterSurface::new(painter, rect.min);
    renderer.draw_frame(&mut surface, images, viewport, filter, now_ms);

    let click = response
        .clicked()
        .then(|| response.interact_pointer_pos())
        .flatten()
        .map(|pos| match renderer.click_at(pos - rect.min.to_vec2(), now_ms) {
            Some(item) => CanvasClick::Item(item),
            None => CanvasClick::Empty,
        });

    let hovered = response
        .hover_pos()
        .and_then(|pos| renderer.hit_test(pos - rect.min.to_vec2()))
        .map(|area| Arc::clone(&area.item));
    if let Some(item) = hovered {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        response.on_hover_ui_at_pointer(|ui| {
            let track = item.track();
            ui.strong(item.heading(track));
            ui.label(
                RichText::new(format!(
                    "{} · {}",
                    year_label(Track::World, item.year_ce),
                    year_label(Track::Tamil, item.year_ce)
                ))
                .font(theme::font_small())
                .color(theme::TEXT_SECONDARY),
            );
            ui.label(
                RichText::new(&item.category)
                    .font(theme::font_small())
                    .color(theme::TEXT_DIM),
            );
        });
    }

    click
}
