//! The per-frame draw loop for the dual-track timeline.
//!
//! Each call to [`TimelineRenderer::draw_frame`] clamps and eases the scroll,
//! draws only the columns inside the viewport, advances their entrance
//! animations, layers click feedback on top and rebuilds the hit areas.

use std::sync::Arc;

use egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Rect, Vec2};

use crate::config::TimelineConfig;
use crate::model::grouping::{group_by_year_and_track, total_columns, CHUNK_SIZE};
use crate::model::item::{excerpt, year_label};
use crate::model::minimap::{
    compute_minimap_rectangles, indicator_geometry, IndicatorGeometry, MinimapLayout, MinimapRect,
};
use crate::model::scale::{effective_item_width, scale_factor};
use crate::model::{CategoryFilter, Item, TimelineViewport, Track, YearGroup};
use crate::ui::theme;

use super::animation::{AnimationStore, ClickEffect};
use super::hit_test::{HitArea, HitAreas};
use super::surface::{image_index, ImageProvider, Surface};
use super::text::ellipsize;

const TRACKS: [Track; 2] = [Track::Tamil, Track::World];

// Layout constants, in unscaled pixels.
const TOP_MARGIN_FACTOR: f32 = 0.05;
const BOTTOM_MARGIN: f32 = 10.0;
const LANE_HEIGHT: f32 = 20.0;
const LANE_GAP: f32 = 20.0;
const CARD_GAP: f32 = 6.0;
const CARD_INSET: f32 = 10.0;
const CARD_ROUNDING: f32 = 6.0;
const CARD_PADDING: f32 = 8.0;
const ACCENT_HEIGHT: f32 = 4.0;
const SHADOW_OFFSET: Vec2 = Vec2::new(2.0, 3.0);
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 12.0;
const LABEL_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 20.0;
const EXCERPT_CHARS: usize = 47;
const ARROW_WIDTH: f32 = 20.0;
const ARROW_HEIGHT: f32 = 10.0;
const ARROW_LIFT: f32 = 14.0;

/// Render tuning taken from the user configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub item_width: f32,
    pub width_offset: f32,
    pub tamil_track_height_factor: f32,
    pub world_track_height_factor: f32,
    pub scroll_smoothing: f32,
    pub scroll_snap: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::from(&TimelineConfig::default())
    }
}

impl From<&TimelineConfig> for RenderSettings {
    fn from(config: &TimelineConfig) -> Self {
        Self {
            item_width: config.item_width,
            width_offset: config.width_offset,
            tamil_track_height_factor: config.tamil_track_height_factor,
            world_track_height_factor: config.world_track_height_factor,
            scroll_smoothing: config.scroll_smoothing,
            scroll_snap: config.scroll_snap,
        }
    }
}

impl RenderSettings {
    fn height_factor(&self, track: Track) -> f32 {
        match track {
            Track::Tamil => self.tamil_track_height_factor,
            Track::World => self.world_track_height_factor,
        }
    }
}

/// Numbers describing one drawn frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub scale: f32,
    pub column_width: f32,
    pub total_width: f32,
    pub visible_columns: usize,
    pub culled_columns: usize,
    pub cards_drawn: usize,
    /// Animation entries dropped because their items left the viewport.
    pub entries_pruned: usize,
}

/// Geometry shared by everything drawn in one frame. Y values are local to a
/// track's row unless noted.
#[derive(Debug, Clone, Copy)]
struct FrameLayout {
    scale: f32,
    column_width: f32,
    card_width: f32,
    row_height: f32,
    top_margin: f32,
    lane_y: f32,
    lane_height: f32,
    /// Bottom edge of every card stack.
    anchor_y: f32,
    gap: f32,
}

impl FrameLayout {
    fn new(settings: &RenderSettings, viewport: &TimelineViewport) -> Self {
        let scale = scale_factor(viewport.width);
        let column_width = effective_item_width(settings.item_width, scale, settings.width_offset);
        let row_height = viewport.height / 2.0;
        let top_margin = viewport.height * TOP_MARGIN_FACTOR;
        let content = (row_height - top_margin - BOTTOM_MARGIN * scale).max(0.0);
        let lane_height = LANE_HEIGHT * scale;
        let lane_y = top_margin + content - lane_height;
        Self {
            scale,
            column_width,
            card_width: (column_width - CARD_INSET * scale).max(1.0),
            row_height,
            top_margin,
            lane_y,
            lane_height,
            anchor_y: lane_y - LANE_GAP * scale,
            gap: CARD_GAP * scale,
        }
    }

    fn row_top(&self, track: Track) -> f32 {
        self.row_height * track.row() as f32
    }

    /// Height available to a track's card stack, scaled by its factor and
    /// never reaching above the row.
    fn stack_height(&self, settings: &RenderSettings, track: Track) -> f32 {
        let available = (self.anchor_y - self.top_margin).max(0.0);
        (available * settings.height_factor(track)).clamp(0.0, self.anchor_y.max(0.0))
    }

    /// Card rectangles for `count` items in a column at `x`, top to bottom,
    /// bottom-aligned on the stack anchor. A lone item gets the whole stack.
    fn card_rects(&self, settings: &RenderSettings, track: Track, count: usize, x: f32) -> Vec<Rect> {
        let stack = self.stack_height(settings, track);
        let bottom = self.row_top(track) + self.anchor_y;
        if count == 1 {
            return vec![Rect::from_min_size(
                pos2(x, bottom - stack),
                vec2(self.card_width, stack),
            )];
        }
        let slots = CHUNK_SIZE as f32;
        let card_height = ((stack - self.gap * (slots - 1.0)) / slots).max(0.0);
        (0..count)
            .map(|i| {
                let from_bottom = (count - i) as f32;
                let top = bottom - from_bottom * (card_height + self.gap) + self.gap;
                Rect::from_min_size(pos2(x, top), vec2(self.card_width, card_height))
            })
            .collect()
    }

    /// Index range of columns intersecting `[0, width]` at `scroll`.
    fn visible_range(&self, scroll: f32, width: f32, columns: usize) -> Option<(usize, usize)> {
        if columns == 0 || self.column_width <= 0.0 {
            return None;
        }
        let first = (scroll / self.column_width - 1.0).ceil().max(0.0) as usize;
        let last = ((scroll + width) / self.column_width).floor();
        if last < 0.0 {
            return None;
        }
        let last = (last as usize).min(columns - 1);
        (first <= last).then_some((first, last))
    }
}

/// Draws cards for one frame; borrows the renderer's mutable stores.
struct CardPainter<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    images: &'a dyn ImageProvider,
    filter: &'a CategoryFilter,
    store: &'a mut AnimationStore,
    hit_areas: &'a mut HitAreas,
    layout: FrameLayout,
    selected: Option<&'a str>,
    now_ms: f64,
}

impl<S: Surface + ?Sized> CardPainter<'_, S> {
    /// Draw one card. Hidden-category items still advance their entrance but
    /// are neither drawn nor hit-testable. Returns true when drawn.
    fn draw_card(&mut self, item: &Arc<Item>, track: Track, base: Rect, single: bool) -> bool {
        let entrance = self.store.advance(&item.id);
        if !self.filter.is_visible(&item.category) {
            return false;
        }

        let click = self.store.click_effect(&item.id, self.now_ms);
        let pop = click.map_or(1.0, |c| c.pop_scale);
        let factor = entrance.scale * pop;
        let rect = Rect::from_center_size(
            base.center() + entrance.offset * self.layout.scale,
            base.size() * factor,
        );
        let alpha = entrance.alpha;
        let scale = self.layout.scale * factor;
        let rounding = CARD_ROUNDING * scale;

        if self.selected == Some(item.id.as_str()) {
            self.surface.fill_rect(
                rect.expand(2.0 * scale),
                rounding + 2.0,
                theme::SELECTION.gamma_multiply(alpha),
            );
        }
        self.surface.fill_rect(
            rect.translate(SHADOW_OFFSET * scale),
            rounding,
            theme::CARD_SHADOW.gamma_multiply(alpha),
        );
        self.surface
            .fill_rect(rect, rounding, theme::CARD_BG.gamma_multiply(alpha));

        let accent = theme::category_color(self.filter.color_index(&item.category));
        self.surface.fill_rect(
            Rect::from_min_size(rect.min, vec2(rect.width(), ACCENT_HEIGHT * scale)),
            0.0,
            accent.gamma_multiply(alpha),
        );

        let mut inner = rect.shrink(CARD_PADDING * scale);
        inner.min.y += ACCENT_HEIGHT * scale;
        if inner.is_positive() {
            self.surface.push_clip(rect);
            let image = self.draw_image(item, inner, single, alpha);
            if single {
                self.draw_wrapped_text(item, track, inner, image, scale, alpha);
            } else {
                self.draw_single_line(item, track, inner, image, scale, alpha);
            }
            self.surface.pop_clip();
        }

        if let Some(effect) = click {
            self.draw_ripple(rect, effect, accent);
        }

        self.hit_areas.push(item, rect);
        true
    }

    /// Decorative image in the top-left of the content area, if loaded.
    fn draw_image(&mut self, item: &Item, inner: Rect, single: bool, alpha: f32) -> Option<Rect> {
        let index = image_index(&item.id, self.images.pool_size())?;
        let texture = self.images.image(index)?;
        let side = if single {
            (inner.width() * 0.4).min(inner.height() * 0.35)
        } else {
            inner.height().min(inner.width() * 0.3)
        };
        if side <= 1.0 {
            return None;
        }
        let rect = Rect::from_min_size(inner.min, Vec2::splat(side));
        self.surface
            .draw_image(texture, rect, Color32::WHITE.gamma_multiply(alpha));
        Some(rect)
    }

    /// Heading plus a short excerpt, wrapped and floated around the image.
    fn draw_wrapped_text(
        &mut self,
        item: &Item,
        track: Track,
        inner: Rect,
        image: Option<Rect>,
        scale: f32,
        alpha: f32,
    ) {
        let line_height = LINE_HEIGHT * scale;
        let float = image.map(|img| img.expand2(vec2(CARD_PADDING * scale, 0.0)));

        let heading_font = FontId::proportional(HEADING_SIZE * scale);
        let y = self.surface.wrap_text(
            item.heading(track),
            inner.min,
            inner.width(),
            line_height,
            &heading_font,
            theme::CARD_TEXT.gamma_multiply(alpha),
            float,
        );

        let body = excerpt(item.long_text(track), EXCERPT_CHARS);
        if !body.is_empty() && y + line_height <= inner.bottom() {
            let body_font = FontId::proportional(BODY_SIZE * scale);
            self.surface.wrap_text(
                &body,
                pos2(inner.left(), y + line_height * 0.5),
                inner.width(),
                line_height,
                &body_font,
                theme::CARD_TEXT_DIM.gamma_multiply(alpha),
                float,
            );
        }
    }

    fn draw_single_line(
        &mut self,
        item: &Item,
        track: Track,
        inner: Rect,
        image: Option<Rect>,
        scale: f32,
        alpha: f32,
    ) {
        let left = image.map_or(inner.left(), |img| img.right() + CARD_PADDING * scale);
        let width = inner.right() - left;
        if width <= 0.0 {
            return;
        }
        let font = FontId::proportional(HEADING_SIZE * scale);
        let heading = ellipsize(&mut *self.surface, item.heading(track), &font, width);
        self.surface.text(
            pos2(left, inner.center().y),
            Align2::LEFT_CENTER,
            &heading,
            font,
            theme::CARD_TEXT.gamma_multiply(alpha),
        );
    }

    fn draw_ripple(&mut self, rect: Rect, effect: ClickEffect, tint: Color32) {
        self.surface.push_clip(rect);
        self.surface.fill_circle(
            rect.min + effect.center.to_vec2(),
            effect.ripple_radius(rect.size()),
            tint.gamma_multiply(effect.ripple_alpha),
        );
        self.surface.pop_clip();
    }
}

/// Minimap marks for one minimap geometry; rebuilt when it changes.
struct MinimapCache {
    width: f32,
    layout: MinimapLayout,
    categories: usize,
    rects: Vec<MinimapRect>,
}

/// Owns the year groups and all per-frame state of the timeline canvas.
pub struct TimelineRenderer {
    groups: Vec<YearGroup>,
    /// (group index, column index) for every flat column position.
    flat: Vec<(usize, usize)>,
    settings: RenderSettings,
    store: AnimationStore,
    hit_areas: HitAreas,
    selected: Option<String>,
    last_stats: FrameStats,
    minimap: Option<MinimapCache>,
}

impl TimelineRenderer {
    pub fn new(items: &[Arc<Item>], settings: RenderSettings, entrance_speed: f32) -> Self {
        let mut renderer = Self {
            groups: Vec::new(),
            flat: Vec::new(),
            settings,
            store: AnimationStore::new(entrance_speed),
            hit_areas: HitAreas::default(),
            selected: None,
            last_stats: FrameStats::default(),
            minimap: None,
        };
        renderer.set_items(items);
        renderer
    }

    /// Replace the data set. Groups are re-derived and transient state reset.
    pub fn set_items(&mut self, items: &[Arc<Item>]) {
        self.groups = group_by_year_and_track(items);
        self.flat = self
            .groups
            .iter()
            .enumerate()
            .flat_map(|(g, group)| (0..group.columns.len()).map(move |c| (g, c)))
            .collect();
        debug_assert_eq!(self.flat.len(), total_columns(&self.groups));
        self.store.clear();
        self.hit_areas.clear();
        self.selected = None;
        self.minimap = None;
        log::info!(
            "Timeline has {} years in {} columns",
            self.groups.len(),
            self.flat.len()
        );
    }

    pub fn groups(&self) -> &[YearGroup] {
        &self.groups
    }

    pub fn column_count(&self) -> usize {
        self.flat.len()
    }

    #[cfg(test)]
    pub fn store(&self) -> &AnimationStore {
        &self.store
    }

    pub fn set_entrance_speed(&mut self, speed: f32) {
        self.store.set_speed(speed);
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, id: Option<String>) {
        self.selected = id;
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Full timeline width for a viewport of the given width.
    pub fn total_width(&self, viewport_width: f32) -> f32 {
        let scale = scale_factor(viewport_width);
        let stride = effective_item_width(self.settings.item_width, scale, self.settings.width_offset);
        self.flat.len() as f32 * stride
    }

    /// Target scroll that puts the first column of `year` at the left edge
    /// (the nearest following year when `year` has no events).
    pub fn scroll_offset_for_year(&self, year: i32, viewport_width: f32) -> Option<f32> {
        let group = self.groups.iter().position(|g| g.year >= year)?;
        let column = self.flat.iter().position(|&(g, _)| g == group)?;
        let scale = scale_factor(viewport_width);
        let stride = effective_item_width(self.settings.item_width, scale, self.settings.width_offset);
        Some(column as f32 * stride)
    }

    /// Draw one frame. Degenerate viewports draw nothing.
    pub fn draw_frame<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        images: &dyn ImageProvider,
        viewport: &mut TimelineViewport,
        filter: &CategoryFilter,
        now_ms: f64,
    ) -> FrameStats {
        self.hit_areas.clear();
        if viewport.is_degenerate() {
            self.last_stats = FrameStats::default();
            return self.last_stats;
        }

        let layout = FrameLayout::new(&self.settings, viewport);
        let total_width = self.flat.len() as f32 * layout.column_width;
        viewport.clamp_scroll(total_width);
        viewport.step_smoothing(self.settings.scroll_smoothing, self.settings.scroll_snap);
        let scroll = viewport.smooth_scroll_x;

        surface.clear(vec2(viewport.width, viewport.height));
        self.store.begin_frame();
        self.store.prune_clicks(now_ms);

        let mut stats = FrameStats {
            scale: layout.scale,
            column_width: layout.column_width,
            total_width,
            ..Default::default()
        };
        let mut labels: Vec<(f32, i32)> = Vec::new();

        let range = layout.visible_range(scroll, viewport.width, self.flat.len());
        {
            let mut painter = CardPainter {
                surface: &mut *surface,
                images,
                filter,
                store: &mut self.store,
                hit_areas: &mut self.hit_areas,
                layout,
                selected: self.selected.as_deref(),
                now_ms,
            };

            if let Some((first, last)) = range {
                for &(g, c) in &self.flat[first..=last] {
                    let group = &self.groups[g];
                    let column = &group.columns[c];
                    let x = (first + labels.len()) as f32 * layout.column_width - scroll;
                    labels.push((x, group.year));

                    for track in TRACKS {
                        let items = column.items(track);
                        let rects = layout.card_rects(&self.settings, track, items.len(), x);
                        let single = items.len() == 1;
                        for (item, rect) in items.iter().zip(rects) {
                            if painter.draw_card(item, track, rect, single) {
                                stats.cards_drawn += 1;
                            }
                        }
                    }
                }
            }
        }

        stats.visible_columns = labels.len();
        stats.culled_columns = self.flat.len() - labels.len();
        stats.entries_pruned = self.store.end_frame();
        if stats.entries_pruned > 0 {
            log::trace!("Pruned {} animation entries", stats.entries_pruned);
        }
        if stats.visible_columns != self.last_stats.visible_columns {
            log::debug!(
                "Drawing {} columns, {} culled",
                stats.visible_columns,
                stats.culled_columns
            );
        }

        draw_lanes(surface, &layout, viewport.width);
        draw_year_labels(surface, &layout, &labels);
        draw_arrows(surface, &layout, viewport.width);

        self.last_stats = stats;
        stats
    }

    /// Topmost-recorded card under `pos` in the last frame.
    pub fn hit_test(&self, pos: Pos2) -> Option<&HitArea> {
        self.hit_areas.hit_test(pos)
    }

    #[cfg(test)]
    pub fn hit_areas(&self) -> &HitAreas {
        &self.hit_areas
    }

    /// Handle a click at canvas position `pos`: a card under it is selected
    /// and gets click feedback; empty space clears the selection.
    pub fn click_at(&mut self, pos: Pos2, now_ms: f64) -> Option<Arc<Item>> {
        let hit = self
            .hit_areas
            .hit_test(pos)
            .map(|area| (area.id.clone(), pos - area.rect.min, Arc::clone(&area.item)));
        match hit {
            Some((id, offset, item)) => {
                self.trigger_click_effect(&id, offset.x, offset.y, now_ms);
                self.selected = Some(id);
                Some(item)
            }
            None => {
                self.selected = None;
                None
            }
        }
    }

    /// Every item projected onto a minimap of the given geometry. Computed
    /// once per dataset and geometry.
    pub fn minimap_rects(
        &mut self,
        filter: &CategoryFilter,
        minimap_width: f32,
        layout: MinimapLayout,
    ) -> &[MinimapRect] {
        let fresh = self.minimap.as_ref().is_some_and(|cache| {
            cache.width == minimap_width
                && cache.layout == layout
                && cache.categories == filter.len()
        });
        if !fresh {
            let rects = compute_minimap_rectangles(
                &self.groups,
                filter,
                self.settings.item_width,
                minimap_width,
                layout,
            );
            log::debug!("Laid out {} minimap marks", rects.len());
            self.minimap = Some(MinimapCache {
                width: minimap_width,
                layout,
                categories: filter.len(),
                rects,
            });
        }
        match &self.minimap {
            Some(cache) => &cache.rects,
            None => &[],
        }
    }

    /// Start ripple/pop feedback at a point relative to the card's corner.
    pub fn trigger_click_effect(&mut self, id: &str, local_x: f32, local_y: f32, now_ms: f64) {
        self.store.trigger_click(id, local_x, local_y, now_ms);
    }

    /// Minimap indicator for the viewport's current target scroll.
    pub fn update_indicator_transforms(
        &self,
        viewport: &TimelineViewport,
        minimap_width: f32,
        margin: f32,
    ) -> IndicatorGeometry {
        indicator_geometry(
            viewport.scroll_x,
            viewport.width,
            self.total_width(viewport.width),
            minimap_width,
            margin,
        )
    }
}

fn draw_lanes<S: Surface + ?Sized>(surface: &mut S, layout: &FrameLayout, width: f32) {
    for track in TRACKS {
        let top = layout.row_top(track) + layout.lane_y;
        surface.fill_rect(
            Rect::from_min_size(pos2(0.0, top), vec2(width, layout.lane_height)),
            0.0,
            theme::LANE_BG,
        );
    }
}

fn draw_year_labels<S: Surface + ?Sized>(surface: &mut S, layout: &FrameLayout, labels: &[(f32, i32)]) {
    let font = FontId::proportional(LABEL_SIZE * layout.scale);
    for track in TRACKS {
        let y = layout.row_top(track) + layout.lane_y + layout.lane_height / 2.0;
        for &(x, year) in labels {
            surface.text(
                pos2(x + layout.card_width / 2.0, y),
                Align2::CENTER_CENTER,
                &year_label(track, year),
                font.clone(),
                theme::LANE_TEXT,
            );
        }
    }
}

fn draw_arrows<S: Surface + ?Sized>(surface: &mut S, layout: &FrameLayout, width: f32) {
    let cx = width / 2.0;
    let (w, h) = (ARROW_WIDTH * layout.scale, ARROW_HEIGHT * layout.scale);
    for track in TRACKS {
        let cy = layout.row_top(track) + layout.lane_y + layout.lane_height / 2.0
            - ARROW_LIFT * layout.scale;
        surface.fill_triangle(
            [
                pos2(cx, cy - h / 2.0),
                pos2(cx - w / 2.0, cy + h / 2.0),
                pos2(cx + w / 2.0, cy + h / 2.0),
            ],
            theme::ARROW,
        );
    }
}
