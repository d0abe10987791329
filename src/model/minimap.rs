use egui::{Pos2, Rect, Vec2};

use super::category::CategoryFilter;
use super::grouping::{total_columns, YearGroup};
use super::item::Track;

/// Narrowest the indicator may get, so it stays grabbable.
pub const MIN_INDICATOR_WIDTH: f32 = 10.0;

/// Column stride offset used when projecting columns onto the minimap.
const MINIMAP_WIDTH_OFFSET: f32 = 2.0;
const MINIMAP_ITEM_WIDTH: f32 = 5.0;
const MINIMAP_ITEM_HEIGHT: f32 = 1.5;
const MINIMAP_ROWS: usize = 6;
const TRACK_NUDGE: f32 = 10.0;

/// Indicator rectangle along the minimap's x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorGeometry {
    pub width: f32,
    pub left: f32,
}

/// Forward mapping from scroll offset to indicator geometry.
pub fn indicator_geometry(
    scroll_x: f32,
    viewport_width: f32,
    total_width: f32,
    minimap_width: f32,
    margin: f32,
) -> IndicatorGeometry {
    if total_width <= viewport_width {
        return IndicatorGeometry {
            width: minimap_width,
            left: margin,
        };
    }

    let inner = minimap_width - margin * 2.0;
    let width = ((viewport_width / total_width) * inner).max(MIN_INDICATOR_WIDTH);
    let travel = inner - width;
    let ratio = scroll_x / (total_width - viewport_width);
    let left = if travel > 0.0 && ratio.is_finite() {
        margin + ratio * travel
    } else {
        margin
    };

    IndicatorGeometry { width, left }
}

/// Reverse mapping for drag-to-scroll. `pointer_x` is relative to the
/// minimap's left edge; the indicator is centred on the pointer.
///
/// Returns 0 when the timeline fits the viewport or the indicator has no room
/// to travel.
pub fn scroll_for_pointer(
    pointer_x: f32,
    viewport_width: f32,
    total_width: f32,
    minimap_width: f32,
    margin: f32,
) -> f32 {
    if total_width <= viewport_width {
        return 0.0;
    }
    let base = indicator_geometry(0.0, viewport_width, total_width, minimap_width, margin);
    let travel = minimap_width - margin * 2.0 - base.width;
    if travel <= 0.0 || !pointer_x.is_finite() {
        return 0.0;
    }

    let local = pointer_x - margin;
    let left = (local - base.width / 2.0).clamp(0.0, travel);
    (left / travel) * (total_width - viewport_width)
}

/// A minor tick mark on the minimap scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub left: f32,
}

/// Evenly spaced tick marks across the minimap.
pub fn compute_timeline_ticks(minimap_width: f32, margin: f32, spacing: f32) -> Vec<Tick> {
    let available = minimap_width - margin * 2.0;
    if spacing <= 0.0 || available < 0.0 {
        return Vec::new();
    }
    let count = (available / spacing).floor() as usize + 1;
    (0..count)
        .map(|i| Tick {
            left: margin + i as f32 * spacing,
        })
        .collect()
}

/// One item projected onto the minimap.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapRect {
    pub rect: Rect,
    /// Palette slot, `None` for categories the filter does not know.
    pub color_index: Option<usize>,
    pub title: String,
    pub category: String,
}

/// Vertical layout of the minimap strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapLayout {
    pub left_margin: f32,
    pub timescale_height: f32,
    pub total_height: f32,
}

impl Default for MinimapLayout {
    fn default() -> Self {
        Self {
            left_margin: 2.0,
            timescale_height: 20.0,
            total_height: 75.0,
        }
    }
}

/// Project every item onto a small rectangle in minimap space, preserving the
/// two-track split and each column's bottom-aligned stacking.
pub fn compute_minimap_rectangles(
    groups: &[YearGroup],
    filter: &CategoryFilter,
    item_width: f32,
    minimap_width: f32,
    layout: MinimapLayout,
) -> Vec<MinimapRect> {
    let columns = total_columns(groups);
    if columns == 0 {
        return Vec::new();
    }

    let track_height = (layout.total_height - layout.timescale_height) / 2.0;
    let row_height = track_height / MINIMAP_ROWS as f32;
    let stride = item_width + MINIMAP_WIDTH_OFFSET;
    let full_width = columns as f32 * stride;
    let span = minimap_width - 2.0 * layout.left_margin;

    let mut rects = Vec::new();
    let flat_columns = groups.iter().flat_map(|g| g.columns.iter());
    for (flat_index, column) in flat_columns.enumerate() {
        let raw_x = flat_index as f32 * stride;
        let x = layout.left_margin + (raw_x / full_width) * span;

        for (track, nudge) in [(Track::Tamil, -TRACK_NUDGE), (Track::World, TRACK_NUDGE)] {
            let items = column.items(track);
            for (row, item) in items.iter().enumerate() {
                let inverted = (MINIMAP_ROWS + row).saturating_sub(items.len());
                let top = layout.timescale_height + inverted as f32 * row_height + nudge;
                rects.push(MinimapRect {
                    rect: Rect::from_min_size(
                        Pos2::new(x, top),
                        Vec2::new(MINIMAP_ITEM_WIDTH, MINIMAP_ITEM_HEIGHT),
                    ),
                    color_index: filter.color_index(&item.category),
                    title: item.heading(track).to_string(),
                    category: item.category.clone(),
                });
            }
        }
    }
    rects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::grouping::group_by_year_and_track;
    use crate::model::item::{Item, WORLD_HISTORY};
    use std::sync::Arc;

    const EPS: f32 = 1e-3;

    #[test]
    fn indicator_width_scenario() {
        let g = indicator_geometry(0.0, 800.0, 3000.0, 150.0, 0.0);
        assert!((g.width - 40.0).abs() < EPS);
        assert!((g.left - 0.0).abs() < EPS);
    }

    #[test]
    fn indicator_reaches_end_of_travel() {
        let g = indicator_geometry(2200.0, 800.0, 3000.0, 150.0, 0.0);
        assert!((g.left - 110.0).abs() < EPS);
        let g = indicator_geometry(1100.0, 800.0, 3000.0, 150.0, 5.0);
        let width = (800.0 / 3000.0) * 140.0;
        assert!((g.left - (5.0 + 0.5 * (140.0 - width))).abs() < EPS);
    }

    #[test]
    fn indicator_spans_minimap_when_nothing_to_scroll() {
        for scroll in [0.0, 50.0, -20.0, 1e6] {
            let g = indicator_geometry(scroll, 800.0, 600.0, 150.0, 4.0);
            assert_eq!(g, IndicatorGeometry { width: 150.0, left: 4.0 });
            let g = indicator_geometry(scroll, 800.0, 800.0, 150.0, 4.0);
            assert_eq!(g.width, 150.0);
        }
    }

    #[test]
    fn indicator_width_has_floor() {
        let g = indicator_geometry(0.0, 100.0, 1_000_000.0, 150.0, 0.0);
        assert_eq!(g.width, MIN_INDICATOR_WIDTH);
    }

    #[test]
    fn forward_then_reverse_round_trips() {
        let (viewport, total, minimap, margin) = (800.0, 3000.0, 150.0, 6.0);
        for scroll in [0.0, 1.0, 333.3, 1100.0, 2199.0, 2200.0] {
            let g = indicator_geometry(scroll, viewport, total, minimap, margin);
            let back = scroll_for_pointer(g.left + g.width / 2.0, viewport, total, minimap, margin);
            assert!((back - scroll).abs() < 0.05, "{} -> {}", scroll, back);
        }
    }

    #[test]
    fn reverse_mapping_clamps_and_never_yields_nan() {
        let s = scroll_for_pointer(-500.0, 800.0, 3000.0, 150.0, 0.0);
        assert_eq!(s, 0.0);
        let s = scroll_for_pointer(5000.0, 800.0, 3000.0, 150.0, 0.0);
        assert!((s - 2200.0).abs() < EPS);
        assert_eq!(scroll_for_pointer(75.0, 800.0, 800.0, 150.0, 0.0), 0.0);
        // Floor width fills the whole minimap: no travel left.
        assert_eq!(scroll_for_pointer(3.0, 100.0, 1e6, 10.0, 0.0), 0.0);
    }

    #[test]
    fn ticks_cover_available_width() {
        let ticks = compute_timeline_ticks(150.0, 0.0, 15.0);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[0].left, 0.0);
        assert_eq!(ticks[10].left, 150.0);
        let ticks = compute_timeline_ticks(150.0, 10.0, 15.0);
        assert_eq!(ticks.len(), 9);
        assert_eq!(ticks[0].left, 10.0);
        assert!(compute_timeline_ticks(150.0, 0.0, 0.0).is_empty());
    }

    #[test]
    fn minimap_rectangles_stack_per_track() {
        let items: Vec<Arc<Item>> = vec![
            Arc::new(Item::new("a", "A", 10, "Rulers")),
            Arc::new(Item::new("b", "B", 10, "Rulers")),
            Arc::new(Item::new("c", "C", 20, WORLD_HISTORY)),
        ];
        let groups = group_by_year_and_track(&items);
        let filter = CategoryFilter::from_items(items.iter().map(|i| i.as_ref()));
        let rects =
            compute_minimap_rectangles(&groups, &filter, 200.0, 150.0, MinimapLayout::default());
        assert_eq!(rects.len(), 3);

        // Year 10, Tamil: two items on rows 4 and 5, nudged up.
        let row_height = 27.5 / 6.0;
        assert!((rects[0].rect.top() - (20.0 + 4.0 * row_height - 10.0)).abs() < EPS);
        assert!((rects[1].rect.top() - (20.0 + 5.0 * row_height - 10.0)).abs() < EPS);
        // Year 20 is the second column, halfway across the 146px span.
        assert!((rects[2].rect.left() - (2.0 + 0.5 * 146.0)).abs() < EPS);
        assert!((rects[2].rect.top() - (20.0 + 5.0 * row_height + 10.0)).abs() < EPS);
        assert_eq!(rects[2].title, "C");
        assert_eq!(rects[0].color_index, Some(0));
        assert_eq!(rects[2].color_index, Some(1));
    }

    #[test]
    fn minimap_rectangles_empty_for_no_groups() {
        let rects = compute_minimap_rectangles(
            &[],
            &CategoryFilter::default(),
            200.0,
            150.0,
            MinimapLayout::default(),
        );
        assert!(rects.is_empty());
    }
}
