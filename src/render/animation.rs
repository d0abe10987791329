//! Transient per-item animation state: entrance fades and click feedback.
//!
//! Entries are keyed by item id. Entrance progress is dropped when an item is
//! culled, so every time an item scrolls back into view its entrance replays.
//! Culling is a sweep: each frame is bracketed by `begin_frame`/`end_frame`
//! and entries not advanced in between are removed.

use std::collections::HashMap;

use egui::{Pos2, Vec2};

/// Duration of the click ripple and pop, in milliseconds.
pub const CLICK_EFFECT_MS: f64 = 300.0;

/// Horizontal slide distance at progress 0.
const ENTRANCE_SLIDE_X: f32 = 20.0;
/// Vertical drop distance at progress 0 (negative: starts above).
const ENTRANCE_DROP_Y: f32 = -30.0;
const RIPPLE_START_ALPHA: f32 = 0.3;

/// Per-frame entrance transform of a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntranceTransform {
    /// Opacity; equal to the entrance progress.
    pub alpha: f32,
    pub scale: f32,
    pub offset: Vec2,
}

impl EntranceTransform {
    pub fn at(progress: f32) -> Self {
        let p = progress.clamp(0.0, 1.0);
        Self {
            alpha: p,
            scale: 0.5 + 0.5 * p,
            offset: Vec2::new((1.0 - p) * ENTRANCE_SLIDE_X, (1.0 - p) * ENTRANCE_DROP_Y),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ClickState {
    started_ms: f64,
    local: Pos2,
}

/// Click feedback for one card at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEffect {
    /// Elapsed fraction of the effect, 0..=1.
    pub progress: f32,
    /// Scale multiplier peaking at the midpoint.
    pub pop_scale: f32,
    /// Ripple centre relative to the card's top-left corner.
    pub center: Pos2,
    pub ripple_alpha: f32,
}

impl ClickEffect {
    fn compute(progress: f32, center: Pos2) -> Self {
        let p = progress.clamp(0.0, 1.0);
        let pop_scale = 1.0 + 0.1 * (1.0 - (p - 0.5).abs() * 2.5);
        Self {
            progress: p,
            pop_scale,
            center,
            ripple_alpha: RIPPLE_START_ALPHA * (1.0 - p),
        }
    }

    /// Ripple radius on a card of `card_size` as drawn this frame; reaches
    /// the farthest corner when the effect ends.
    pub fn ripple_radius(&self, card_size: Vec2) -> f32 {
        farthest_corner(self.center, card_size) * self.progress
    }
}

/// Distance from `point` to the farthest corner of a `size` box at the origin.
fn farthest_corner(point: Pos2, size: Vec2) -> f32 {
    let dx = point.x.max(size.x - point.x);
    let dy = point.y.max(size.y - point.y);
    (dx * dx + dy * dy).sqrt()
}

#[derive(Debug, Clone, Copy)]
struct Entrance {
    progress: f32,
    /// Frame generation in which this entry was last advanced.
    seen: u64,
}

/// Owned by the renderer; mutated only from inside a frame or a pointer handler.
#[derive(Debug, Clone)]
pub struct AnimationStore {
    speed: f32,
    generation: u64,
    progress: HashMap<String, Entrance>,
    clicks: HashMap<String, ClickState>,
}

impl AnimationStore {
    pub fn new(speed: f32) -> Self {
        Self {
            speed: speed.max(0.0),
            generation: 0,
            progress: HashMap::new(),
            clicks: HashMap::new(),
        }
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    /// Step the entrance animation of `id` by one frame.
    pub fn advance(&mut self, id: &str) -> EntranceTransform {
        let seen = self.generation;
        let progress = match self.progress.get_mut(id) {
            Some(e) => {
                e.progress = (e.progress + self.speed).min(1.0);
                e.seen = seen;
                e.progress
            }
            None => {
                let progress = self.speed.min(1.0);
                self.progress
                    .insert(id.to_string(), Entrance { progress, seen });
                progress
            }
        };
        EntranceTransform::at(progress)
    }

    #[cfg(test)]
    pub fn progress(&self, id: &str) -> Option<f32> {
        self.progress.get(id).map(|e| e.progress)
    }

    /// Start a new frame generation.
    pub fn begin_frame(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Remove every entry not advanced since `begin_frame`, along with its
    /// click feedback. Returns the number of entrance entries removed.
    pub fn end_frame(&mut self) -> usize {
        let generation = self.generation;
        let before = self.progress.len();
        self.progress.retain(|_, e| e.seen == generation);
        let progress = &self.progress;
        self.clicks.retain(|id, _| progress.contains_key(id));
        before - self.progress.len()
    }

    /// Start click feedback at a point relative to the card's top-left corner.
    pub fn trigger_click(&mut self, id: &str, local_x: f32, local_y: f32, now_ms: f64) {
        self.clicks.insert(
            id.to_string(),
            ClickState {
                started_ms: now_ms,
                local: Pos2::new(local_x, local_y),
            },
        );
    }

    /// Current click feedback for `id`, removing it once it has run its course.
    pub fn click_effect(&mut self, id: &str, now_ms: f64) -> Option<ClickEffect> {
        let state = *self.clicks.get(id)?;
        let elapsed = now_ms - state.started_ms;
        if elapsed >= CLICK_EFFECT_MS {
            self.clicks.remove(id);
            return None;
        }
        let progress = (elapsed / CLICK_EFFECT_MS).max(0.0) as f32;
        Some(ClickEffect::compute(progress, state.local))
    }

    /// Remove every click effect that has expired by `now_ms`.
    pub fn prune_clicks(&mut self, now_ms: f64) {
        self.clicks
            .retain(|_, state| now_ms - state.started_ms < CLICK_EFFECT_MS);
    }

    /// Number of items with live entrance state.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.progress.len()
    }

    #[cfg(test)]
    pub fn active_clicks(&self) -> usize {
        self.clicks.len()
    }

    pub fn clear(&mut self) {
        self.progress.clear();
        self.clicks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn advance_accumulates_to_one() {
        let mut store = AnimationStore::new(0.04);
        for k in 1..=40 {
            let t = store.advance("a");
            let expected = (k as f32 * 0.04).min(1.0);
            assert!((t.alpha - expected).abs() < EPS, "frame {}", k);
            assert_eq!(store.progress("a"), Some(t.alpha));
            assert!((t.scale - (0.5 + 0.5 * t.alpha)).abs() < EPS);
        }
        assert_eq!(store.progress("a"), Some(1.0));
    }

    #[test]
    fn entrance_offsets_shrink_to_zero() {
        let start = EntranceTransform::at(0.0);
        assert_eq!(start.offset, Vec2::new(20.0, -30.0));
        assert_eq!(start.scale, 0.5);
        let done = EntranceTransform::at(1.0);
        assert_eq!(done.offset, Vec2::ZERO);
        assert_eq!(done.scale, 1.0);
    }

    #[test]
    fn swept_entry_restarts_entrance() {
        let mut store = AnimationStore::new(0.02);
        for _ in 0..30 {
            store.advance("a");
        }
        store.begin_frame();
        assert_eq!(store.end_frame(), 1);
        assert_eq!(store.progress("a"), None);
        let t = store.advance("a");
        assert!((t.alpha - 0.02).abs() < EPS);
    }

    #[test]
    fn items_animate_independently() {
        let mut store = AnimationStore::new(0.1);
        store.advance("a");
        store.advance("a");
        store.advance("b");
        assert!((store.progress("a").unwrap() - 0.2).abs() < EPS);
        assert!((store.progress("b").unwrap() - 0.1).abs() < EPS);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn end_frame_sweeps_untouched_entries() {
        let mut store = AnimationStore::new(0.1);
        store.begin_frame();
        store.advance("a");
        store.advance("b");
        store.trigger_click("b", 1.0, 1.0, 0.0);
        assert_eq!(store.end_frame(), 0);

        store.begin_frame();
        store.advance("a");
        assert_eq!(store.end_frame(), 1);
        assert!((store.progress("a").unwrap() - 0.2).abs() < EPS);
        assert_eq!(store.progress("b"), None);
        assert_eq!(store.active_clicks(), 0);
    }

    #[test]
    fn pop_peaks_at_midpoint() {
        let mut store = AnimationStore::new(0.02);
        store.trigger_click("a", 10.0, 10.0, 1000.0);
        let mid = store.click_effect("a", 1150.0).unwrap();
        assert!((mid.pop_scale - 1.1).abs() < EPS);
        let early = store.click_effect("a", 1030.0).unwrap();
        assert!(early.pop_scale < mid.pop_scale);
        let late = store.click_effect("a", 1270.0).unwrap();
        assert!(late.pop_scale < mid.pop_scale);
    }

    #[test]
    fn ripple_grows_to_farthest_corner_and_fades() {
        let mut store = AnimationStore::new(0.02);
        store.trigger_click("a", 0.0, 0.0, 0.0);
        let size = Vec2::new(30.0, 40.0);
        let start = store.click_effect("a", 0.0).unwrap();
        assert_eq!(start.ripple_radius(size), 0.0);
        assert!((start.ripple_alpha - 0.3).abs() < EPS);
        let near_end = store.click_effect("a", 297.0).unwrap();
        assert!((near_end.ripple_radius(size) - 50.0 * 0.99).abs() < 1e-2);
        // The radius follows the size the card is drawn at.
        let grown = near_end.ripple_radius(size * 2.0);
        assert!(grown > near_end.ripple_radius(size));
        assert!(near_end.ripple_alpha < 0.01);
    }

    #[test]
    fn click_effect_expires_after_duration() {
        let mut store = AnimationStore::new(0.02);
        store.trigger_click("a", 5.0, 5.0, 0.0);
        assert!(store.click_effect("a", 299.0).is_some());
        assert!(store.click_effect("a", 300.0).is_none());
        assert_eq!(store.active_clicks(), 0);
    }

    #[test]
    fn prune_drops_only_expired_clicks() {
        let mut store = AnimationStore::new(0.02);
        store.trigger_click("old", 0.0, 0.0, 0.0);
        store.trigger_click("new", 0.0, 0.0, 200.0);
        store.prune_clicks(350.0);
        assert_eq!(store.active_clicks(), 1);
        assert!(store.click_effect("new", 350.0).is_some());
    }
}
