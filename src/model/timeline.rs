/// Manages the visible window onto the full timeline.
///
/// `scroll_x` is the target offset set by input handlers; `smooth_scroll_x`
/// is what the draw loop actually uses and eases toward the target.
#[derive(Debug, Clone, Default)]
pub struct TimelineViewport {
    /// Canvas width in pixels.
    pub width: f32,
    /// Canvas height in pixels.
    pub height: f32,
    /// Target scroll offset in pixels from the first column.
    pub scroll_x: f32,
    /// Eased scroll offset used for drawing.
    pub smooth_scroll_x: f32,
}

impl TimelineViewport {
    #[cfg(test)]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// True when there is nothing sensible to draw into.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Largest valid scroll offset for a timeline of `total_width` pixels.
    pub fn max_scroll(&self, total_width: f32) -> f32 {
        (total_width - self.width).max(0.0)
    }

    /// Clamp the target scroll into `[0, max_scroll]`.
    pub fn clamp_scroll(&mut self, total_width: f32) {
        let max = self.max_scroll(total_width);
        self.scroll_x = if self.scroll_x.is_finite() {
            self.scroll_x.clamp(0.0, max)
        } else {
            0.0
        };
    }

    /// Move the target scroll by `delta` pixels.
    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_x += delta;
    }

    /// Set the target scroll.
    pub fn scroll_to(&mut self, x: f32) {
        self.scroll_x = x;
    }

    /// Ease the drawn scroll toward the target by `factor`; snap when within
    /// `snap` pixels. Returns true while still moving.
    pub fn step_smoothing(&mut self, factor: f32, snap: f32) -> bool {
        let diff = self.scroll_x - self.smooth_scroll_x;
        if diff.abs() <= snap || !self.smooth_scroll_x.is_finite() {
            self.smooth_scroll_x = self.scroll_x;
            false
        } else {
            self.smooth_scroll_x += diff * factor.clamp(0.0, 1.0);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_scroll_in_range() {
        let mut vp = TimelineViewport::new(800.0, 600.0);
        vp.scroll_to(-40.0);
        vp.clamp_scroll(3000.0);
        assert_eq!(vp.scroll_x, 0.0);
        vp.scroll_to(5000.0);
        vp.clamp_scroll(3000.0);
        assert_eq!(vp.scroll_x, 2200.0);
    }

    #[test]
    fn short_timeline_cannot_scroll() {
        let mut vp = TimelineViewport::new(800.0, 600.0);
        vp.scroll_to(100.0);
        vp.clamp_scroll(500.0);
        assert_eq!(vp.scroll_x, 0.0);
        assert_eq!(vp.max_scroll(500.0), 0.0);
    }

    #[test]
    fn smoothing_converges_then_snaps() {
        let mut vp = TimelineViewport::new(800.0, 600.0);
        vp.scroll_to(100.0);
        assert!(vp.step_smoothing(0.1, 0.5));
        assert!((vp.smooth_scroll_x - 10.0).abs() < 1e-4);

        let mut frames = 1;
        while vp.step_smoothing(0.1, 0.5) {
            frames += 1;
            assert!(frames < 200, "smoothing never settled");
        }
        assert_eq!(vp.smooth_scroll_x, 100.0);
    }

    #[test]
    fn zero_sized_viewport_is_degenerate() {
        assert!(TimelineViewport::new(0.0, 400.0).is_degenerate());
        assert!(!TimelineViewport::new(10.0, 10.0).is_degenerate());
    }
}
