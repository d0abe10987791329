/// Narrowest viewport the layout is tuned for (typical phone).
pub const MIN_SCREEN_WIDTH: f32 = 320.0;
/// Widest viewport the layout is tuned for (typical desktop).
pub const MAX_SCREEN_WIDTH: f32 = 1920.0;
pub const MIN_SCALE: f32 = 0.8;
pub const MAX_SCALE: f32 = 1.2;

/// Responsive scale applied to every font size, card height, margin and gap.
///
/// The width is clamped to `[MIN_SCREEN_WIDTH, MAX_SCREEN_WIDTH]` and mapped
/// linearly onto `[MIN_SCALE, MAX_SCALE]`.
pub fn scale_factor(viewport_width: f32) -> f32 {
    let clamped = if viewport_width.is_nan() {
        MIN_SCREEN_WIDTH
    } else {
        viewport_width.clamp(MIN_SCREEN_WIDTH, MAX_SCREEN_WIDTH)
    };
    let ratio = (clamped - MIN_SCREEN_WIDTH) / (MAX_SCREEN_WIDTH - MIN_SCREEN_WIDTH);
    MIN_SCALE + (MAX_SCALE - MIN_SCALE) * ratio
}

/// Horizontal stride of one column.
pub fn effective_item_width(base_item_width: f32, scale: f32, offset: f32) -> f32 {
    base_item_width * scale + offset
}
