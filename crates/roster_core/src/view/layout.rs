//! Scrollable table viewport sizing.
//!
//! Recomputed on load, resize and orientation change. Pure and idempotent.

/// Header height assumed when the host cannot measure it.
pub const DEFAULT_HEADER_HEIGHT: f64 = 120.0;
/// Form section height assumed when the host cannot measure it.
pub const DEFAULT_FORM_HEIGHT: f64 = 320.0;
/// Space kept for margins and padding.
pub const RESERVED_HEIGHT: f64 = 140.0;
pub const MIN_TABLE_HEIGHT: f64 = 150.0;
pub const MAX_TABLE_HEIGHT: f64 = 900.0;

/// Returns the max height for the table container, in pixels.
pub fn table_max_height(
    viewport_height: f64,
    header_height: Option<f64>,
    form_height: Option<f64>,
) -> f64 {
    let header = header_height.unwrap_or(DEFAULT_HEADER_HEIGHT);
    let form = form_height.unwrap_or(DEFAULT_FORM_HEIGHT);
    let target = viewport_height - (header + form + RESERVED_HEIGHT);
    if target.is_nan() {
        return MIN_TABLE_HEIGHT;
    }
    target.clamp(MIN_TABLE_HEIGHT, MAX_TABLE_HEIGHT)
}
