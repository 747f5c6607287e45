//! Font size approximation
//!
//! The panel has a single fixed base font that can only be magnified by
//! whole steps. Continuous font sizes from the host are quantized to the
//! nearest step; the mapping is lossy and deterministic.

/// Font size one text-scale step corresponds to
pub const BASE_FONT_SIZE: f64 = 16.0;

/// Largest supported text scale
pub const MAX_TEXT_SCALE: u8 = 4;

/// Line spacing relative to the font size
pub const LINE_SPACING: f64 = 1.35;

/// Map a font size to an integer text scale: `round(size / 16)` in `[1, 4]`
///
/// Non-positive and non-finite sizes map to 1.
pub fn text_scale(font_size: f64) -> u8 {
    if !font_size.is_finite() || font_size <= 0.0 {
        return 1;
    }
    let steps = libm::round(font_size / BASE_FONT_SIZE);
    steps.clamp(1.0, MAX_TEXT_SCALE as f64) as u8
}

/// Vertical distance between consecutive lines of multi-line text
pub fn line_advance(font_size: f64) -> i32 {
    libm::trunc(font_size * LINE_SPACING) as i32
}
