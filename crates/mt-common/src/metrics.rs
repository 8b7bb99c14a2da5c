//! Font metrics.
//!
//! The height conversions are empirical: they were tuned by eye so that
//! text lines up with hand-drawn elements, and deliberately do not use the
//! typographic 72 points per inch.

use crate::{Font, FontFamily};

/// Points per inch of rendered glyph height.
pub const PT_TO_HEIGHT: f64 = 100.0;

/// Ratio of a Courier glyph's width to its height.
pub const WIDTH_TO_HEIGHT: f64 = 0.82;

/// Courier advance width as a fraction of the em size.
const COURIER_ADVANCE: f64 = 0.6;

/// Average Times advance width as a fraction of the em size.
const TIMES_ADVANCE: f64 = 0.5;

/// Font size in points that yields glyphs of the given height.
#[inline]
pub fn font_pt(height_inches: f64) -> f64 {
    height_inches * PT_TO_HEIGHT
}

/// Glyph height in inches of a font at the given size.
#[inline]
pub fn font_height(font_pt: f64) -> f64 {
    font_pt / PT_TO_HEIGHT
}

/// Courier glyph width for a glyph height.
#[inline]
pub fn courier_width_from_height(height: f64) -> f64 {
    WIDTH_TO_HEIGHT * height
}

/// Courier glyph height for a glyph width.
#[inline]
pub fn courier_height_from_width(width: f64) -> f64 {
    width / WIDTH_TO_HEIGHT
}

/// Typeset width of `text` in inches.
///
/// Exact for Courier; an average-advance estimate for Times.
pub fn string_width(font: &Font, text: &str) -> f64 {
    let advance = match font.family {
        FontFamily::Courier => COURIER_ADVANCE,
        FontFamily::Times => TIMES_ADVANCE,
    };
    text.chars().count() as f64 * advance * font.size_pt / 72.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_round_trip() {
        assert!((font_height(font_pt(0.3)) - 0.3).abs() < 1e-12);
        assert_eq!(font_height(12.0), 0.12);
    }

    #[test]
    fn test_width_height() {
        let h = 0.5;
        let w = courier_width_from_height(h);
        assert!((w - 0.41).abs() < 1e-12);
        assert!((courier_height_from_width(w) - h).abs() < 1e-12);
    }

    #[test]
    fn test_string_width() {
        // 12pt Courier: 0.1 inch per character
        let w = string_width(&Font::courier(12.0), "abcde");
        assert!((w - 0.5).abs() < 1e-12);
        assert_eq!(string_width(&Font::courier(12.0), ""), 0.0);
    }
}
