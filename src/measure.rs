//! String Width Measurement
//!
//! The seam between the layout engine and platform font metrics.
//! Embedders supply a `WidthMeasurer` backed by their text stack; the
//! default `CellMeasurer` approximates proportional text with display
//! cells from `unicode-width`, which keeps measurement pure and
//! deterministic.

use unicode_width::UnicodeWidthStr;

/// Measured box size in layout points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Font metrics fed into measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Horizontal advance of one display cell
    pub cell_advance: f32,
    /// Line height of a single line of tag text
    pub line_height: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            cell_advance: 8.0,
            line_height: 18.0,
        }
    }
}

/// Width-measurement capability supplied by the platform rendering layer.
///
/// Implementations must be deterministic for identical inputs and must not
/// fail: unmeasurable input is reported as a zero-width size and the layout
/// engine clamps it up to the style's minimum box.
pub trait WidthMeasurer {
    /// Measure the rendered size of `text` in the given font
    fn measure(&self, text: &str, font: &FontMetrics) -> Size;
}

/// Default measurer: display-cell count times the per-cell advance
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasurer;

impl WidthMeasurer for CellMeasurer {
    fn measure(&self, text: &str, font: &FontMetrics) -> Size {
        let cells = UnicodeWidthStr::width(text);
        Size::new(cells as f32 * font.cell_advance, font.line_height)
    }
}

impl<M: WidthMeasurer + ?Sized> WidthMeasurer for &M {
    fn measure(&self, text: &str, font: &FontMetrics) -> Size {
        (**self).measure(text, font)
    }
}

impl<M: WidthMeasurer + ?Sized> WidthMeasurer for Box<M> {
    fn measure(&self, text: &str, font: &FontMetrics) -> Size {
        (**self).measure(text, font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_is_zero_cells() {
        let font = FontMetrics::default();
        let size = CellMeasurer.measure("", &font);
        assert_eq!(size.width, 0.0);
        assert_eq!(size.height, font.line_height);
    }

    #[test]
    fn test_ascii_width_is_linear() {
        let font = FontMetrics::default();
        let size = CellMeasurer.measure("rust", &font);
        assert_eq!(size.width, 4.0 * font.cell_advance);
    }

    #[test]
    fn test_wide_glyphs_take_two_cells() {
        let font = FontMetrics::default();
        let narrow = CellMeasurer.measure("ab", &font);
        let wide = CellMeasurer.measure("搜索", &font);
        assert_eq!(wide.width, 2.0 * narrow.width);
    }

    #[test]
    fn test_deterministic() {
        let font = FontMetrics::default();
        let a = CellMeasurer.measure("hello world", &font);
        let b = CellMeasurer.measure("hello world", &font);
        assert_eq!(a, b);
    }
}
