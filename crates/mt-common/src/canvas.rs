//! The drawing surface.
//!
//! Sheet generators draw through the [`Canvas`] trait so the same layout code
//! can run against a [`NullCanvas`] (to measure how much room an element
//! takes) and against a recording [`Page`] (to produce output).

use crate::PageSize;

/// Font families available to every output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    Courier,
    Times,
}

/// A font selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub family: FontFamily,
    pub bold: bool,
    /// Size in points.
    pub size_pt: f64,
}

impl Font {
    /// Regular Courier at the given size.
    #[inline]
    pub const fn courier(size_pt: f64) -> Self {
        Self {
            family: FontFamily::Courier,
            bold: false,
            size_pt,
        }
    }

    /// Bold Courier at the given size.
    #[inline]
    pub const fn courier_bold(size_pt: f64) -> Self {
        Self {
            family: FontFamily::Courier,
            bold: true,
            size_pt,
        }
    }

    /// Bold Times at the given size.
    #[inline]
    pub const fn times_bold(size_pt: f64) -> Self {
        Self {
            family: FontFamily::Times,
            bold: true,
            size_pt,
        }
    }

    /// Same family and weight at a different size.
    #[inline]
    pub fn with_size(self, size_pt: f64) -> Self {
        Self { size_pt, ..self }
    }

    /// Same family and size, bold or not.
    #[inline]
    pub fn with_bold(self, bold: bool) -> Self {
        Self { bold, ..self }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::courier(12.0)
    }
}

/// Line end style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// A single recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    LineWidth(f64),
    LineCap(LineCap),
    Font(Font),
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    /// Text with its baseline starting at `(x, y)`.
    Text {
        x: f64,
        y: f64,
        text: String,
    },
    /// Text rotated counter-clockwise by `degrees` about `(x, y)`.
    RotatedText {
        x: f64,
        y: f64,
        degrees: f64,
        text: String,
    },
    Circle {
        x: f64,
        y: f64,
        r: f64,
        filled: bool,
    },
    /// Quadratic Bézier from `(x0, y0)` through control `(cx, cy)` to `(x1, y1)`.
    Curve {
        x0: f64,
        y0: f64,
        cx: f64,
        cy: f64,
        x1: f64,
        y1: f64,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
}

/// A drawing surface measured in inches from the top-left corner.
pub trait Canvas {
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_font(&mut self, font: Font);
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    fn text(&mut self, x: f64, y: f64, text: &str);
    fn text_rotated(&mut self, x: f64, y: f64, degrees: f64, text: &str);
    fn circle(&mut self, x: f64, y: f64, r: f64, filled: bool);
    fn curve(&mut self, x0: f64, y0: f64, cx: f64, cy: f64, x1: f64, y1: f64);
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
}

/// A canvas that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn set_line_width(&mut self, _width: f64) {}
    fn set_line_cap(&mut self, _cap: LineCap) {}
    fn set_font(&mut self, _font: Font) {}
    fn line(&mut self, _x1: f64, _y1: f64, _x2: f64, _y2: f64) {}
    fn text(&mut self, _x: f64, _y: f64, _text: &str) {}
    fn text_rotated(&mut self, _x: f64, _y: f64, _degrees: f64, _text: &str) {}
    fn circle(&mut self, _x: f64, _y: f64, _r: f64, _filled: bool) {}
    fn curve(&mut self, _x0: f64, _y0: f64, _cx: f64, _cy: f64, _x1: f64, _y1: f64) {}
    fn rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {}
}

/// A page that records every operation drawn on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    size: PageSize,
    ops: Vec<DrawOp>,
}

impl Page {
    /// Create an empty page.
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    /// Page dimensions.
    #[inline]
    pub fn size(&self) -> PageSize {
        self.size
    }

    /// Recorded operations in drawing order.
    #[inline]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Iterate over the text of every text operation.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } | DrawOp::RotatedText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of line operations recorded.
    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }
}

impl Canvas for Page {
    fn set_line_width(&mut self, width: f64) {
        self.ops.push(DrawOp::LineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ops.push(DrawOp::LineCap(cap));
    }

    fn set_font(&mut self, font: Font) {
        self.ops.push(DrawOp::Font(font));
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ops.push(DrawOp::Line { x1, y1, x2, y2 });
    }

    fn text(&mut self, x: f64, y: f64, text: &str) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
        });
    }

    fn text_rotated(&mut self, x: f64, y: f64, degrees: f64, text: &str) {
        self.ops.push(DrawOp::RotatedText {
            x,
            y,
            degrees,
            text: text.to_string(),
        });
    }

    fn circle(&mut self, x: f64, y: f64, r: f64, filled: bool) {
        self.ops.push(DrawOp::Circle { x, y, r, filled });
    }

    fn curve(&mut self, x0: f64, y0: f64, cx: f64, cy: f64, x1: f64, y1: f64) {
        self.ops.push(DrawOp::Curve {
            x0,
            y0,
            cx,
            cy,
            x1,
            y1,
        });
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::Rect { x, y, w, h });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_records_in_order() {
        let mut page = Page::new(PageSize::LETTER);
        page.set_line_width(0.01);
        page.line(0.0, 0.0, 1.0, 1.0);
        page.text(1.0, 2.0, "hi");

        assert_eq!(page.ops().len(), 3);
        assert_eq!(page.ops()[0], DrawOp::LineWidth(0.01));
        assert_eq!(page.line_count(), 1);
        assert_eq!(page.texts().collect::<Vec<_>>(), vec!["hi"]);
    }

    #[test]
    fn test_font_builders() {
        let f = Font::courier(10.0).with_bold(true).with_size(12.0);
        assert_eq!(f, Font::courier_bold(12.0));
        assert_eq!(Font::times_bold(20.0).family, FontFamily::Times);
    }
}
