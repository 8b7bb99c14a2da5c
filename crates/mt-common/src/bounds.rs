//! Page geometry.
//!
//! All coordinates are in inches with the origin at the top-left corner of
//! the page, growing right and down.

/// A rectangular region of a page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Bounds {
    /// Create new bounds.
    #[inline]
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Width of the region.
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the region.
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Copy with a new top edge.
    #[inline]
    pub fn with_top(self, top: f64) -> Self {
        Self { top, ..self }
    }

    /// Copy with a new left edge.
    #[inline]
    pub fn with_left(self, left: f64) -> Self {
        Self { left, ..self }
    }

    /// Copy with a new bottom edge.
    #[inline]
    pub fn with_bottom(self, bottom: f64) -> Self {
        Self { bottom, ..self }
    }

    /// Copy with a new right edge.
    #[inline]
    pub fn with_right(self, right: f64) -> Self {
        Self { right, ..self }
    }

    /// Split into `count` equal-width columns sharing the top and bottom edges.
    ///
    /// Returns an empty vector when `count` is zero.
    pub fn split_columns(&self, count: usize) -> Vec<Bounds> {
        if count == 0 {
            return Vec::new();
        }

        let width = self.width() / count as f64;
        (0..count)
            .map(|i| Bounds {
                top: self.top,
                bottom: self.bottom,
                left: self.left + i as f64 * width,
                right: self.left + (i + 1) as f64 * width,
            })
            .collect()
    }
}

/// Physical page dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// US Letter, portrait.
    pub const LETTER: Self = Self {
        width: 8.5,
        height: 11.0,
    };

    /// US Letter, landscape.
    pub const LETTER_LANDSCAPE: Self = Self {
        width: 11.0,
        height: 8.5,
    };

    /// The whole page as bounds.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.height, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let b = Bounds::new(1.0, 0.5, 11.0, 8.5);
        assert_eq!(b.width(), 8.0);
        assert_eq!(b.height(), 10.0);
    }

    #[test]
    fn test_split_columns() {
        let b = Bounds::new(1.0, 0.0, 11.0, 8.0);
        let cols = b.split_columns(2);
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0], Bounds::new(1.0, 0.0, 11.0, 4.0));
        assert_eq!(cols[1], Bounds::new(1.0, 4.0, 11.0, 8.0));
        assert!(b.split_columns(0).is_empty());
    }

    #[test]
    fn test_page_bounds() {
        let b = PageSize::LETTER_LANDSCAPE.bounds();
        assert_eq!(b.width(), 11.0);
        assert_eq!(b.height(), 8.5);
    }
}
