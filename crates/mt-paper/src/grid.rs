//! Grid paper.

use mt_common::{Canvas, Document, PageSize};

use crate::{Error, Result};

/// Grid paper settings, all in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOptions {
    /// Smallest margin allowed on any side.
    pub margin: f64,
    /// Side length of one cell.
    pub side: f64,
    pub line_width: f64,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            margin: 0.4,
            side: 0.2,
            line_width: 0.002,
        }
    }
}

/// Cells of `side` that fit in `length`, tolerating float error in
/// lengths that divide exactly.
fn whole_cells(length: f64, side: f64) -> usize {
    (length / side + 1e-9).floor() as usize
}

/// The whole cells that fit on a page, centred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub cells_wide: usize,
    pub cells_high: usize,
    pub x_min: f64,
    pub y_min: f64,
    pub side: f64,
}

impl Grid {
    /// Count the cells that fit within the margins and re-centre them.
    pub fn fit(opts: &GridOptions, size: PageSize) -> Result<Self> {
        if opts.side <= 0.0 {
            return Err(Error::BadGrid(format!("cell side {} must be positive", opts.side)));
        }

        let usable_w = size.width - 2.0 * opts.margin;
        let usable_h = size.height - 2.0 * opts.margin;
        if usable_w < opts.side || usable_h < opts.side {
            return Err(Error::BadGrid(format!(
                "a margin of {} leaves no room for a {} cell",
                opts.margin, opts.side
            )));
        }

        let cells_wide = whole_cells(usable_w, opts.side);
        let cells_high = whole_cells(usable_h, opts.side);
        Ok(Self {
            cells_wide,
            cells_high,
            x_min: (size.width - cells_wide as f64 * opts.side) / 2.0,
            y_min: (size.height - cells_high as f64 * opts.side) / 2.0,
            side: opts.side,
        })
    }

    pub fn x_max(&self) -> f64 {
        self.x_min + self.cells_wide as f64 * self.side
    }

    pub fn y_max(&self) -> f64 {
        self.y_min + self.cells_high as f64 * self.side
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for i in 0..=self.cells_wide {
            let x = self.x_min + i as f64 * self.side;
            canvas.line(x, self.y_min, x, self.y_max());
        }
        for j in 0..=self.cells_high {
            let y = self.y_min + j as f64 * self.side;
            canvas.line(self.x_min, y, self.x_max(), y);
        }
    }
}

/// A Letter page of grid paper.
pub fn grid_paper(opts: &GridOptions) -> Result<Document> {
    let size = PageSize::LETTER;
    let grid = Grid::fit(opts, size)?;
    log::debug!("grid of {} x {} cells", grid.cells_wide, grid.cells_high);

    let mut doc = Document::new();
    let page = doc.add_page(size);
    page.set_line_width(opts.line_width);
    grid.draw(page);
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_common::DrawOp;

    #[test]
    fn test_fit_defaults() {
        let grid = Grid::fit(&GridOptions::default(), PageSize::LETTER).unwrap();
        // 7.7 / 0.2 and 10.2 / 0.2
        assert_eq!(grid.cells_wide, 38);
        assert_eq!(grid.cells_high, 51);
        assert!((grid.x_min - 0.45).abs() < 1e-9);
        assert!((grid.y_min - 0.4).abs() < 1e-9);
        assert!((grid.x_max() - (8.5 - 0.45)).abs() < 1e-9);
    }

    #[test]
    fn test_fit_errors() {
        let opts = GridOptions {
            side: 0.0,
            ..GridOptions::default()
        };
        assert!(matches!(Grid::fit(&opts, PageSize::LETTER), Err(Error::BadGrid(_))));

        let opts = GridOptions {
            margin: 4.5,
            ..GridOptions::default()
        };
        assert!(matches!(Grid::fit(&opts, PageSize::LETTER), Err(Error::BadGrid(_))));
    }

    #[test]
    fn test_grid_paper() {
        let doc = grid_paper(&GridOptions::default()).unwrap();
        let page = &doc.pages()[0];
        assert_eq!(page.line_count(), 39 + 52);
        assert_eq!(page.ops()[0], DrawOp::LineWidth(0.002));
    }
}
