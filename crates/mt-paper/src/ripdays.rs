//! Rip-off daily calendars.
//!
//! Nine days are printed to a Letter sheet on a 3 x 3 grid. Cell `(cx, cy)`
//! of sheet `p` holds day `p + pages * (cx + 3 * cy)`, so once the stack of
//! sheets is cut, each pile of cells reads as consecutive days.

use chrono::{Days, NaiveDate};
use mt_common::{Canvas, Document, Font, PageSize};

use crate::{Error, Result, DATE_FORMAT};

const GRID: usize = 3;
const CELLS_PER_PAGE: usize = GRID * GRID;
const MARK_LENGTH: f64 = 0.5;

/// Offset in days from the first date of cell `(cx, cy)` on sheet `page`.
pub fn day_offset(page: usize, pages: usize, cx: usize, cy: usize) -> usize {
    page + pages * (cx + GRID * cy)
}

/// Sheets needed for `days` days.
pub fn pages_for(days: usize) -> usize {
    days.div_ceil(CELLS_PER_PAGE)
}

/// A calendar covering `start` to `end` inclusive.
pub fn rip_days(start: NaiveDate, end: NaiveDate) -> Result<Document> {
    if end < start {
        return Err(Error::DateRange {
            start: start.format(DATE_FORMAT).to_string(),
            end: end.format(DATE_FORMAT).to_string(),
        });
    }

    let days = (end - start).num_days() as usize + 1;
    let pages = pages_for(days);
    log::debug!("{} days over {} sheets", days, pages);

    let size = PageSize::LETTER;
    let cell_w = size.width / GRID as f64;
    let cell_h = size.height / GRID as f64;

    let mut doc = Document::new();
    for p in 0..pages {
        let page = doc.add_page(size);
        draw_cut_marks(page, size);

        for cy in 0..GRID {
            for cx in 0..GRID {
                let offset = day_offset(p, pages, cx, cy);
                if offset >= days {
                    continue;
                }
                let Some(date) = start.checked_add_days(Days::new(offset as u64)) else {
                    continue;
                };

                let x = cx as f64 * cell_w;
                let y = cy as f64 * cell_h;
                page.set_font(Font::times_bold(20.0));
                page.text(x + 0.3, y + 0.6, &date.format("%A").to_string());
                page.set_font(Font::courier_bold(12.0));
                page.text(x + 0.4, y + 0.8, &date.format("%B %-d").to_string());
                page.set_font(Font::courier_bold(7.0));
                page.text(x + 2.0, y + 0.5, &date.format(DATE_FORMAT).to_string());
            }
        }
    }

    Ok(doc)
}

/// Short marks at the page edges and crosses at the inner corners to cut
/// along.
fn draw_cut_marks(canvas: &mut dyn Canvas, size: PageSize) {
    let w = size.width;
    let h = size.height;
    for i in 1..GRID {
        let x = i as f64 * w / GRID as f64;
        let y = i as f64 * h / GRID as f64;

        canvas.line(0.0, y, MARK_LENGTH, y);
        canvas.line(w - MARK_LENGTH, y, w, y);
        canvas.line(x, 0.0, x, MARK_LENGTH);
        canvas.line(x, h - MARK_LENGTH, x, h);

        for j in 1..GRID {
            let cx = j as f64 * w / GRID as f64;
            canvas.line(cx - MARK_LENGTH, y, cx + MARK_LENGTH, y);
            canvas.line(cx, y - MARK_LENGTH, cx, y + MARK_LENGTH);
        }
    }
}
