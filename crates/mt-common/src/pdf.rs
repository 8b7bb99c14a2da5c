//! PDF rendering of recorded pages.
//!
//! Every page's content stream starts with a transform from inches with a
//! top-left origin into PDF user space, so recorded coordinates and line
//! widths are written unchanged. Text is un-flipped through its text matrix.

use pdf_writer::types::LineCapStyle;
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use crate::{DrawOp, Font, FontFamily, LineCap, Page};

const PT_PER_INCH: f64 = 72.0;

/// Cubic Bézier handle length for a quarter circle.
const KAPPA: f64 = 0.552_284_749_8;

/// Resource name and base-14 font name, indexed by [`font_index`].
const FONTS: [(&[u8], &[u8]); 4] = [
    (b"F1", b"Courier"),
    (b"F2", b"Courier-Bold"),
    (b"F3", b"Times-Roman"),
    (b"F4", b"Times-Bold"),
];

fn font_index(font: &Font) -> usize {
    match (font.family, font.bold) {
        (FontFamily::Courier, false) => 0,
        (FontFamily::Courier, true) => 1,
        (FontFamily::Times, false) => 2,
        (FontFamily::Times, true) => 3,
    }
}

/// Render pages into a complete PDF file.
pub(crate) fn render(pages: &[Page]) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let tree_id = alloc.bump();
    let font_ids: Vec<Ref> = FONTS.iter().map(|_| alloc.bump()).collect();
    let page_ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (alloc.bump(), alloc.bump())).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(pages.len() as i32);

    for ((_, base_font), id) in FONTS.iter().zip(&font_ids) {
        pdf.type1_font(*id)
            .base_font(Name(base_font))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    for (page, (page_id, content_id)) in pages.iter().zip(&page_ids) {
        let size = page.size();
        let width = (size.width * PT_PER_INCH) as f32;
        let height = (size.height * PT_PER_INCH) as f32;

        let mut writer = pdf.page(*page_id);
        writer.media_box(Rect::new(0.0, 0.0, width, height));
        writer.parent(tree_id);
        writer.contents(*content_id);
        {
            let mut resources = writer.resources();
            let mut fonts = resources.fonts();
            for ((name, _), id) in FONTS.iter().zip(&font_ids) {
                fonts.pair(Name(name), *id);
            }
            fonts.finish();
            resources.finish();
        }
        writer.finish();

        let content = encode_page(page, height);
        pdf.stream(*content_id, &content);
    }

    pdf.finish()
}

/// Encode one page's operations as a content stream.
fn encode_page(page: &Page, height_pt: f32) -> Vec<u8> {
    let mut content = Content::new();
    content.transform([
        PT_PER_INCH as f32,
        0.0,
        0.0,
        -PT_PER_INCH as f32,
        0.0,
        height_pt,
    ]);

    let mut font = Font::default();
    for op in page.ops() {
        match op {
            DrawOp::LineWidth(width) => {
                content.set_line_width(*width as f32);
            }
            DrawOp::LineCap(cap) => {
                content.set_line_cap(match cap {
                    LineCap::Butt => LineCapStyle::ButtCap,
                    LineCap::Round => LineCapStyle::RoundCap,
                    LineCap::Square => LineCapStyle::ProjectingSquareCap,
                });
            }
            DrawOp::Font(f) => font = *f,
            DrawOp::Line { x1, y1, x2, y2 } => {
                content.move_to(*x1 as f32, *y1 as f32);
                content.line_to(*x2 as f32, *y2 as f32);
                content.stroke();
            }
            DrawOp::Text { x, y, text } => show_text(&mut content, &font, *x, *y, 0.0, text),
            DrawOp::RotatedText {
                x,
                y,
                degrees,
                text,
            } => show_text(&mut content, &font, *x, *y, *degrees, text),
            DrawOp::Circle { x, y, r, filled } => {
                circle_path(&mut content, *x, *y, *r);
                if *filled {
                    content.fill_nonzero();
                } else {
                    content.stroke();
                }
            }
            DrawOp::Curve {
                x0,
                y0,
                cx,
                cy,
                x1,
                y1,
            } => {
                // Lift the quadratic to a cubic with the same shape.
                let c1 = (x0 + 2.0 / 3.0 * (cx - x0), y0 + 2.0 / 3.0 * (cy - y0));
                let c2 = (x1 + 2.0 / 3.0 * (cx - x1), y1 + 2.0 / 3.0 * (cy - y1));
                content.move_to(*x0 as f32, *y0 as f32);
                content.cubic_to(
                    c1.0 as f32,
                    c1.1 as f32,
                    c2.0 as f32,
                    c2.1 as f32,
                    *x1 as f32,
                    *y1 as f32,
                );
                content.stroke();
            }
            DrawOp::Rect { x, y, w, h } => {
                content.rect(*x as f32, *y as f32, *w as f32, *h as f32);
                content.stroke();
            }
        }
    }

    content.finish()
}

fn show_text(content: &mut Content, font: &Font, x: f64, y: f64, degrees: f64, text: &str) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (name, _) = FONTS[font_index(font)];

    content.begin_text();
    content.set_font(Name(name), (font.size_pt / PT_PER_INCH) as f32);
    // The page transform flips y, so the text matrix flips it back.
    content.set_text_matrix([
        cos as f32,
        -sin as f32,
        -sin as f32,
        -cos as f32,
        x as f32,
        y as f32,
    ]);
    content.show(Str(&encode_win_ansi(text)));
    content.end_text();
}

fn circle_path(content: &mut Content, x: f64, y: f64, r: f64) {
    let k = r * KAPPA;
    content.move_to((x + r) as f32, y as f32);
    content.cubic_to(
        (x + r) as f32,
        (y + k) as f32,
        (x + k) as f32,
        (y + r) as f32,
        x as f32,
        (y + r) as f32,
    );
    content.cubic_to(
        (x - k) as f32,
        (y + r) as f32,
        (x - r) as f32,
        (y + k) as f32,
        (x - r) as f32,
        y as f32,
    );
    content.cubic_to(
        (x - r) as f32,
        (y - k) as f32,
        (x - k) as f32,
        (y - r) as f32,
        x as f32,
        (y - r) as f32,
    );
    content.cubic_to(
        (x + k) as f32,
        (y - r) as f32,
        (x + r) as f32,
        (y - k) as f32,
        (x + r) as f32,
        y as f32,
    );
    content.close_path();
}

/// Encode text for the standard fonts; characters outside Latin-1 become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Canvas, PageSize};

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Am7"), b"Am7".to_vec());
        assert_eq!(encode_win_ansi("é"), vec![0xE9]);
        assert_eq!(encode_win_ansi("♪"), b"?".to_vec());
    }

    #[test]
    fn test_font_index() {
        assert_eq!(FONTS[font_index(&Font::courier_bold(10.0))].1, b"Courier-Bold");
        assert_eq!(FONTS[font_index(&Font::times_bold(10.0))].1, b"Times-Bold");
    }

    #[test]
    fn test_render_structure() {
        let mut page = Page::new(PageSize::LETTER);
        page.set_font(Font::courier(12.0));
        page.text(1.0, 1.0, "DATE:");
        page.circle(2.0, 2.0, 0.1, true);
        page.curve(0.0, 0.0, 0.5, 1.0, 1.0, 0.0);

        let bytes = render(&[page.clone(), page]);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-"));
        assert!(text.contains("/Courier"));
        assert!(text.contains("/Count 2"));
    }
}
