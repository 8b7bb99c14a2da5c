//! SVG rendering of recorded pages.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::{DrawOp, Error, Font, FontFamily, LineCap, Page, Result};

/// Drawing state carried between operations.
struct Style {
    line_width: f64,
    cap: LineCap,
    font: Font,
}

/// Render a page as a standalone SVG document.
pub(crate) fn render_page(page: &Page) -> Result<String> {
    let size = page.size();
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| Error::Svg(e.to_string()))?;

    let width = format!("{}in", size.width);
    let height = format!("{}in", size.height);
    let view_box = format!("0 0 {} {}", size.width, size.height);
    let mut root = BytesStart::new("svg");
    root.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
    root.push_attribute(("width", width.as_str()));
    root.push_attribute(("height", height.as_str()));
    root.push_attribute(("viewBox", view_box.as_str()));
    writer
        .write_event(Event::Start(root))
        .map_err(|e| Error::Svg(e.to_string()))?;

    let mut style = Style {
        line_width: 0.01,
        cap: LineCap::Butt,
        font: Font::default(),
    };

    for op in page.ops() {
        match op {
            DrawOp::LineWidth(width) => style.line_width = *width,
            DrawOp::LineCap(cap) => style.cap = *cap,
            DrawOp::Font(font) => style.font = *font,
            DrawOp::Line { x1, y1, x2, y2 } => {
                let mut elem = BytesStart::new("line");
                push_num(&mut elem, "x1", *x1);
                push_num(&mut elem, "y1", *y1);
                push_num(&mut elem, "x2", *x2);
                push_num(&mut elem, "y2", *y2);
                push_stroke(&mut elem, &style);
                write_empty(&mut writer, elem)?;
            }
            DrawOp::Text { x, y, text } => {
                write_text(&mut writer, &style.font, *x, *y, 0.0, text)?;
            }
            DrawOp::RotatedText {
                x,
                y,
                degrees,
                text,
            } => {
                write_text(&mut writer, &style.font, *x, *y, *degrees, text)?;
            }
            DrawOp::Circle { x, y, r, filled } => {
                let mut elem = BytesStart::new("circle");
                push_num(&mut elem, "cx", *x);
                push_num(&mut elem, "cy", *y);
                push_num(&mut elem, "r", *r);
                if *filled {
                    elem.push_attribute(("fill", "black"));
                } else {
                    push_stroke(&mut elem, &style);
                }
                write_empty(&mut writer, elem)?;
            }
            DrawOp::Curve {
                x0,
                y0,
                cx,
                cy,
                x1,
                y1,
            } => {
                let d = format!("M {} {} Q {} {} {} {}", x0, y0, cx, cy, x1, y1);
                let mut elem = BytesStart::new("path");
                elem.push_attribute(("d", d.as_str()));
                push_stroke(&mut elem, &style);
                write_empty(&mut writer, elem)?;
            }
            DrawOp::Rect { x, y, w, h } => {
                let mut elem = BytesStart::new("rect");
                push_num(&mut elem, "x", *x);
                push_num(&mut elem, "y", *y);
                push_num(&mut elem, "width", *w);
                push_num(&mut elem, "height", *h);
                push_stroke(&mut elem, &style);
                write_empty(&mut writer, elem)?;
            }
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new("svg")))
        .map_err(|e| Error::Svg(e.to_string()))?;

    String::from_utf8(writer.into_inner()).map_err(|e| Error::Svg(e.to_string()))
}

fn push_num(elem: &mut BytesStart, key: &str, value: f64) {
    let value = format!("{:.4}", value);
    elem.push_attribute((key, value.as_str()));
}

fn push_stroke(elem: &mut BytesStart, style: &Style) {
    elem.push_attribute(("fill", "none"));
    elem.push_attribute(("stroke", "black"));
    push_num(elem, "stroke-width", style.line_width);
    let cap = match style.cap {
        LineCap::Butt => "butt",
        LineCap::Round => "round",
        LineCap::Square => "square",
    };
    elem.push_attribute(("stroke-linecap", cap));
}

fn write_empty(writer: &mut Writer<Vec<u8>>, elem: BytesStart) -> Result<()> {
    writer
        .write_event(Event::Empty(elem))
        .map_err(|e| Error::Svg(e.to_string()))
}

fn write_text(
    writer: &mut Writer<Vec<u8>>,
    font: &Font,
    x: f64,
    y: f64,
    degrees: f64,
    text: &str,
) -> Result<()> {
    let family = match font.family {
        FontFamily::Courier => "Courier, monospace",
        FontFamily::Times => "Times, serif",
    };

    let mut elem = BytesStart::new("text");
    push_num(&mut elem, "x", x);
    push_num(&mut elem, "y", y);
    elem.push_attribute(("font-family", family));
    // Font sizes are in points, the viewBox is in inches.
    push_num(&mut elem, "font-size", font.size_pt / 72.0);
    if font.bold {
        elem.push_attribute(("font-weight", "bold"));
    }
    if degrees != 0.0 {
        // SVG rotates clockwise with y pointing down.
        let transform = format!("rotate({:.4} {:.4} {:.4})", -degrees, x, y);
        elem.push_attribute(("transform", transform.as_str()));
    }
    elem.push_attribute(("xml:space", "preserve"));

    writer
        .write_event(Event::Start(elem))
        .map_err(|e| Error::Svg(e.to_string()))?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(|e| Error::Svg(e.to_string()))?;
    writer
        .write_event(Event::End(BytesEnd::new("text")))
        .map_err(|e| Error::Svg(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Canvas, PageSize};

    #[test]
    fn test_render_page() {
        let mut page = Page::new(PageSize::LETTER);
        page.set_line_width(0.002);
        page.line(0.0, 0.0, 1.0, 1.0);
        page.set_font(Font::courier_bold(14.0));
        page.text(1.0, 2.0, "A & B");
        page.text_rotated(3.0, 3.0, 90.0, "2024-01-01");

        let svg = render_page(&page).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("viewBox=\"0 0 8.5 11\""));
        assert!(svg.contains("<line"));
        assert!(svg.contains("stroke-width=\"0.0020\""));
        assert!(svg.contains("A &amp; B"));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("rotate(-90.0000 3.0000 3.0000)"));
    }
}
