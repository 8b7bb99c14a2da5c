//! Single-page songsheets built from an element expression.

use mt_common::{Bounds, Document, PageSize};

use crate::elements::Element;
use crate::header::Header;
use crate::style::{SheetStyle, PADDING};

/// Options for [`render_sheet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetOptions {
    /// Print a blank header above the elements.
    pub header: bool,
    pub mirror: bool,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            header: true,
            mirror: false,
        }
    }
}

/// Draw `element` over a Letter page, below the header if requested.
pub fn render_sheet(element: &Element, opts: &SheetOptions) -> Document {
    let size = PageSize::LETTER;
    let mut doc = Document::new();
    let page = doc.add_page(size);

    let mut bounds = Bounds::new(PADDING, PADDING, size.height, size.width);
    if opts.header {
        bounds = Header::default().draw(page, bounds, false);
    }

    let style = SheetStyle {
        mirror: opts.mirror,
    };
    element.draw(page, bounds, &style);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_common::DrawOp;

    #[test]
    fn test_render_sheet() {
        let element: Element = "ROW(CACTUS;LINES)".parse().unwrap();
        let doc = render_sheet(&element, &SheetOptions::default());
        assert_eq!(doc.page_count(), 1);

        let page = &doc.pages()[0];
        assert!(page.texts().any(|t| t == "TUNING:"));
        assert!(page.line_count() > 20);
    }

    #[test]
    fn test_render_sheet_without_header() {
        let element: Element = "LINES".parse().unwrap();
        let opts = SheetOptions {
            header: false,
            ..SheetOptions::default()
        };
        let doc = render_sheet(&element, &opts);
        let page = &doc.pages()[0];
        assert_eq!(page.texts().count(), 0);
        assert!(!page.ops().iter().any(|op| matches!(op, DrawOp::Rect { .. })));
    }
}
