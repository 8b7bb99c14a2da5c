//! Multi-page documents and output formats.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::{Error, Page, PageSize, Result};

/// File format a [`Document`] is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputFormat {
    #[default]
    Pdf,
    Svg,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Svg => "svg",
        }
    }

    /// Build an output path from a file stem.
    pub fn file_name(&self, stem: &str) -> PathBuf {
        PathBuf::from(format!("{}.{}", stem, self.extension()))
    }

    /// Replace the extension of `path` with this format's.
    pub fn with_extension<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        path.as_ref().with_extension(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "svg" => Ok(Self::Svg),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// An ordered collection of recorded pages.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pages: Vec<Page>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank page and return it for drawing.
    pub fn add_page(&mut self, size: PageSize) -> &mut Page {
        self.pages.push(Page::new(size));
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Append a page drawn elsewhere.
    pub fn push_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// All pages.
    #[inline]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Mutable access to a page by index.
    #[inline]
    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    /// Number of pages.
    #[inline]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Render the document as a PDF file.
    pub fn render_pdf(&self) -> Result<Vec<u8>> {
        if self.pages.is_empty() {
            return Err(Error::EmptyDocument);
        }
        Ok(crate::pdf::render(&self.pages))
    }

    /// Render each page as a standalone SVG document.
    #[cfg(feature = "svg-output")]
    pub fn render_svg_pages(&self) -> Result<Vec<String>> {
        if self.pages.is_empty() {
            return Err(Error::EmptyDocument);
        }
        self.pages.iter().map(crate::svg::render_page).collect()
    }

    /// Write the document to `path` and return the files written.
    ///
    /// PDF documents are always a single file. SVG has no notion of pages, so
    /// a multi-page document is written to `stem-1.svg`, `stem-2.svg`, ...
    pub fn save<P: AsRef<Path>>(&self, path: P, format: OutputFormat) -> Result<Vec<PathBuf>> {
        let path = path.as_ref();

        match format {
            OutputFormat::Pdf => {
                fs::write(path, self.render_pdf()?)?;
                log::info!("wrote {} page PDF to {}", self.pages.len(), path.display());
                Ok(vec![path.to_path_buf()])
            }
            #[cfg(feature = "svg-output")]
            OutputFormat::Svg => {
                let pages = self.render_svg_pages()?;
                if pages.len() == 1 {
                    fs::write(path, &pages[0])?;
                    log::info!("wrote SVG to {}", path.display());
                    return Ok(vec![path.to_path_buf()]);
                }

                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "page".to_string());
                let mut written = Vec::with_capacity(pages.len());
                for (i, svg) in pages.iter().enumerate() {
                    let page_path = path.with_file_name(format!("{}-{}.svg", stem, i + 1));
                    fs::write(&page_path, svg)?;
                    written.push(page_path);
                }
                log::info!("wrote {} SVG pages next to {}", written.len(), path.display());
                Ok(written)
            }
            #[cfg(not(feature = "svg-output"))]
            OutputFormat::Svg => Err(Error::FormatDisabled("SVG")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Canvas;

    #[test]
    fn test_format_parse() {
        assert_eq!("PDF".parse::<OutputFormat>().unwrap(), OutputFormat::Pdf);
        assert_eq!("svg".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert!(matches!(
            "png".parse::<OutputFormat>(),
            Err(Error::UnknownFormat(_))
        ));
        assert_eq!(OutputFormat::Svg.file_name("grid"), PathBuf::from("grid.svg"));
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert!(matches!(doc.render_pdf(), Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_save_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = Document::new();
        doc.add_page(PageSize::LETTER).line(0.0, 0.0, 1.0, 1.0);

        let path = dir.path().join("out.pdf");
        let written = doc.save(&path, OutputFormat::Pdf).unwrap();
        assert_eq!(written, vec![path.clone()]);

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_save_svg_pages() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = Document::new();
        doc.add_page(PageSize::LETTER).text(1.0, 1.0, "one");
        doc.add_page(PageSize::LETTER).text(1.0, 1.0, "two");

        let written = doc
            .save(dir.path().join("cal.svg"), OutputFormat::Svg)
            .unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("cal-1.svg"));
        assert!(written[1].ends_with("cal-2.svg"));
        let second = fs::read_to_string(&written[1]).unwrap();
        assert!(second.contains("two"));
    }
}
