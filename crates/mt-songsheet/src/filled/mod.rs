//! Filled songsheets: a plain-text song laid out in columns of lyrics,
//! sine curves, melodies and chord charts.
//!
//! The first two lines are the [`Header`]. Every following line belongs to
//! exactly one [`SongElement`], recognised by trying each kind in turn.

mod chord;
mod melody;
mod sine;

pub use chord::{Chord, ChordChart};
pub use melody::{Extra, Melody, Modifier, Note};
pub use sine::{AnnotatedSine, Annotation, PlaybackTime, CHARS_PER_HUMP};

use mt_common::metrics::{
    courier_height_from_width, courier_width_from_height, font_height, font_pt,
};
use mt_common::{Bounds, Canvas, Document, Font, NullCanvas, Page, PageSize};

use crate::header::Header;
use crate::style::{SheetStyle, PADDING};
use crate::{Error, Result};

const LYRIC_BASELINE_MUL: f64 = 1.3;

/// Sizes shared by every element of one song.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SongMetrics {
    pub lyric_font_pt: f64,
    /// Humps in the longest sine; shorter sines are drawn proportionally.
    pub longest_humps: f64,
    pub spacing_ratio: f64,
    pub amp_ratio: f64,
    pub style: SheetStyle,
}

impl Default for SongMetrics {
    fn default() -> Self {
        Self {
            lyric_font_pt: 12.0,
            longest_humps: 1.0,
            spacing_ratio: 1.5,
            amp_ratio: 0.8,
            style: SheetStyle::default(),
        }
    }
}

/// One element of a song body.
#[derive(Debug, Clone, PartialEq)]
pub enum SongElement {
    /// A blank line.
    Spacing,
    ChordChart(ChordChart),
    Sine(AnnotatedSine),
    Melody(Melody),
    Lyrics(String),
}

impl SongElement {
    /// Read the next element from `lines`, returning it and the number of
    /// lines it used. `line_no` is the position of `lines[0]` in the song.
    fn parse(lines: &[&str], line_no: usize) -> Result<(Self, usize)> {
        if lines[0].trim().is_empty() {
            return Ok((Self::Spacing, 1));
        }
        if let Some((chart, used)) = ChordChart::parse(lines) {
            return Ok((Self::ChordChart(chart), used));
        }
        if let Some((sine, used)) = AnnotatedSine::parse(lines) {
            return Ok((Self::Sine(sine), used));
        }
        if let Some((melody, used)) = Melody::parse(lines, line_no)? {
            return Ok((Self::Melody(melody), used));
        }
        Ok((Self::Lyrics(lines[0].to_string()), 1))
    }

    fn draw(&self, canvas: &mut dyn Canvas, bounds: Bounds, m: &SongMetrics) -> Bounds {
        match self {
            Self::Spacing => {
                bounds.with_top(bounds.top + font_height(m.lyric_font_pt) * m.spacing_ratio)
            }
            Self::ChordChart(chart) => chart.draw(canvas, bounds, &m.style),
            Self::Sine(sine) => sine.draw(canvas, bounds, m),
            Self::Melody(melody) => melody.draw(canvas, bounds, m),
            Self::Lyrics(text) => draw_lyrics(canvas, bounds, m, text),
        }
    }
}

/// Lyrics are placed one character per Courier cell so they line up with
/// the sine annotations above them.
fn draw_lyrics(canvas: &mut dyn Canvas, bounds: Bounds, m: &SongMetrics, text: &str) -> Bounds {
    let font_h = font_height(m.lyric_font_pt);
    let font_w = courier_width_from_height(font_h);
    let x_start = bounds.left - font_w / 2.0;
    let y = bounds.top + LYRIC_BASELINE_MUL * font_h;

    canvas.set_font(Font::courier(m.lyric_font_pt));
    for (i, ch) in text.chars().enumerate() {
        if ch.is_whitespace() {
            continue;
        }
        canvas.text(x_start + i as f64 * font_w, y, &ch.to_string());
    }

    bounds.with_top(bounds.top + LYRIC_BASELINE_MUL * font_h)
}

/// Layout options for [`Song::render`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilledOptions {
    pub columns: usize,
    /// Blank line height as a multiple of the lyric height.
    pub spacing_ratio: f64,
    /// Sine amplitude as a multiple of the lyric height.
    pub amp_ratio: f64,
    pub mirror: bool,
    pub show_title: bool,
}

impl Default for FilledOptions {
    fn default() -> Self {
        Self {
            columns: 2,
            spacing_ratio: 1.5,
            amp_ratio: 0.8,
            mirror: false,
            show_title: true,
        }
    }
}

/// A parsed song.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub header: Header,
    pub elements: Vec<SongElement>,
    /// Character width of the longest sine, trailing humps included.
    longest_sine_chars: usize,
}

impl Song {
    /// Parse a whole song file.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        let header = Header::parse(&lines)?;

        let body = &lines[2..];
        let mut elements = Vec::new();
        let mut i = 0;
        while i < body.len() {
            let (element, used) = SongElement::parse(&body[i..], i + 3)?;
            log::debug!("line {}: {} line element", i + 3, used);
            elements.push(element);
            i += used;
        }

        Ok(Self {
            header,
            elements,
            longest_sine_chars: sine::longest_sine_chars(body),
        })
    }

    /// File name stem for the rendered sheet.
    pub fn file_stem(&self) -> String {
        let title = self.header.title.trim();
        if title.is_empty() {
            return "songsheet_untitled".to_string();
        }
        let title: String = title
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        format!("songsheet_{}", title)
    }

    /// Lay the song out on Letter pages.
    ///
    /// Elements flow down each column in turn. When an element would leave
    /// less than the padding below it, it moves to the next column, and
    /// after the last column onto a new page without a header.
    pub fn render(&self, opts: &FilledOptions) -> Result<Document> {
        if opts.columns == 0 {
            return Err(Error::NoColumns);
        }
        if self.longest_sine_chars == 0 {
            return Err(Error::NoSine);
        }

        let size = PageSize::LETTER;
        let full = Bounds::new(PADDING, PADDING, size.height, size.width);
        let mut doc = Document::new();
        let mut page = Page::new(size);

        let body = self.header.draw(&mut page, full, opts.show_title);
        let mut columns = body.split_columns(opts.columns);

        let chars = self.longest_sine_chars as f64;
        let font_w = (columns[0].width() - PADDING) / chars;
        let metrics = SongMetrics {
            lyric_font_pt: font_pt(courier_height_from_width(font_w)),
            longest_humps: chars / CHARS_PER_HUMP,
            spacing_ratio: opts.spacing_ratio,
            amp_ratio: opts.amp_ratio,
            style: SheetStyle {
                mirror: opts.mirror,
            },
        };
        log::debug!(
            "lyric font {:.2}pt from a {} character sine",
            metrics.lyric_font_pt,
            self.longest_sine_chars
        );

        let mut col = 0;
        for element in &self.elements {
            let measured = element.draw(&mut NullCanvas, columns[col], &metrics);
            if measured.height() < PADDING {
                col += 1;
                if col >= columns.len() {
                    doc.push_page(std::mem::replace(&mut page, Page::new(size)));
                    log::debug!("starting page {}", doc.page_count() + 1);
                    columns = full.split_columns(opts.columns);
                    col = 0;
                }
            }
            columns[col] = element.draw(&mut page, columns[col], &metrics);
        }
        doc.push_page(page);

        Ok(doc)
    }
}
