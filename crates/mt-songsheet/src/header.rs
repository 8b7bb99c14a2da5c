//! The songsheet header: title, date and the song's keyword box.

use mt_common::{Bounds, Canvas, Font};

use crate::style::{PADDING, THIN_LW};
use crate::{Error, Result};

const HEADER_HEIGHT: f64 = 1.0;
const DATE_RIGHT_OFFSET: f64 = 2.0;
const BOX_HEIGHT: f64 = 0.25;
const BOX_TEXT_MARGIN: f64 = 0.06;
const HEADER_FONT_PT: f64 = 14.0;

const KEYWORDS: [&str; 5] = ["TUNING:", "CAPO:", "BPM:", "TIMESIG:", "FEEL:"];

/// Header fields. Empty fields print as bare labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub date: String,
    pub tuning: String,
    pub capo: String,
    pub bpm: String,
    pub timesig: String,
    pub feel: String,
}

impl Header {
    /// Parse the first two lines of a song.
    ///
    /// The first line is the title, optionally followed by `DATE: <date>`.
    /// The second holds any of the keywords, each followed by its value
    /// up to the next keyword.
    pub fn parse(lines: &[&str]) -> Result<Self> {
        if lines.len() < 2 {
            return Err(Error::MissingHeader(lines.len()));
        }

        let mut header = Header::default();
        match lines[0].split_once("DATE:") {
            Some((title, date)) => {
                header.title = title.trim().to_string();
                header.date = date.trim().to_string();
            }
            None => header.title = lines[0].trim().to_string(),
        }

        let words: Vec<&str> = lines[1].split_whitespace().collect();
        for keyword in KEYWORDS {
            let Some(start) = words.iter().position(|w| *w == keyword) else {
                continue;
            };
            let value = words[start + 1..]
                .iter()
                .take_while(|w| !KEYWORDS.contains(*w))
                .copied()
                .collect::<Vec<_>>()
                .join(" ");
            *header.field_mut(keyword) = value;
        }

        Ok(header)
    }

    fn field_mut(&mut self, keyword: &str) -> &mut String {
        match keyword {
            "TUNING:" => &mut self.tuning,
            "CAPO:" => &mut self.capo,
            "BPM:" => &mut self.bpm,
            "TIMESIG:" => &mut self.timesig,
            _ => &mut self.feel,
        }
    }

    fn field(&self, keyword: &str) -> &str {
        match keyword {
            "TUNING:" => &self.tuning,
            "CAPO:" => &self.capo,
            "BPM:" => &self.bpm,
            "TIMESIG:" => &self.timesig,
            _ => &self.feel,
        }
    }

    /// Draw the header at the top of `bounds` and return the space below it.
    pub fn draw(&self, canvas: &mut dyn Canvas, bounds: Bounds, show_title: bool) -> Bounds {
        if show_title && !self.title.is_empty() {
            canvas.set_font(Font::courier_bold(HEADER_FONT_PT));
            canvas.text(bounds.left, bounds.top, &self.title);
        }

        canvas.set_font(Font::courier(HEADER_FONT_PT));
        canvas.text(
            bounds.right - DATE_RIGHT_OFFSET,
            bounds.top,
            &labelled("DATE:", &self.date),
        );

        canvas.set_line_width(THIN_LW);
        canvas.rect(
            bounds.left,
            bounds.top + HEADER_HEIGHT - BOX_HEIGHT,
            bounds.width() - PADDING,
            BOX_HEIGHT,
        );

        let x_start = bounds.left + BOX_TEXT_MARGIN;
        let x_end = bounds.right - PADDING - BOX_TEXT_MARGIN;
        let x_step = (x_end - x_start) / KEYWORDS.len() as f64;
        let y = bounds.top + HEADER_HEIGHT - BOX_TEXT_MARGIN;
        for (i, keyword) in KEYWORDS.iter().enumerate() {
            canvas.text(
                x_start + i as f64 * x_step,
                y,
                &labelled(keyword, self.field(keyword)),
            );
        }

        bounds.with_top(bounds.top + HEADER_HEIGHT + PADDING)
    }
}

fn labelled(label: &str, value: &str) -> String {
    if value.is_empty() {
        label.to_string()
    } else {
        format!("{} {}", label, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_common::{Page, PageSize};

    #[test]
    fn test_parse() {
        let header = Header::parse(&[
            "Wild Horses DATE: 2021-04-01",
            "TUNING: open G CAPO: 2 FEEL: slow and low",
        ])
        .unwrap();
        assert_eq!(header.title, "Wild Horses");
        assert_eq!(header.date, "2021-04-01");
        assert_eq!(header.tuning, "open G");
        assert_eq!(header.capo, "2");
        assert_eq!(header.feel, "slow and low");
        assert_eq!(header.bpm, "");
    }

    #[test]
    fn test_parse_missing() {
        assert!(matches!(
            Header::parse(&["only a title"]),
            Err(Error::MissingHeader(1))
        ));
        let header = Header::parse(&["Untitled", ""]).unwrap();
        assert_eq!(header.date, "");
    }

    #[test]
    fn test_draw_blank() {
        let mut page = Page::new(PageSize::LETTER);
        let bounds = Bounds::new(PADDING, PADDING, 11.0, 8.5);
        let rest = Header::default().draw(&mut page, bounds, true);

        assert_eq!(rest.top, PADDING + HEADER_HEIGHT + PADDING);
        let texts: Vec<&str> = page.texts().collect();
        assert_eq!(
            texts,
            vec!["DATE:", "TUNING:", "CAPO:", "BPM:", "TIMESIG:", "FEEL:"]
        );
    }

    #[test]
    fn test_draw_title() {
        let mut page = Page::new(PageSize::LETTER);
        let header = Header {
            title: "Song".to_string(),
            bpm: "90".to_string(),
            ..Default::default()
        };
        header.draw(&mut page, PageSize::LETTER.bounds(), true);
        assert!(page.texts().any(|t| t == "Song"));
        assert!(page.texts().any(|t| t == "BPM: 90"));

        let mut page = Page::new(PageSize::LETTER);
        header.draw(&mut page, PageSize::LETTER.bounds(), false);
        assert!(!page.texts().any(|t| t == "Song"));
    }
}
