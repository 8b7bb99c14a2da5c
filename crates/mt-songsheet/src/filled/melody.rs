//! Melody lines: scale-degree digits with a modifier above or below each.
//!
//! ```text
//! .   (
//! 1 3 5
//!   ~ -
//! ```
//!
//! Modifiers are `.`, `-` and `~`. The extras `(` (bracket the digit),
//! `\` and `/` (slide to the next digit) may share the modifier lines.

use mt_common::metrics::{courier_width_from_height, font_height};
use mt_common::{Bounds, Canvas, Font, LineCap};

use super::SongMetrics;
use crate::style::THINISH_LW;
use crate::{Error, Result};

/// Per-digit slide anchors for Courier glyphs as
/// `(x_start, y_start, x_end, y_end)` fractions of the glyph box.
const SLIDE_ANCHORS: [(f64, f64, f64, f64); 10] = [
    (0.55, 0.10, 0.45, 0.60),
    (0.75, 0.14, 0.30, 0.75),
    (0.75, 0.14, 0.30, 0.80),
    (0.65, 0.14, 0.30, 0.75),
    (0.75, 0.14, 0.60, 0.53),
    (0.65, 0.14, 0.30, 0.60),
    (0.65, 0.14, 0.50, 0.65),
    (0.50, 0.10, 0.30, 0.65),
    (0.65, 0.14, 0.30, 0.65),
    (0.55, 0.25, 0.30, 0.65),
];

/// How a melody digit is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// `.`
    Dot,
    /// `-`
    Dash,
    /// `~`
    Tilde,
}

impl Modifier {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Dot),
            '-' => Some(Self::Dash),
            '~' => Some(Self::Tilde),
            _ => None,
        }
    }
}

/// Decoration drawn in addition to the modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extra {
    /// `(`: brackets around the digit.
    Bracket,
    /// `\`: slide up into the next digit.
    SlideUp,
    /// `/`: slide down into the next digit.
    SlideDown,
}

impl Extra {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '(' => Some(Self::Bracket),
            '\\' => Some(Self::SlideUp),
            '/' => Some(Self::SlideDown),
            _ => None,
        }
    }
}

/// One melody digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub digit: char,
    pub modifier: Modifier,
    pub above: bool,
    pub extra: Option<Extra>,
}

/// A melody line; `None` entries are blank columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Melody {
    pub notes: Vec<Option<Note>>,
}

fn is_digit_line(line: &str) -> bool {
    line.chars().all(|c| c.is_whitespace() || c.is_ascii_digit())
        && line.chars().any(|c| c.is_ascii_digit())
}

fn is_modifier_line(line: &str) -> bool {
    let marked = |c: char| Modifier::from_char(c).is_some() || Extra::from_char(c).is_some();
    line.chars().all(|c| c.is_whitespace() || marked(c)) && line.chars().any(marked)
}

impl Melody {
    /// Try to read a melody from the start of `lines`.
    ///
    /// Returns `Ok(None)` when the lines are not shaped like a melody, and
    /// an error when they are but a digit has no modifier. `line_no` is
    /// only used in error messages.
    pub fn parse(lines: &[&str], line_no: usize) -> Result<Option<(Self, usize)>> {
        if lines.len() < 2 {
            return Ok(None);
        }

        let (upper, digits, lower, used) = if is_digit_line(lines[0]) && is_modifier_line(lines[1])
        {
            ("", lines[0], lines[1], 2)
        } else if is_modifier_line(lines[0]) && is_digit_line(lines[1]) {
            match lines.get(2) {
                Some(l) if is_modifier_line(l) => (lines[0], lines[1], *l, 3),
                _ => (lines[0], lines[1], "", 2),
            }
        } else {
            return Ok(None);
        };

        let upper: Vec<char> = upper.chars().collect();
        let lower: Vec<char> = lower.chars().collect();
        let mut notes = Vec::new();
        for (i, digit) in digits.chars().enumerate() {
            if digit.is_whitespace() {
                notes.push(None);
                continue;
            }

            let above = upper.get(i).copied().unwrap_or(' ');
            let below = lower.get(i).copied().unwrap_or(' ');
            let extra = Extra::from_char(below).or_else(|| Extra::from_char(above));
            let (modifier, is_above) = match (Modifier::from_char(above), Modifier::from_char(below)) {
                (Some(m), _) => (m, true),
                (None, Some(m)) => (m, false),
                (None, None) => {
                    return Err(Error::Melody {
                        line: line_no,
                        message: format!("no modifier for digit {} at column {}", digit, i + 1),
                    })
                }
            };

            notes.push(Some(Note {
                digit,
                modifier,
                above: is_above,
                extra,
            }));
        }

        Ok(Some((Self { notes }, used)))
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, bounds: Bounds, m: &SongMetrics) -> Bounds {
        let font_h = font_height(m.lyric_font_pt);
        let font_w = courier_width_from_height(font_h);
        let pad = font_h * 0.3;
        let x_lyric_start = bounds.left - font_w / 2.0;
        let y_num = bounds.top + font_h + pad * 2.0;
        let x_at = |i: usize| x_lyric_start + i as f64 * font_w;

        for (i, note) in self.notes.iter().enumerate() {
            let Some(note) = note else {
                continue;
            };
            let x_num = x_at(i);
            canvas.set_font(Font::courier(m.lyric_font_pt));
            canvas.text(x_num, y_num, &note.digit.to_string());

            match note.modifier {
                Modifier::Dot => {
                    let y = if note.above {
                        y_num - font_h - pad / 1.5
                    } else {
                        y_num + pad * 1.5
                    };
                    canvas.circle(x_num + font_w / 2.0, y, pad / 1.5, true);
                }
                Modifier::Dash => {
                    let y = if note.above {
                        y_num - font_h - pad
                    } else {
                        y_num + pad
                    };
                    canvas.set_line_width(THINISH_LW);
                    canvas.line(x_num, y, x_num + font_w, y);
                }
                Modifier::Tilde => {
                    let (y, y_mid) = if note.above {
                        let y = y_num - font_h - pad / 2.0;
                        (y, y - pad * 2.0)
                    } else {
                        let y = y_num + pad / 2.0;
                        (y, y + pad * 2.0)
                    };
                    canvas.set_line_width(THINISH_LW);
                    canvas.curve(x_num, y, x_num + font_w / 2.0, y_mid, x_num + font_w, y);
                }
            }

            match note.extra {
                None => {}
                Some(Extra::Bracket) => {
                    let y = y_num - pad / 2.0;
                    canvas.text(x_num - font_w * 0.5, y, "(");
                    canvas.text(x_num + font_w * 0.5, y, ")");
                }
                Some(slide) => {
                    let next = self
                        .notes
                        .iter()
                        .enumerate()
                        .skip(i + 1)
                        .find_map(|(j, n)| n.map(|n| (j, n.digit)));
                    let Some((j, next_digit)) = next else {
                        continue;
                    };
                    let (Some(from), Some(to)) = (anchors(note.digit), anchors(next_digit)) else {
                        continue;
                    };
                    let x_next = x_at(j);

                    // Low point of a glyph sits on its baseline, high point
                    // near its top.
                    let low = |x: f64, a: (f64, f64, f64, f64)| (x + font_w * a.0, y_num - pad * a.1);
                    let high = |x: f64, a: (f64, f64, f64, f64)| {
                        (x + font_w * a.2, y_num - font_h + pad * a.3)
                    };
                    let (start, end) = if slide == Extra::SlideUp {
                        (low(x_num, from), high(x_next, to))
                    } else {
                        (high(x_num, from), low(x_next, to))
                    };

                    canvas.set_line_cap(LineCap::Round);
                    canvas.set_line_width(THINISH_LW);
                    canvas.line(start.0, start.1, end.0, end.1);
                    canvas.set_line_cap(LineCap::Butt);
                }
            }
        }

        let used = font_h + pad * 3.0 + pad / 2.0 + pad * 3.0;
        bounds.with_top(bounds.top + used)
    }
}

fn anchors(digit: char) -> Option<(f64, f64, f64, f64)> {
    digit
        .to_digit(10)
        .and_then(|d| SLIDE_ANCHORS.get(d as usize).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_common::{DrawOp, Page, PageSize};

    #[test]
    fn test_digits_then_modifiers() {
        let (melody, used) = Melody::parse(&["1 3 5", ". - ~", "lyrics"], 3)
            .unwrap()
            .unwrap();
        assert_eq!(used, 2);
        assert_eq!(melody.notes.len(), 5);
        assert!(melody.notes[1].is_none());
        let five = melody.notes[4].unwrap();
        assert_eq!(five.digit, '5');
        assert_eq!(five.modifier, Modifier::Tilde);
        assert!(!five.above);
    }

    #[test]
    fn test_modifiers_both_sides() {
        let (melody, used) = Melody::parse(&[".  \\", "1 23", "  ~-"], 0)
            .unwrap()
            .unwrap();
        assert_eq!(used, 3);
        let one = melody.notes[0].unwrap();
        assert!(one.above);
        assert_eq!(one.modifier, Modifier::Dot);

        let two = melody.notes[2].unwrap();
        assert_eq!(two.modifier, Modifier::Tilde);
        assert!(two.extra.is_none());

        let three = melody.notes[3].unwrap();
        assert_eq!(three.extra, Some(Extra::SlideUp));
        assert!(!three.above);
    }

    #[test]
    fn test_modifiers_above_only() {
        let (_, used) = Melody::parse(&[". .", "1 2", "some lyric"], 0)
            .unwrap()
            .unwrap();
        assert_eq!(used, 2);
        let (_, used) = Melody::parse(&[". .", "1 2"], 0).unwrap().unwrap();
        assert_eq!(used, 2);
    }

    #[test]
    fn test_not_a_melody() {
        assert!(Melody::parse(&["hello", "world"], 0).unwrap().is_none());
        assert!(Melody::parse(&["1 2"], 0).unwrap().is_none());
    }

    #[test]
    fn test_missing_modifier() {
        let err = Melody::parse(&["1 2", ".  "], 7).unwrap_err();
        assert!(matches!(err, Error::Melody { line: 7, .. }));
    }

    #[test]
    fn test_draw() {
        let (melody, _) = Melody::parse(&["  \\", "1 2 3", ". - ~"], 0)
            .unwrap()
            .unwrap();
        let m = SongMetrics {
            lyric_font_pt: 20.0,
            ..SongMetrics::default()
        };
        let mut page = Page::new(PageSize::LETTER);
        let rest = melody.draw(&mut page, Bounds::new(1.0, 0.25, 11.0, 4.25), &m);

        assert_eq!(page.texts().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert!(page
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Circle { filled: true, .. })));
        assert!(page.ops().iter().any(|op| matches!(op, DrawOp::Curve { .. })));
        // dash plus the slide from 2 to 3
        assert_eq!(page.line_count(), 2);
        assert!(page.ops().contains(&DrawOp::LineCap(LineCap::Round)));

        let pad = 0.2 * 0.3;
        assert!((rest.top - (1.0 + 0.2 + pad * 6.5)).abs() < 1e-9);
    }
}
