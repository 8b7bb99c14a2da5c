//! Annotated sine curves.
//!
//! A sine is written as four text lines, with an optional fifth:
//!
//! ```text
//! F   C7  G                  along-axis annotations (chords)
//! _   _   _   _              top of the text sine
//!  \_/ \_/ \_/ \_/...        bottom of the text sine, '.' = decaying humps
//!   ^   v   |   V            along-sine annotations
//!         00:03.14           optional playback time
//! ```
//!
//! Four characters make one hump.

use std::f64::consts::PI;
use std::fmt;
use std::time::Duration;

use mt_common::metrics::{courier_width_from_height, font_height, font_pt};
use mt_common::{Bounds, Canvas, Font, LineCap};

use super::SongMetrics;
use crate::style::{PADDING, SUBSUP_SIZE_MUL, THICKER_LW, THINEST_LW, THINISH_LW};

/// Character columns per sine hump.
pub const CHARS_PER_HUMP: f64 = 4.0;

/// Horizontal step of the drawn curve, in inches.
const RESOLUTION: f64 = 0.01;

/// A time within the song's recording, to the centisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct PlaybackTime {
    centis: u64,
}

impl PlaybackTime {
    /// Create from minutes, seconds and centiseconds.
    pub fn new(mins: u64, secs: u64, centis: u64) -> Self {
        Self {
            centis: (mins * 60 + secs) * 100 + centis,
        }
    }

    /// Create from a duration, truncated to the centisecond.
    pub fn from_duration(d: Duration) -> Self {
        Self {
            centis: u64::try_from(d.as_millis() / 10).unwrap_or(u64::MAX),
        }
    }

    /// Time since the start of the recording.
    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.centis * 10)
    }

    /// Parse a line holding only a `mm:ss.cc` time, with any surrounding
    /// whitespace.
    pub fn parse_line(line: &str) -> Option<Self> {
        let text = line.trim();
        let (mins, rest) = text.split_once(':')?;
        let (secs, centis) = rest.split_once('.')?;
        if mins.len() != 2 || secs.len() != 2 || centis.len() != 2 {
            return None;
        }

        let field = |s: &str| -> Option<u64> {
            if s.chars().all(|c| c.is_ascii_digit()) {
                s.parse().ok()
            } else {
                None
            }
        };
        Some(Self::new(field(mins)?, field(secs)?, field(centis)?))
    }
}

impl fmt::Display for PlaybackTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.centis / 100;
        write!(
            f,
            "{:02}:{:02}.{:02}",
            secs / 60,
            secs % 60,
            self.centis % 100
        )
    }
}

/// A character placed along a sine, at a position measured in humps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annotation {
    pub position: f64,
    pub bold: bool,
    pub ch: char,
    pub subscript: Option<char>,
    pub superscript: Option<char>,
}

fn is_script(c: char) -> bool {
    c.is_ascii_digit() || c.is_lowercase()
}

/// Sub and superscripts following an upper-case chord letter.
///
/// A superscript is only recognised after a subscript.
pub(crate) fn chord_scripts(chars: &[char]) -> (Option<char>, Option<char>) {
    match chars {
        [root, sub, rest @ ..] if root.is_uppercase() && is_script(*sub) => {
            let sup = rest.first().copied().filter(|c| is_script(*c));
            (Some(*sub), sup)
        }
        _ => (None, None),
    }
}

/// A sine curve with its annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedSine {
    /// Full-amplitude humps.
    pub humps: f64,
    /// Humps over which the amplitude decays to zero.
    pub trailing_humps: f64,
    pub along_axis: Vec<Annotation>,
    pub along_sine: Vec<Annotation>,
    pub playback: Option<PlaybackTime>,
}

/// Whether two lines are the top and bottom of a text sine.
fn starts_sine(first: &str, second: &str) -> bool {
    first.starts_with('_') && second.starts_with(" \\_/")
}

/// Character width of the widest text sine in `lines`, trailing humps
/// included. Zero when there are none.
pub(crate) fn longest_sine_chars(lines: &[&str]) -> usize {
    lines
        .windows(2)
        .filter(|w| starts_sine(w[0], w[1]))
        .map(|w| {
            let top = w[0].trim().chars().count();
            let bottom = w[1].trim().chars().count() + 1;
            top.max(bottom)
        })
        .max()
        .unwrap_or(0)
}

impl AnnotatedSine {
    /// Try to read a sine from the start of `lines`, returning it and the
    /// number of lines it used.
    pub fn parse(lines: &[&str]) -> Option<(Self, usize)> {
        if lines.len() < 4 || !starts_sine(lines[1], lines[2]) {
            return None;
        }

        let top_chars = lines[1].trim().chars().count();
        let bottom_chars = lines[2].trim_end_matches('.').trim().chars().count() + 1;
        let humps = top_chars.max(bottom_chars) as f64 / CHARS_PER_HUMP;
        let trailing_humps = lines[2].matches('.').count() as f64 / CHARS_PER_HUMP;

        let axis: Vec<char> = lines[0].chars().collect();
        let mut along_axis = Vec::new();
        let mut pos = 0;
        while pos < axis.len() {
            let ch = axis[pos];
            if ch == ' ' {
                pos += 1;
                continue;
            }
            let (subscript, superscript) = chord_scripts(&axis[pos..]);
            along_axis.push(Annotation {
                position: pos as f64 / CHARS_PER_HUMP,
                bold: ch.is_uppercase(),
                ch,
                subscript,
                superscript,
            });
            pos += 1 + subscript.is_some() as usize + superscript.is_some() as usize;
        }

        let along_sine = lines[3]
            .chars()
            .enumerate()
            .filter(|(_, ch)| *ch != ' ')
            .map(|(pos, ch)| {
                let (ch, bold) = match ch {
                    'V' => ('v', true),
                    'A' => ('^', true),
                    other => (other, false),
                };
                Annotation {
                    position: pos as f64 / CHARS_PER_HUMP,
                    bold,
                    ch,
                    subscript: None,
                    superscript: None,
                }
            })
            .collect();

        let playback = lines.get(4).and_then(|l| PlaybackTime::parse_line(l));
        let consumed = if playback.is_some() { 5 } else { 4 };

        Some((
            Self {
                humps,
                trailing_humps,
                along_axis,
                along_sine,
                playback,
            },
            consumed,
        ))
    }

    /// Full and trailing humps together.
    #[inline]
    pub fn total_humps(&self) -> f64 {
        self.humps + self.trailing_humps
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, bounds: Bounds, m: &SongMetrics) -> Bounds {
        let lyric_h = font_height(m.lyric_font_pt);
        let amplitude = m.amp_ratio * lyric_h;
        let beyond = lyric_h / 3.0;
        let tip_hover = beyond / 2.0;
        let used = 2.0 * (amplitude + beyond + tip_hover);

        let longest = m.longest_humps.max(self.total_humps());
        let full = bounds.right - PADDING - bounds.left;
        let width = full * self.humps / longest;
        let trailing_width = full * self.trailing_humps / longest;
        let max_width = width + trailing_width;
        let frequency = 2.0 * PI * self.humps / width;

        let x_start = bounds.left;
        let y_axis = bounds.top + used / 2.0;
        let amplitude_at = |x: f64| {
            if x <= width || trailing_width <= 0.0 {
                amplitude
            } else {
                amplitude * (max_width - x) / trailing_width
            }
        };
        let sine_y = |x: f64| y_axis - amplitude_at(x) * (frequency * x).cos();

        canvas.set_line_width(THINEST_LW);
        let steps = (max_width / RESOLUTION).floor() as usize;
        let mut last = (x_start, sine_y(0.0));
        for i in 1..=steps {
            let x = i as f64 * RESOLUTION;
            let point = (x_start + x, sine_y(x));
            canvas.line(last.0, last.1, point.0, point.1);
            last = point;
        }

        // Text along the axis is centred between the peaks.
        let font_h = amplitude * 1.7;
        let font_w = courier_width_from_height(font_h);
        let script_h = font_h * SUBSUP_SIZE_MUL;
        let crunch = font_w * 0.1;
        for a in &self.along_axis {
            let x = x_start + (a.position / self.humps) * width - font_w / 2.0;
            let y = y_axis + font_h / 2.0;
            canvas.set_font(Font::courier(font_pt(font_h)).with_bold(a.bold));
            canvas.text(x, y, &a.ch.to_string());

            if a.subscript.is_some() || a.superscript.is_some() {
                let xs = x + font_w - crunch;
                canvas.set_font(Font::courier(font_pt(script_h)).with_bold(a.bold));
                if let Some(sub) = a.subscript {
                    canvas.text(xs, y - font_h / 2.0 + script_h, &sub.to_string());
                }
                if let Some(sup) = a.superscript {
                    canvas.text(xs, y - font_h / 2.0, &sup.to_string());
                }
            }
        }

        canvas.set_line_cap(LineCap::Square);
        for a in &self.along_sine {
            let eq_x = (a.position / self.humps) * width;
            let tip_x = x_start + eq_x;
            let mut tip_y = sine_y(eq_x);
            let on_peak = {
                let frac = a.position.fract();
                frac == 0.0 || frac == 0.5
            };
            canvas.set_line_width(if a.bold { THICKER_LW } else { THINISH_LW });

            match a.ch {
                'v' => {
                    if on_peak {
                        tip_y -= tip_hover;
                    }
                    canvas.line(tip_x - beyond, tip_y - beyond, tip_x, tip_y);
                    canvas.line(tip_x, tip_y, tip_x + beyond, tip_y - beyond);
                }
                '^' => {
                    if on_peak {
                        tip_y += tip_hover;
                    }
                    canvas.line(tip_x - beyond, tip_y + beyond, tip_x, tip_y);
                    canvas.line(tip_x, tip_y, tip_x + beyond, tip_y + beyond);
                }
                '|' => {
                    canvas.line(
                        tip_x,
                        y_axis - amplitude - beyond,
                        tip_x,
                        y_axis + amplitude + beyond,
                    );
                }
                other => {
                    let h = 2.0 * beyond;
                    let w = courier_width_from_height(h);
                    canvas.set_font(Font::courier(font_pt(h)).with_bold(a.bold));
                    canvas.text(tip_x - w / 2.0, tip_y + h / 2.0, &other.to_string());
                }
            }
        }
        canvas.set_line_cap(LineCap::Butt);

        bounds.with_top(bounds.top + used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_common::{DrawOp, Page, PageSize};

    const SINE: [&str; 5] = [
        "C   Am7 G",
        "_   _   _   _",
        " \\_/ \\_/ \\_/ \\_/....",
        "  ^   V   |   x",
        "      01:02.50",
    ];

    #[test]
    fn test_playback_time() {
        let t = PlaybackTime::parse_line("   01:02.50  ").unwrap();
        assert_eq!(t.as_duration(), Duration::from_millis(62_500));
        assert_eq!(t.to_string(), "01:02.50");
        assert!(PlaybackTime::parse_line("01:02.5").is_none());
        assert!(PlaybackTime::parse_line("01:02.50 la").is_none());
        assert!(PlaybackTime::parse_line("ab:cd.ef").is_none());
        assert_eq!(
            PlaybackTime::from_duration(Duration::from_millis(125_019)).to_string(),
            "02:05.01"
        );
    }

    #[test]
    fn test_parse_humps() {
        let (sine, used) = AnnotatedSine::parse(&SINE).unwrap();
        assert_eq!(used, 5);
        // 16 characters on the bottom line once the dots are removed
        assert_eq!(sine.humps, 4.0);
        assert_eq!(sine.trailing_humps, 1.0);
        assert_eq!(sine.total_humps(), 5.0);
        assert_eq!(sine.playback, Some(PlaybackTime::new(1, 2, 50)));
    }

    #[test]
    fn test_parse_without_time() {
        let (sine, used) = AnnotatedSine::parse(&SINE[..4]).unwrap();
        assert_eq!(used, 4);
        assert!(sine.playback.is_none());

        let lyric_below = [SINE[0], SINE[1], SINE[2], SINE[3], "la la la"];
        let (_, used) = AnnotatedSine::parse(&lyric_below).unwrap();
        assert_eq!(used, 4);
    }

    #[test]
    fn test_parse_rejects_non_sine() {
        assert!(AnnotatedSine::parse(&["a", "b", "c", "d"]).is_none());
        assert!(AnnotatedSine::parse(&SINE[..3]).is_none());
    }

    #[test]
    fn test_axis_annotations() {
        let (sine, _) = AnnotatedSine::parse(&SINE).unwrap();
        let chars: Vec<char> = sine.along_axis.iter().map(|a| a.ch).collect();
        assert_eq!(chars, vec!['C', 'A', 'G']);

        let am7 = &sine.along_axis[1];
        assert_eq!(am7.position, 1.0);
        assert!(am7.bold);
        assert_eq!(am7.subscript, Some('m'));
        assert_eq!(am7.superscript, Some('7'));
    }

    #[test]
    fn test_sine_annotations() {
        let (sine, _) = AnnotatedSine::parse(&SINE).unwrap();
        let marks: Vec<(char, bool, f64)> = sine
            .along_sine
            .iter()
            .map(|a| (a.ch, a.bold, a.position))
            .collect();
        assert_eq!(
            marks,
            vec![
                ('^', false, 0.5),
                ('v', true, 1.5),
                ('|', false, 2.5),
                ('x', false, 3.5)
            ]
        );
    }

    #[test]
    fn test_chord_scripts() {
        let chars: Vec<char> = "Em7".chars().collect();
        assert_eq!(chord_scripts(&chars), (Some('m'), Some('7')));
        let chars: Vec<char> = "G 7".chars().collect();
        assert_eq!(chord_scripts(&chars), (None, None));
        let chars: Vec<char> = "am".chars().collect();
        assert_eq!(chord_scripts(&chars), (None, None));
    }

    #[test]
    fn test_longest_sine_chars() {
        assert_eq!(longest_sine_chars(&SINE), 20);
        assert_eq!(longest_sine_chars(&["just", "lyrics"]), 0);
    }

    #[test]
    fn test_draw_height() {
        let (sine, _) = AnnotatedSine::parse(&SINE).unwrap();
        let m = SongMetrics {
            lyric_font_pt: 20.0,
            longest_humps: 5.0,
            ..SongMetrics::default()
        };
        let mut page = Page::new(PageSize::LETTER);
        let bounds = Bounds::new(1.0, 0.25, 11.0, 4.25);
        let rest = sine.draw(&mut page, bounds, &m);

        // amplitude 0.16, beyond 0.0667, hover 0.0333
        let expected = 2.0 * (0.8 * 0.2 + 0.2 / 3.0 + 0.2 / 6.0);
        assert!((rest.top - (1.0 + expected)).abs() < 1e-9);
        assert!(page.line_count() > 300);
        assert_eq!(page.ops()[0], DrawOp::LineWidth(THINEST_LW));
        assert!(page.ops().contains(&DrawOp::LineCap(LineCap::Square)));
        assert!(page.texts().any(|t| t == "x"));
    }
}
