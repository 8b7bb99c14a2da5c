//! Chord charts.
//!
//! ```text
//!   |  |  |
//! - 1  3
//! - 0  2  x
//! - 3  0  10
//! - 0  0
//! - 1  1
//! - 0  0
//!   |  |  |
//!   F  G  C
//! ```
//!
//! Chord names sit at columns 2, 5, 8, ... of the last line; each string's
//! position is read from the same column.

use mt_common::metrics::{courier_width_from_height, font_height};
use mt_common::{Bounds, Canvas, Font};

use super::sine::chord_scripts;
use crate::elements::{
    draw_horizontal_prickles, draw_horizontal_strings, prickle_positions, string_spacing,
};
use crate::style::{SheetStyle, PADDING, SUBSUP_SIZE_MUL};

const LABEL_FONT_PT: f64 = 12.0;
const POSITIONS_FONT_PT: f64 = 10.0;
const CHART_LINES: usize = 9;

/// One chord: its name and a fret per string, thick to thin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    pub name: String,
    /// Empty for an unmarked string, `x` for a muted one.
    pub positions: [String; 6],
}

/// A row of chord diagrams drawn on a horizontal cactus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordChart {
    pub chords: Vec<Chord>,
}

fn non_space(c: Option<&char>) -> Option<char> {
    c.copied().filter(|c| *c != ' ')
}

impl ChordChart {
    /// Try to read a chart from the start of `lines`.
    pub fn parse(lines: &[&str]) -> Option<(Self, usize)> {
        if lines.len() < CHART_LINES
            || !lines[0].starts_with("  |  |  |")
            || !lines[7].starts_with("  |  |  |")
            || !lines[1..=6].iter().all(|l| l.starts_with("- "))
        {
            return None;
        }

        let names: Vec<char> = lines[8].chars().collect();
        let strings: Vec<Vec<char>> = lines[1..=6].iter().map(|l| l.chars().collect()).collect();

        let mut chords = Vec::new();
        let mut col = 2;
        while let Some(first) = non_space(names.get(col)) {
            let mut name = first.to_string();
            if let Some(second) = non_space(names.get(col + 1)) {
                name.push(second);
                if let Some(third) = non_space(names.get(col + 2)) {
                    name.push(third);
                }
            }

            let positions: [String; 6] = std::array::from_fn(|i| {
                let line = &strings[i];
                let mut word = String::new();
                if let Some(c) = non_space(line.get(col)) {
                    word.push(c);
                    if let Some(c) = non_space(line.get(col + 1)) {
                        word.push(c);
                    }
                }
                word
            });

            chords.push(Chord { name, positions });
            col += 3;
        }

        Some((Self { chords }, CHART_LINES))
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, bounds: Bounds, style: &SheetStyle) -> Bounds {
        let zone = PADDING;
        let spacing = string_spacing();
        draw_horizontal_strings(canvas, bounds, zone, style);

        let label_h = font_height(LABEL_FONT_PT);
        let label_w = courier_width_from_height(label_h);
        let label_pad = label_h * 0.1;
        let pos_h = font_height(POSITIONS_FONT_PT);
        let pos_w = courier_width_from_height(pos_h);

        let xs = prickle_positions(bounds.left, bounds.right - PADDING);
        if xs.len() < self.chords.len() {
            log::warn!(
                "chord chart has room for {} of {} chords",
                xs.len(),
                self.chords.len()
            );
        }

        for (i, x) in xs.into_iter().enumerate() {
            let prickle_end = draw_horizontal_prickles(canvas, bounds, zone, x);
            let Some(chord) = self.chords.get(i) else {
                continue;
            };

            let name: Vec<char> = chord.name.chars().collect();
            let (subscript, superscript) = chord_scripts(&name);
            let x_label = x - label_w / 2.0;
            let y_label = prickle_end + label_h + label_pad;
            canvas.set_font(Font::courier(LABEL_FONT_PT));
            canvas.text(x_label, y_label, &name[0].to_string());
            if subscript.is_some() || superscript.is_some() {
                canvas.set_font(Font::courier(LABEL_FONT_PT * SUBSUP_SIZE_MUL));
                if let Some(sub) = subscript {
                    canvas.text(x_label + label_w, y_label, &sub.to_string());
                }
                if let Some(sup) = superscript {
                    canvas.text(x_label + label_w, y_label - label_h / 2.0, &sup.to_string());
                }
            }

            canvas.set_font(Font::courier(POSITIONS_FONT_PT));
            for (s, position) in chord.positions.iter().enumerate() {
                let y = bounds.top + zone + s as f64 * spacing + pos_h / 2.0;
                match position.as_str() {
                    "" => {}
                    "x" => {
                        let ext = pos_w / 2.0;
                        let yc = y - pos_h / 2.0;
                        canvas.line(x - ext, yc - ext, x + ext, yc + ext);
                        canvas.line(x - ext, yc + ext, x + ext, yc - ext);
                    }
                    fret => canvas.text(x - pos_w / 2.0, y, fret),
                }
            }
        }

        let used = zone + 6.0 * spacing + zone + label_h + label_pad;
        bounds.with_top(bounds.top + used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_common::{Page, PageSize};

    const CHART: [&str; 9] = [
        "  |  |  |",
        "- 1  3",
        "- 0  2  x",
        "- 3  0  10",
        "- 0  0",
        "- 1  1",
        "- 0  0",
        "  |  |  |",
        "  F  G7 Cm7",
    ];

    #[test]
    fn test_parse() {
        let (chart, used) = ChordChart::parse(&CHART).unwrap();
        assert_eq!(used, 9);
        assert_eq!(chart.chords.len(), 3);

        let f = &chart.chords[0];
        assert_eq!(f.name, "F");
        assert_eq!(f.positions, ["1", "0", "3", "0", "1", "0"].map(String::from));

        let c = &chart.chords[2];
        assert_eq!(c.name, "Cm7");
        assert_eq!(c.positions, ["", "x", "10", "", "", ""].map(String::from));
    }

    #[test]
    fn test_parse_rejects() {
        assert!(ChordChart::parse(&CHART[..8]).is_none());
        let mut bad = CHART;
        bad[3] = "3  0  10";
        assert!(ChordChart::parse(&bad).is_none());
    }

    #[test]
    fn test_draw() {
        let (chart, _) = ChordChart::parse(&CHART).unwrap();
        let mut page = Page::new(PageSize::LETTER);
        let bounds = Bounds::new(1.0, 0.25, 11.0, 4.25);
        let rest = chart.draw(&mut page, bounds, &SheetStyle::default());

        let texts: Vec<&str> = page.texts().collect();
        assert!(texts.contains(&"F"));
        assert!(texts.contains(&"G"));
        assert!(texts.contains(&"7"));
        assert!(texts.contains(&"10"));
        assert!(rest.top > 2.0 && rest.top < 2.5);
    }
}
