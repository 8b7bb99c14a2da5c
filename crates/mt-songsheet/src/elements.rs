//! Songsheet layout elements.
//!
//! Elements are described by a small grammar:
//!
//! ```text
//! elem := PILLAR | HPILLAR | CACTUS | HCACTUS
//!       | LINES | LINES[spacing] | LINES[spacing,angle]
//!       | ROW(elem;elem;...) | COL(elem;elem;...)
//! ```
//!
//! Layout is negotiated in two passes. Every element first reports whether
//! its width and height are fixed ([`Extent::Static`]) or stretch to fill
//! ([`Extent::Dynamic`]); groups then hand static children exactly their
//! size and split what is left evenly among the dynamic ones.

use std::str::FromStr;

use mt_common::{Bounds, Canvas};

use crate::style::{SheetStyle, PADDING, THINEST_LW};
use crate::{Error, Result};

const DEFAULT_LINE_SPACING: f64 = 0.5;
const STRING_SPACING: f64 = PADDING / 2.0;
const THICKNESS_INDICATOR: f64 = PADDING / 2.0;
const PRICKLE_SPACING: f64 = PADDING;

/// Size of an element along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    /// A fixed size in inches.
    Static(f64),
    /// Takes a share of whatever space is available.
    Dynamic,
}

impl Extent {
    /// The fixed size, if any.
    #[inline]
    pub fn value(&self) -> Option<f64> {
        match self {
            Extent::Static(v) => Some(*v),
            Extent::Dynamic => None,
        }
    }

    fn sum(extents: impl Iterator<Item = Extent>) -> Extent {
        let mut total = 0.0;
        for extent in extents {
            match extent {
                Extent::Static(v) => total += v,
                Extent::Dynamic => return Extent::Dynamic,
            }
        }
        Extent::Static(total)
    }
}

/// Six guitar strings with thickness ticks, optionally with cactus prickles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pillar {
    pub horizontal: bool,
    pub prickles: bool,
}

impl Pillar {
    fn cactus_zone(&self) -> f64 {
        if self.prickles {
            PADDING
        } else {
            0.0
        }
    }

    /// Size across the strings.
    pub fn thickness(&self) -> f64 {
        2.0 * self.cactus_zone() + PADDING + 5.0 * STRING_SPACING
    }

    fn draw(&self, canvas: &mut dyn Canvas, bounds: Bounds, style: &SheetStyle) -> Bounds {
        let zone = self.cactus_zone();
        if self.horizontal {
            draw_horizontal_strings(canvas, bounds, zone, style);
            if self.prickles {
                for x in prickle_positions(bounds.left, bounds.right - PADDING) {
                    draw_horizontal_prickles(canvas, bounds, zone, x);
                }
            }
            bounds.with_top(bounds.top + self.thickness())
        } else {
            let thicknesses = style.thicknesses();
            for (i, t) in thicknesses.iter().enumerate() {
                let x = bounds.left + zone + i as f64 * STRING_SPACING;
                canvas.set_line_width(*t);
                canvas.line(x, bounds.top, x, bounds.top + THICKNESS_INDICATOR);
            }

            canvas.set_line_width(THINEST_LW);
            let y = bounds.top + THICKNESS_INDICATOR;
            canvas.line(
                bounds.left + zone,
                y,
                bounds.left + zone + 5.0 * STRING_SPACING,
                y,
            );
            for i in 0..thicknesses.len() {
                let x = bounds.left + zone + i as f64 * STRING_SPACING;
                canvas.line(x, y, x, bounds.bottom - PADDING);
            }

            if self.prickles {
                let right_start = bounds.left + zone + 5.0 * STRING_SPACING + zone / 2.0;
                let start = bounds.top + THICKNESS_INDICATOR + PRICKLE_SPACING / 2.0;
                let mut y = start;
                while y < bounds.bottom - PADDING {
                    canvas.line(bounds.left, y, bounds.left + zone / 2.0, y);
                    canvas.line(right_start, y, right_start + zone / 2.0, y);
                    y += PRICKLE_SPACING;
                }
            }
            bounds.with_left(bounds.left + self.thickness())
        }
    }
}

/// Draw horizontal strings: thickness ticks at the left, a separator and
/// six hairlines running to the right edge less padding.
pub(crate) fn draw_horizontal_strings(
    canvas: &mut dyn Canvas,
    bounds: Bounds,
    zone: f64,
    style: &SheetStyle,
) {
    let thicknesses = style.thicknesses();
    for (i, t) in thicknesses.iter().enumerate() {
        let y = bounds.top + zone + i as f64 * STRING_SPACING;
        canvas.set_line_width(*t);
        canvas.line(bounds.left, y, bounds.left + THICKNESS_INDICATOR, y);
    }

    canvas.set_line_width(THINEST_LW);
    let x = bounds.left + THICKNESS_INDICATOR;
    canvas.line(
        x,
        bounds.top + zone,
        x,
        bounds.top + zone + 5.0 * STRING_SPACING,
    );
    for i in 0..thicknesses.len() {
        let y = bounds.top + zone + i as f64 * STRING_SPACING;
        canvas.line(x, y, bounds.right - PADDING, y);
    }
}

/// X positions of prickles along horizontal strings starting at `left`.
pub(crate) fn prickle_positions(left: f64, end: f64) -> Vec<f64> {
    let mut xs = Vec::new();
    let mut x = left + THICKNESS_INDICATOR + PRICKLE_SPACING / 2.0;
    while x < end {
        xs.push(x);
        x += PRICKLE_SPACING;
    }
    xs
}

/// Draw one pair of prickles above and below horizontal strings. Returns
/// the y coordinate of the bottom prickle's end.
pub(crate) fn draw_horizontal_prickles(
    canvas: &mut dyn Canvas,
    bounds: Bounds,
    zone: f64,
    x: f64,
) -> f64 {
    let bottom_start = bounds.top + zone + 5.0 * STRING_SPACING + zone / 2.0;
    let bottom_end = bottom_start + zone / 2.0;
    canvas.set_line_width(THINEST_LW);
    canvas.line(x, bounds.top, x, bounds.top + zone / 2.0);
    canvas.line(x, bottom_start, x, bottom_end);
    bottom_end
}

/// Vertical distance between strings.
pub(crate) const fn string_spacing() -> f64 {
    STRING_SPACING
}

/// Parallel hairlines filling the available space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLines {
    /// Vertical distance between lines, in inches.
    pub spacing: f64,
    /// Tilt of each line, in radians.
    pub angle: f64,
}

impl Default for FlowLines {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_LINE_SPACING,
            angle: 0.0,
        }
    }
}

impl FlowLines {
    fn parse(text: &str) -> Result<Self> {
        let Some(rest) = text.strip_prefix("LINES") else {
            return Err(Error::UnknownElement(text.to_string()));
        };
        if rest.is_empty() {
            return Ok(Self::default());
        }

        let params = rest
            .strip_prefix('[')
            .and_then(|r| r.strip_suffix(']'))
            .ok_or_else(|| Error::UnknownElement(text.to_string()))?;
        let values = params
            .split(',')
            .map(|p| mt_convert::evaluate(p.trim()))
            .collect::<std::result::Result<Vec<f64>, _>>();

        let lines = match values {
            Ok(v) if v.len() == 1 => Self {
                spacing: v[0],
                ..Self::default()
            },
            Ok(v) if v.len() == 2 => Self {
                spacing: v[0],
                angle: v[1],
            },
            Ok(_) => return Err(Error::BadParameters(text.to_string())),
            Err(e) => return Err(e.into()),
        };

        if lines.spacing <= 0.0 || !lines.spacing.is_finite() {
            return Err(Error::BadParameters(text.to_string()));
        }
        Ok(lines)
    }

    fn draw(&self, canvas: &mut dyn Canvas, bounds: Bounds) -> Bounds {
        canvas.set_line_width(THINEST_LW);
        let x_start = bounds.left;
        let x_end = bounds.right - PADDING;
        let rise = self.angle.tan() * (x_end - x_start);

        let mut y = bounds.top + self.spacing;
        while y < bounds.bottom - PADDING {
            canvas.line(x_start, y, x_end, y + rise);
            y += self.spacing;
        }

        Bounds::new(bounds.bottom, bounds.left, bounds.bottom, bounds.left)
    }
}

/// Direction children of a group are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Row,
    Column,
}

/// A row or column of elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub direction: Direction,
    pub children: Vec<Element>,
}

impl Group {
    fn draw(&self, canvas: &mut dyn Canvas, bounds: Bounds, style: &SheetStyle) -> Bounds {
        let (available, extent_of): (f64, fn(&Element) -> Extent) = match self.direction {
            Direction::Row => (bounds.width(), Element::width),
            Direction::Column => (bounds.height(), Element::height),
        };

        let mut fixed = 0.0;
        let mut dynamic = 0usize;
        for child in &self.children {
            match extent_of(child) {
                Extent::Static(v) => fixed += v,
                Extent::Dynamic => dynamic += 1,
            }
        }
        let share = if dynamic == 0 {
            0.0
        } else {
            (available - fixed) / dynamic as f64
        };

        let mut cursor = match self.direction {
            Direction::Row => bounds.left,
            Direction::Column => bounds.top,
        };
        for child in &self.children {
            let size = extent_of(child).value().unwrap_or(share);
            let child_bounds = match self.direction {
                Direction::Row => bounds.with_left(cursor).with_right(cursor + size),
                Direction::Column => bounds.with_top(cursor).with_bottom(cursor + size),
            };
            log::debug!("{:?} child gets {:?}", self.direction, child_bounds);
            child.draw(canvas, child_bounds, style);
            cursor += size;
        }

        match self.direction {
            Direction::Row => bounds.with_left(cursor),
            Direction::Column => bounds.with_top(cursor),
        }
    }
}

/// A songsheet layout element.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Pillar(Pillar),
    Lines(FlowLines),
    Group(Group),
}

impl Element {
    /// Parse an element description.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        match text {
            "PILLAR" => {
                return Ok(Element::Pillar(Pillar {
                    horizontal: false,
                    prickles: false,
                }))
            }
            "HPILLAR" => {
                return Ok(Element::Pillar(Pillar {
                    horizontal: true,
                    prickles: false,
                }))
            }
            "CACTUS" => {
                return Ok(Element::Pillar(Pillar {
                    horizontal: false,
                    prickles: true,
                }))
            }
            "HCACTUS" => {
                return Ok(Element::Pillar(Pillar {
                    horizontal: true,
                    prickles: true,
                }))
            }
            _ => {}
        }

        if text.starts_with("LINES") {
            return FlowLines::parse(text).map(Element::Lines);
        }

        let direction = if text.starts_with("ROW(") {
            Direction::Row
        } else if text.starts_with("COL(") {
            Direction::Column
        } else {
            return Err(Error::UnknownElement(text.to_string()));
        };
        let inner = text[4..]
            .strip_suffix(')')
            .ok_or_else(|| Error::UnknownElement(text.to_string()))?;

        let children = split_top_level(inner)
            .into_iter()
            .map(Element::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Element::Group(Group {
            direction,
            children,
        }))
    }

    /// Width negotiation.
    pub fn width(&self) -> Extent {
        match self {
            Element::Pillar(p) if p.horizontal => Extent::Dynamic,
            Element::Pillar(p) => Extent::Static(p.thickness()),
            Element::Lines(_) => Extent::Dynamic,
            Element::Group(g) => Extent::sum(g.children.iter().map(Element::width)),
        }
    }

    /// Height negotiation.
    pub fn height(&self) -> Extent {
        match self {
            Element::Pillar(p) if p.horizontal => Extent::Static(p.thickness()),
            Element::Pillar(_) => Extent::Dynamic,
            Element::Lines(_) => Extent::Dynamic,
            Element::Group(g) => Extent::sum(g.children.iter().map(Element::height)),
        }
    }

    /// Draw into `bounds` and return the bounds left over.
    pub fn draw(&self, canvas: &mut dyn Canvas, bounds: Bounds, style: &SheetStyle) -> Bounds {
        match self {
            Element::Pillar(p) => p.draw(canvas, bounds, style),
            Element::Lines(l) => l.draw(canvas, bounds),
            Element::Group(g) => g.draw(canvas, bounds, style),
        }
    }
}

impl FromStr for Element {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Element::parse(s)
    }
}

/// Split on `;` outside any brackets.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut last = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth -= 1,
            ';' if depth == 0 => {
                parts.push(&text[last..i]);
                last = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[last..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_common::{DrawOp, Page, PageSize};

    const PAGE: Bounds = Bounds::new(0.0, 0.0, 11.0, 8.5);

    #[test]
    fn test_parse_pillars() {
        assert_eq!(
            Element::parse("HCACTUS").unwrap(),
            Element::Pillar(Pillar {
                horizontal: true,
                prickles: true
            })
        );
        assert!(matches!(
            Element::parse("TREE"),
            Err(Error::UnknownElement(_))
        ));
    }

    #[test]
    fn test_parse_lines() {
        assert_eq!(
            Element::parse("LINES").unwrap(),
            Element::Lines(FlowLines::default())
        );
        match Element::parse("LINES[0.3,pi/10]").unwrap() {
            Element::Lines(l) => {
                assert_eq!(l.spacing, 0.3);
                assert!((l.angle - std::f64::consts::PI / 10.0).abs() < 1e-12);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            Element::parse("LINES[1,2,3]"),
            Err(Error::BadParameters(_))
        ));
        assert!(matches!(
            Element::parse("LINES[0]"),
            Err(Error::BadParameters(_))
        ));
        assert!(matches!(
            Element::parse("LINES[x]"),
            Err(Error::Convert(_))
        ));
    }

    #[test]
    fn test_parse_nested_groups() {
        let elem = Element::parse("COL(PILLAR;COL(LINES[0.5,0.1];ROW(CACTUS;HPILLAR));LINES)")
            .unwrap();
        let Element::Group(outer) = elem else {
            panic!("expected group");
        };
        assert_eq!(outer.direction, Direction::Column);
        assert_eq!(outer.children.len(), 3);
        let Element::Group(inner) = &outer.children[1] else {
            panic!("expected inner group");
        };
        assert_eq!(inner.children.len(), 2);

        assert!(matches!(
            Element::parse("ROW(PILLAR;NOPE)"),
            Err(Error::UnknownElement(t)) if t == "NOPE"
        ));
    }

    #[test]
    fn test_split_top_level() {
        assert_eq!(
            split_top_level("A;ROW(B;C);LINES[1,2]"),
            vec!["A", "ROW(B;C)", "LINES[1,2]"]
        );
    }

    #[test]
    fn test_extents() {
        let pillar = Pillar {
            horizontal: false,
            prickles: false,
        };
        assert!((pillar.thickness() - 0.875).abs() < 1e-12);
        let cactus = Pillar {
            horizontal: false,
            prickles: true,
        };
        assert!((cactus.thickness() - 1.375).abs() < 1e-12);

        let row = Element::parse("ROW(PILLAR;CACTUS)").unwrap();
        assert!(matches!(row.width(), Extent::Static(w) if (w - 2.25).abs() < 1e-12));
        assert_eq!(row.height(), Extent::Dynamic);
        assert_eq!(Element::parse("ROW(PILLAR;LINES)").unwrap().width(), Extent::Dynamic);
    }

    #[test]
    fn test_row_children_bounds() {
        // PILLAR is 0.875 wide; the two LINES share the rest.
        let row = Element::parse("ROW(PILLAR;LINES;LINES)").unwrap();
        let mut page = Page::new(PageSize::LETTER);
        let rest = row.draw(&mut page, PAGE, &SheetStyle::default());

        assert!((rest.left - 8.5).abs() < 1e-9);
        assert_eq!(rest.top, 0.0);

        // The second LINES starts where the first one's share ends.
        let share = (8.5 - 0.875) / 2.0;
        let starts: Vec<f64> = page
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { x1, y1, y2, .. } if y1 == y2 && *y1 == 0.5 => Some(*x1),
                _ => None,
            })
            .collect();
        assert_eq!(starts.len(), 2);
        assert!((starts[0] - 0.875).abs() < 1e-9);
        assert!((starts[1] - (0.875 + share)).abs() < 1e-9);
    }

    #[test]
    fn test_column_advances_vertically_only() {
        let col = Element::parse("COL(HPILLAR;HPILLAR)").unwrap();
        let mut page = Page::new(PageSize::LETTER);
        let rest = col.draw(&mut page, PAGE, &SheetStyle::default());
        assert!((rest.top - 1.75).abs() < 1e-9);
        assert_eq!(rest.left, 0.0);
    }

    #[test]
    fn test_group_without_dynamic_children() {
        let row = Element::parse("ROW(PILLAR)").unwrap();
        let mut page = Page::new(PageSize::LETTER);
        let rest = row.draw(&mut page, PAGE, &SheetStyle::default());
        assert!((rest.left - 0.875).abs() < 1e-9);
    }

    #[test]
    fn test_pillar_draws_thicknesses() {
        let mut page = Page::new(PageSize::LETTER);
        Element::parse("PILLAR")
            .unwrap()
            .draw(&mut page, PAGE, &SheetStyle { mirror: true });
        let widths: Vec<f64> = page
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::LineWidth(w) => Some(*w),
                _ => None,
            })
            .collect();
        assert_eq!(widths[0], 0.0039);
        assert_eq!(widths[5], 0.0472);
        // six ticks, a separator and six strings
        assert_eq!(page.line_count(), 13);
    }

    #[test]
    fn test_lines_fill_bounds() {
        let mut page = Page::new(PageSize::LETTER);
        let rest = Element::parse("LINES[1]")
            .unwrap()
            .draw(&mut page, Bounds::new(0.0, 0.0, 5.0, 4.0), &SheetStyle::default());
        // y = 1, 2, 3, 4 are all above 5 - padding
        assert_eq!(page.line_count(), 4);
        assert_eq!(rest.height(), 0.0);
    }
}
