//! Habit trackers: a row per activity and a column per day.

use std::fs;
use std::path::Path;

use chrono::{Days, NaiveDate};
use mt_common::metrics::string_width;
use mt_common::{Canvas, Document, Font, PageSize};

use crate::{Result, DATE_FORMAT};

const MARGIN: f64 = 0.3;
const ROW_STEP: f64 = 0.2;
const COLUMN_STEP: f64 = 0.2;
const FIRST_ROW: f64 = 1.5;
const DATE_BASELINE: f64 = 1.3;
const RULE_DROP: f64 = 0.07;
const HEADER_RULE_RISE: f64 = 0.13;
const NAME_GAP: f64 = 0.1;
const FONT_PT: f64 = 12.0;

/// Options for [`habit_tracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitOptions {
    pub start: NaiveDate,
    /// Use a landscape page with room for more days.
    pub landscape: bool,
}

/// Activity names from text, one per line; lines under two characters are
/// skipped.
pub fn parse_activities(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|l| l.chars().count() >= 2)
        .map(String::from)
        .collect()
}

/// Read activity names from a file.
pub fn read_activities<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_activities(&text))
}

/// Draw the tracker, adding day columns until the page width is used.
pub fn habit_tracker(activities: &[String], opts: &HabitOptions) -> Document {
    let size = if opts.landscape {
        PageSize::LETTER_LANDSCAPE
    } else {
        PageSize::LETTER
    };
    let max_x = size.width - MARGIN;
    let font = Font::courier(FONT_PT);

    let mut doc = Document::new();
    let page = doc.add_page(size);
    page.set_font(font);

    let mut widest = 0.0_f64;
    for (i, activity) in activities.iter().enumerate() {
        page.text(MARGIN, FIRST_ROW + i as f64 * ROW_STEP, activity);
        widest = widest.max(string_width(&font, activity));
    }
    let last_rule = FIRST_ROW + activities.len().saturating_sub(1) as f64 * ROW_STEP + RULE_DROP;

    let mut x = MARGIN + widest + NAME_GAP;
    page.line(x + RULE_DROP - COLUMN_STEP, MARGIN, x + RULE_DROP - COLUMN_STEP, last_rule);

    let mut right = x + RULE_DROP;
    let mut day = 0;
    loop {
        let Some(date) = opts.start.checked_add_days(Days::new(day)) else {
            break;
        };
        page.text_rotated(x, DATE_BASELINE, 90.0, &date.format(DATE_FORMAT).to_string());
        page.line(x + RULE_DROP, MARGIN, x + RULE_DROP, last_rule);
        right = x + RULE_DROP;

        x += COLUMN_STEP;
        day += 1;
        if x > max_x {
            break;
        }
    }
    log::debug!("{} activities over {} days", activities.len(), day);

    page.line(MARGIN, FIRST_ROW - HEADER_RULE_RISE, right, FIRST_ROW - HEADER_RULE_RISE);
    for i in 0..activities.len() {
        let y = FIRST_ROW + i as f64 * ROW_STEP + RULE_DROP;
        page.line(MARGIN, y, right, y);
    }

    doc
}
