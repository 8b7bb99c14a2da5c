//! Mason jar labels: 24 to a Letter sheet in three columns of eight.

use chrono::NaiveDate;
use mt_common::{Canvas, Document, Font, PageSize};

use crate::{Error, Result, DATE_FORMAT};

const COLUMNS: usize = 3;
const ROWS: usize = 8;
const TEXT_INSET: f64 = 0.4;
const DATE_DROP: f64 = 0.5;
const LINE_STEP: f64 = 0.2;

/// Most labels printed in one run, a hundred sheets.
pub const MAX_LABELS: usize = COLUMNS * ROWS * 100;

/// Expand a `label,count;label,count` list into one entry per label.
///
/// Empty entries are skipped.
pub fn parse_labels(list: &str) -> Result<Vec<String>> {
    let mut labels = Vec::new();
    for entry in list.split(';') {
        if entry.is_empty() {
            continue;
        }

        let parts: Vec<&str> = entry.split(',').collect();
        let [label, count] = parts.as_slice() else {
            return Err(Error::BadLabel(entry.to_string()));
        };
        let count: usize = count.trim().parse().map_err(|_| Error::BadCount {
            entry: entry.to_string(),
            count: count.to_string(),
        })?;
        let total = labels.len().saturating_add(count);
        if total > MAX_LABELS {
            return Err(Error::TooManyLabels {
                count: total,
                max: MAX_LABELS,
            });
        }
        labels.extend(std::iter::repeat(label.to_string()).take(count));
    }
    Ok(labels)
}

/// Lay out `labels`, each dated and carrying the optional common text.
///
/// More than 24 labels continue onto further sheets.
pub fn mason_labels(common: Option<&str>, labels: &[String], date: NaiveDate) -> Document {
    let size = PageSize::LETTER;
    let date = date.format(DATE_FORMAT).to_string();
    let common = common.filter(|c| !c.is_empty());
    let cell_w = size.width / COLUMNS as f64;
    let cell_h = size.height / ROWS as f64;

    let mut doc = Document::new();
    for sheet in labels.chunks(COLUMNS * ROWS) {
        let page = doc.add_page(size);
        page.set_font(Font::courier_bold(12.0));
        for (i, label) in sheet.iter().enumerate() {
            let x = (i % COLUMNS) as f64 * cell_w + TEXT_INSET;
            let y = (i / COLUMNS) as f64 * cell_h + DATE_DROP;
            page.text(x, y, &date);
            if let Some(common) = common {
                page.text(x, y + LINE_STEP, common);
            }
            page.text(x, y + 2.0 * LINE_STEP, label);
        }
    }
    log::info!("{} labels on {} sheets", labels.len(), doc.page_count());
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_common::DrawOp;

    #[test]
    fn test_parse_labels() {
        let labels = parse_labels("rice,2;;beans,1").unwrap();
        assert_eq!(labels, vec!["rice", "rice", "beans"]);
        assert!(parse_labels("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_labels_errors() {
        assert!(matches!(parse_labels("rice"), Err(Error::BadLabel(_))));
        assert!(matches!(parse_labels("rice,1,2"), Err(Error::BadLabel(_))));
        assert!(matches!(
            parse_labels("rice,two"),
            Err(Error::BadCount { .. })
        ));
    }

    #[test]
    fn test_parse_labels_limit() {
        assert!(matches!(
            parse_labels("jam,9999999"),
            Err(Error::TooManyLabels { count: 9999999, max: MAX_LABELS })
        ));
        assert!(matches!(
            parse_labels("jam,2000;rice,401"),
            Err(Error::TooManyLabels { count: 2401, .. })
        ));
        assert_eq!(parse_labels("jam,2400").unwrap().len(), MAX_LABELS);
    }

    #[test]
    fn test_mason_labels() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let labels = parse_labels("rice,4").unwrap();
        let doc = mason_labels(Some("pantry"), &labels, date);
        assert_eq!(doc.page_count(), 1);

        let texts: Vec<&str> = doc.pages()[0].texts().collect();
        assert_eq!(texts.len(), 12);
        assert_eq!(&texts[..3], &["2024-03-05", "pantry", "rice"]);

        // the fourth label starts the second row
        let fourth = doc.pages()[0]
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .nth(9)
            .unwrap();
        assert!((fourth.0 - 0.4).abs() < 1e-9);
        assert!((fourth.1 - (11.0 / 8.0 + 0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_mason_labels_overflow() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let labels = parse_labels("jam,30").unwrap();
        let doc = mason_labels(None, &labels, date);
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages()[1].texts().count(), 12);
    }
}
