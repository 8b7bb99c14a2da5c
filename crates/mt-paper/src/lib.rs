//! Printable paper for mt.
//!
//! Each generator returns a [`mt_common::Document`] ready to be saved as PDF
//! or SVG:
//!
//! - [`grid`] - Square grid paper centred on the page
//! - [`masonjar`] - Dated labels, 24 to a sheet
//! - [`ripdays`] - A tear-off daily calendar, nine days to a sheet
//! - [`habits`] - A habit tracker with a row per activity and a column per day

mod error;

pub mod grid;
pub mod habits;
pub mod masonjar;
pub mod ripdays;

pub use error::{Error, Result};
pub use grid::{grid_paper, GridOptions};
pub use habits::{habit_tracker, parse_activities, read_activities, HabitOptions};
pub use masonjar::{mason_labels, parse_labels};
pub use ripdays::rip_days;

use chrono::NaiveDate;

/// Date format used on every sheet.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| Error::BadDate(text.to_string()))
}
