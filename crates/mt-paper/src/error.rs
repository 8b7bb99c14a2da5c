//! Error types for paper generation.

use thiserror::Error;

/// Errors that can occur while laying out paper.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Drawing or output error.
    #[error("{0}")]
    Common(#[from] mt_common::Error),

    /// A date that is not `YYYY-MM-DD`.
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    BadDate(String),

    /// The last date comes before the first.
    #[error("end date {end} is before start date {start}")]
    DateRange { start: String, end: String },

    /// A label entry that is not `label,count`.
    #[error("label entry {0:?} is not in the form label,count")]
    BadLabel(String),

    /// A label count that is not a number.
    #[error("could not read count {count:?} of label entry {entry:?}")]
    BadCount { entry: String, count: String },

    /// More labels than the sheet limit allows.
    #[error("{count} labels requested, at most {max} can be printed")]
    TooManyLabels { count: usize, max: usize },

    /// Grid dimensions that leave no cells.
    #[error("grid does not fit: {0}")]
    BadGrid(String),
}

/// Result type for paper operations.
pub type Result<T> = std::result::Result<T, Error>;
