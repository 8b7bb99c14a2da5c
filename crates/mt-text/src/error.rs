//! Error types for the text helpers.

use thiserror::Error;

/// Errors that can occur in the text helpers.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walking error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Invalid file name pattern.
    #[error("pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Unreadable path while matching a pattern.
    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),

    /// Regular expression error.
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A line index past the end of the file.
    #[error("line {line} is past the end of a {len} line file")]
    LineOutOfRange { line: usize, len: usize },

    /// A line range that ends before it starts.
    #[error("line range {start}..={end} is empty")]
    BadRange { start: usize, end: usize },
}

/// Result type for text helpers.
pub type Result<T> = std::result::Result<T, Error>;
