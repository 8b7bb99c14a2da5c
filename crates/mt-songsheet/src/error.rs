//! Error types for songsheet parsing and layout.

use thiserror::Error;

/// Errors that can occur while parsing or laying out a songsheet.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Drawing or output error.
    #[error("{0}")]
    Common(#[from] mt_common::Error),

    /// Element parameter expression error.
    #[error("{0}")]
    Convert(#[from] mt_convert::Error),

    /// Text that is not a known element.
    #[error("could not parse element: {0:?}")]
    UnknownElement(String),

    /// An element with parameters it does not accept.
    #[error("bad parameters for {0:?}")]
    BadParameters(String),

    /// The song is missing its title and keyword lines.
    #[error("improper number of input lines, want at least 2 have {0}")]
    MissingHeader(usize),

    /// A melody line that cannot be read.
    #[error("melody at line {line}: {message}")]
    Melody { line: usize, message: String },

    /// No sine curve to size the lyrics from.
    #[error("could not find a sine curve to determine the lyric font size")]
    NoSine,

    /// Invalid column count.
    #[error("number of columns must be at least 1")]
    NoColumns,

    /// Playback position cannot be resolved.
    #[error("playback: {0}")]
    Playback(String),
}

/// Result type for songsheet operations.
pub type Result<T> = std::result::Result<T, Error>;
