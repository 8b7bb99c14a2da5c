//! Error types for mt-common.

use thiserror::Error;

/// Common error type for drawing and output operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown output format name.
    #[error("unknown output format {0:?}, expected \"pdf\" or \"svg\"")]
    UnknownFormat(String),

    /// The document has no pages to render.
    #[error("document has no pages")]
    EmptyDocument,

    /// SVG writing error.
    #[error("SVG error: {0}")]
    Svg(String),

    /// The requested output format was compiled out.
    #[error("{0} output is not enabled in this build")]
    FormatDisabled(&'static str),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
