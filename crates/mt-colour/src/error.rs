//! Error types for colour mixing.

use thiserror::Error;

/// Errors that can occur while reading colours or searching mixes.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Palette file error.
    #[error("palette error: {0}")]
    Palette(#[from] serde_json::Error),

    /// A colour that is not `#rrggbb`.
    #[error("invalid colour {0:?}, expected #rrggbb")]
    BadHex(String),

    /// A paint argument that is not `name=#rrggbb`.
    #[error("invalid paint {0:?}, expected name=#rrggbb")]
    BadPaint(String),

    /// An image with no pixels.
    #[error("image has no pixels")]
    EmptyImage,

    /// Nothing to mix.
    #[error("no input paints to mix")]
    NoInputs,
}

/// Result type for colour operations.
pub type Result<T> = std::result::Result<T, Error>;
