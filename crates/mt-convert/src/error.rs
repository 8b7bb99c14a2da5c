//! Error types for mt-convert.

use thiserror::Error;

/// Error type for expression evaluation and unit conversion.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// A character that cannot start any token.
    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { offset: usize, found: char },

    /// A token in a position where it is not allowed.
    #[error("unexpected {found} at offset {offset}")]
    UnexpectedToken { offset: usize, found: String },

    /// The expression ended early.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// A malformed number literal.
    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    /// A variable with no value bound to it.
    #[error("unknown variable {0:?}")]
    UnknownVariable(String),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// No direct or single-step conversion between the units.
    #[error("unknown conversion from {from} to {to}")]
    UnknownConversion { from: String, to: String },

    /// Conversion arguments in the wrong shape.
    #[error("{0}")]
    BadArguments(String),
}

/// Result type alias using the convert Error type.
pub type Result<T> = std::result::Result<T, Error>;
