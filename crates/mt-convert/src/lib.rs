//! Expression evaluation and unit conversion for mt.
//!
//! - [`expr`] - A recursive-descent arithmetic evaluator with variables
//! - [`units`] - The unit alias list and conversion table, with single-step
//!   intermediary lookup

mod error;

pub mod expr;
pub mod units;

pub use error::{Error, Result};
pub use expr::{evaluate, evaluate_with, Expr};
pub use units::{convert, Converted, ConversionTable, Request, Value};
