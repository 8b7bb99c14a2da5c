//! mt - a multitool of small, independent utilities.
//!
//! This crate provides a unified interface to the mt library crates.
//!
//! # Crates
//!
//! - [`mt_common`] - Page geometry, the drawing canvas, PDF and SVG output
//! - [`mt_convert`] - Arithmetic expressions and unit conversion
//! - [`mt_songsheet`] - Songsheet element grammar, filled songs and playback
//! - [`mt_paper`] - Grid paper, jar labels, rip-off calendars, habit trackers
//! - [`mt_colour`] - Subtractive paint mixing search
//! - [`mt_text`] - Tables of contents, editor helpers and other text tools
//!
//! # Example
//!
//! ```no_run
//! use mt::prelude::*;
//!
//! let song = Song::parse(&std::fs::read_to_string("wild-horses.txt")?)?;
//! let doc = song.render(&FilledOptions::default())?;
//! let format = OutputFormat::Pdf;
//! let written = doc.save(format.file_name(&song.file_stem()), format)?;
//! println!("{}", written[0].display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use mt_colour as colour;
pub use mt_common as common;
pub use mt_convert as convert;
pub use mt_paper as paper;
pub use mt_songsheet as songsheet;
pub use mt_text as text;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use mt_colour::{average_colour, search, Budget, Frgb, MixResult, Paint, SearchOptions};
    pub use mt_common::{Bounds, Canvas, Document, OutputFormat, Page, PageSize};
    pub use mt_convert::{convert, evaluate, ConversionTable, Converted, Request};
    pub use mt_paper::{grid_paper, habit_tracker, mason_labels, rip_days, GridOptions, HabitOptions};
    pub use mt_songsheet::{render_sheet, Element, FilledOptions, Playback, SheetOptions, Song};
    pub use mt_text::{generate_password, table_of_contents, Charset};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
