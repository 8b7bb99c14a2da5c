//! Songsheet layout for mt.
//!
//! Two kinds of sheet are produced here:
//!
//! - [`Element`] trees parsed from a one-line grammar (`ROW(CACTUS;LINES)`)
//!   and drawn by [`render_sheet`] as blank practice sheets
//! - [`Song`] files in the filled text format, laid out in columns of lyrics,
//!   sines, melodies and chord charts
//!
//! [`playback`] turns the timed sines of a song into editor cursor motions.

mod error;
mod sheet;

pub mod elements;
pub mod filled;
pub mod header;
pub mod playback;
pub mod style;

pub use elements::{Element, Extent};
pub use error::{Error, Result};
pub use filled::{FilledOptions, PlaybackTime, Song, SongElement};
pub use header::Header;
pub use playback::Playback;
pub use sheet::{render_sheet, SheetOptions};
pub use style::SheetStyle;
