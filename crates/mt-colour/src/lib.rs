//! Subtractive paint mixing for mt.
//!
//! Given a goal colour and a palette of paints, [`search`] samples random
//! proportions and reports the mixes that land closest to the goal along
//! with how many grams of each paint to weigh out.
//!
//! - [`colour`] - 16-bit [`Frgb`] colours, hex parsing and image averages
//! - [`palette`] - Named [`Paint`]s from arguments or a JSON file
//! - [`mix`] - The geometric-mean mixing model and the parallel search

mod error;

pub mod colour;
pub mod mix;
pub mod palette;

pub use colour::{average_colour, Frgb};
pub use error::{Error, Result};
pub use mix::{search, Budget, MixResult, SearchOptions, ACRYLIC_G_PER_ML, DEFAULT_MIX_ML};
pub use palette::{load_palette, parse_palette, Paint};
