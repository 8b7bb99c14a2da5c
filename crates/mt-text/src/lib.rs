//! Text helpers for mt.
//!
//! - [`toc`] - Markdown table of contents for a folder of notes
//! - [`vim`] - Line edits meant to be called from an editor
//! - [`csv`] - Keep only the last column of each line
//! - [`slack`] - Tidy a pasted chat log
//! - [`mirror`] - Extend numbered frames so they play back and forth
//! - [`password`] - Random passwords from the OS random source

mod error;

pub mod csv;
pub mod mirror;
pub mod password;
pub mod slack;
pub mod toc;
pub mod vim;

pub use error::{Error, Result};
pub use mirror::mirror_numbered;
pub use password::{generate_password, Charset};
pub use slack::clean_chat;
pub use toc::table_of_contents;
