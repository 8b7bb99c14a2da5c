//! Common drawing utilities for mt.
//!
//! This crate provides the foundation every sheet-producing command draws on:
//!
//! - [`Bounds`] - Rectangular page regions measured in inches from the top-left corner
//! - [`Canvas`] - The drawing surface trait elements render into
//! - [`Page`] / [`Document`] - Recorded drawing operations, rendered to PDF or SVG
//! - [`NullCanvas`] - A canvas that discards everything, used for measuring passes
//! - [`metrics`] - Empirical Courier font metrics shared by the layout code

mod bounds;
mod canvas;
mod document;
mod error;
mod pdf;
#[cfg(feature = "svg-output")]
mod svg;

pub mod metrics;

pub use bounds::{Bounds, PageSize};
pub use canvas::{Canvas, DrawOp, Font, FontFamily, LineCap, NullCanvas, Page};
pub use document::{Document, OutputFormat};
pub use error::{Error, Result};
