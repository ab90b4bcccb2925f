//! Document model types for notebook content representation.
//!
//! This module defines the intermediate representation that bridges
//! notebook parsing and markup rendering. Cells are extracted once and
//! immutable thereafter; fragments, outline entries, and the composed
//! document are built fresh per conversion run.

mod cell;
mod document;

pub use cell::{Cell, CellContent, CellKind, OutputData};
pub use document::{Document, Fragment, OutlineEntry, TitlePage};
