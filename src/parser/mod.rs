//! Notebook parsing module.

mod notebook;

pub use notebook::{Notebook, NotebookParser};
