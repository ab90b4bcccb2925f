//! # nbprint
//!
//! Notebook-to-PDF conversion library for Rust.
//!
//! Converts Jupyter notebooks (nbformat 4) into paginated PDF documents
//! with rendered math formulas, an optional title page, and an
//! auto-generated table of contents with working internal links.
//!
//! ## Quick Start
//!
//! ```no_run
//! use nbprint::NbPrint;
//!
//! fn main() -> nbprint::Result<()> {
//!     let result = NbPrint::new()
//!         .with_title("Numerical Methods")
//!         .with_subtitle("Lecture Notes")
//!         .convert("notes.ipynb", "notes.pdf")?;
//!
//!     println!("{} ({:.1} KB)", result.output_path.display(), result.size_kb());
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Extract**: notebook JSON → ordered, typed cell sequence
//! - **Render**: one styled HTML fragment per cell; math delimiters pass
//!   through verbatim for MathJax
//! - **Index**: headings h1–h4 get unique anchor ids, collisions
//!   deduplicated deterministically
//! - **Navigate**: table of contents and title page fragments
//! - **Compose**: one self-contained HTML document
//! - **Paginate**: headless Chromium waits for typesetting, then prints
//!   to a fixed page size

pub mod convert;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{ConvertResult, Converter};
pub use engine::{ChromiumEngine, EngineSession, EngineState, RenderEngine};
pub use error::{Error, Result};
pub use model::{Cell, CellContent, CellKind, Document, Fragment, OutlineEntry, TitlePage};
pub use parser::{Notebook, NotebookParser};
pub use render::{Margins, PageSetup, PageSize, RenderOptions, DEFAULT_ACCENT_COLOR};

use std::path::Path;
use std::time::Duration;

/// Parse a notebook file into its cell sequence.
///
/// # Example
///
/// ```no_run
/// let notebook = nbprint::parse_file("analysis.ipynb").unwrap();
/// println!("cells: {}", notebook.cell_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Notebook> {
    NotebookParser::open(path)?.parse()
}

/// Parse a notebook from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Notebook> {
    NotebookParser::from_bytes(data)?.parse()
}

/// Convert a notebook file to PDF with default options.
///
/// # Example
///
/// ```no_run
/// nbprint::convert_file("analysis.ipynb", "analysis.pdf").unwrap();
/// ```
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<ConvertResult> {
    Converter::new(RenderOptions::default()).convert_file(input, output)
}

/// Convert a notebook file to PDF with custom options.
pub fn convert_file_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: RenderOptions,
) -> Result<ConvertResult> {
    Converter::new(options).convert_file(input, output)
}

/// Compose the self-contained HTML document for a notebook file without
/// paginating it.
pub fn compose_html<P: AsRef<Path>>(input: P, options: RenderOptions) -> Result<String> {
    let notebook = parse_file(input)?;
    Converter::new(options).compose(&notebook)
}

/// Builder for notebook conversions.
///
/// # Example
///
/// ```no_run
/// use nbprint::{NbPrint, PageSize};
///
/// let result = NbPrint::new()
///     .with_title("Report")
///     .with_accent_color("#006699")
///     .with_page_size(PageSize::Letter)
///     .without_toc()
///     .convert("report.ipynb", "report.pdf")?;
/// # Ok::<(), nbprint::Error>(())
/// ```
pub struct NbPrint {
    options: RenderOptions,
}

impl NbPrint {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: RenderOptions::default(),
        }
    }

    /// Set the title page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_title(title);
        self
    }

    /// Set the title page subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.options = self.options.with_subtitle(subtitle);
        self
    }

    /// Set the accent color (hex string).
    pub fn with_accent_color(mut self, color: impl Into<String>) -> Self {
        self.options = self.options.with_accent_color(color);
        self
    }

    /// Omit the table of contents.
    pub fn without_toc(mut self) -> Self {
        self.options = self.options.with_toc(false);
        self
    }

    /// Omit the title page.
    pub fn without_title_page(mut self) -> Self {
        self.options = self.options.with_title_page(false);
        self
    }

    /// Set the paper size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.options = self.options.with_page(PageSetup::new(size));
        self
    }

    /// Set the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        let size = self.options.page.size;
        self.options = self
            .options
            .with_page(PageSetup::new(size).with_margins(margins));
        self
    }

    /// Set the typesetting wait bound.
    pub fn with_typeset_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_typeset_timeout(timeout);
        self
    }

    /// Fail instead of degrading when typesetting times out.
    pub fn strict_typesetting(mut self) -> Self {
        self.options = self.options.strict_typesetting();
        self
    }

    /// Render cell fragments sequentially.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Run the conversion with the default Chromium engine.
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
        self,
        input: P,
        output: Q,
    ) -> Result<ConvertResult> {
        Converter::new(self.options).convert_file(input, output)
    }

    /// Run the conversion with a custom render engine.
    pub fn convert_with_engine<P: AsRef<Path>, Q: AsRef<Path>>(
        self,
        engine: Box<dyn RenderEngine>,
        input: P,
        output: Q,
    ) -> Result<ConvertResult> {
        Converter::with_engine(engine, self.options).convert_file(input, output)
    }

    /// The accumulated options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

impl Default for NbPrint {
    fn default() -> Self {
        Self::new()
    }
}
