//! Cell types extracted from a notebook.

use serde::{Deserialize, Serialize};

/// One unit of notebook content in the extracted sequence.
///
/// Notebook cell records appear in their original order; a code cell's
/// execution outputs follow it immediately as their own `Cell` records.
/// `index` is the position in the extracted sequence and is stable for
/// the lifetime of a conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Position in the extracted sequence
    pub index: usize,

    /// Cell content
    pub content: CellContent,
}

impl Cell {
    /// Create a new cell.
    pub fn new(index: usize, content: CellContent) -> Self {
        Self { index, content }
    }

    /// Get the kind of this cell.
    pub fn kind(&self) -> CellKind {
        match self.content {
            CellContent::Markdown { .. } => CellKind::Markdown,
            CellContent::Code { .. } => CellKind::Code,
            CellContent::Raw { .. } => CellKind::Raw,
            CellContent::Output(_) => CellKind::Output,
            CellContent::Error { .. } => CellKind::Error,
        }
    }
}

/// Cell kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// Markdown prose
    Markdown,
    /// Executable source code
    Code,
    /// Raw passthrough content (not rendered)
    Raw,
    /// Execution output attached to a preceding code cell
    Output,
    /// Execution error attached to a preceding code cell
    Error,
}

/// Content of a single cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CellContent {
    /// Markdown source text.
    Markdown {
        /// Raw markdown source
        source: String,
    },

    /// Code source text.
    Code {
        /// Raw code source, whitespace preserved exactly
        source: String,

        /// Kernel execution counter, if the cell was executed
        execution_count: Option<i64>,
    },

    /// Raw cell content, carried through extraction but not rendered.
    Raw {
        /// Raw source text
        source: String,
    },

    /// Execution output.
    Output(OutputData),

    /// Execution error. Never dropped during rendering.
    Error {
        /// Exception name
        name: String,

        /// Exception message
        message: String,

        /// Traceback lines (may contain ANSI escape sequences)
        traceback: Vec<String>,
    },
}

/// Payload of an execution output, reduced to its richest representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputData {
    /// Stream output (stdout/stderr), text verbatim.
    Stream {
        /// Stream text
        text: String,

        /// True for the stderr stream
        stderr: bool,
    },

    /// Plain text result.
    Text {
        /// Result text
        text: String,
    },

    /// Image payload, embedded inline so the artifact stays portable.
    Image {
        /// MIME type (e.g. "image/png")
        media_type: String,

        /// Base64-encoded image bytes
        data: String,
    },

    /// Rich HTML payload (tabular reprs and similar).
    Html {
        /// HTML fragment
        html: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_kind() {
        let cell = Cell::new(
            0,
            CellContent::Code {
                source: "print(1)".into(),
                execution_count: Some(1),
            },
        );
        assert_eq!(cell.kind(), CellKind::Code);

        let cell = Cell::new(
            1,
            CellContent::Output(OutputData::Text { text: "1".into() }),
        );
        assert_eq!(cell.kind(), CellKind::Output);
    }

    #[test]
    fn test_error_cell_kind() {
        let cell = Cell::new(
            2,
            CellContent::Error {
                name: "ValueError".into(),
                message: "bad value".into(),
                traceback: vec![],
            },
        );
        assert_eq!(cell.kind(), CellKind::Error);
    }
}
