//! Document-level types: fragments, outline, title page.

use serde::{Deserialize, Serialize};

/// A rendered markup fragment, one per cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    /// Index of the cell this fragment was rendered from
    pub cell_index: usize,

    /// HTML markup
    pub html: String,
}

impl Fragment {
    /// Create a new fragment.
    pub fn new(cell_index: usize, html: impl Into<String>) -> Self {
        Self {
            cell_index,
            html: html.into(),
        }
    }

    /// Check if the fragment renders to nothing (e.g. raw cells).
    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

/// One heading in the document outline.
///
/// Entries form a flat ordered list; consumers reconstruct hierarchy
/// from `level`. Anchors are unique within a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level, 1..=4
    pub level: u8,

    /// Heading text with inline tags stripped
    pub text: String,

    /// Unique anchor id used as the navigation target
    pub anchor: String,

    /// Index of the cell the heading appears in
    pub cell_index: usize,
}

/// Title page configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitlePage {
    /// Document title
    pub title: String,

    /// Optional subtitle shown under the title
    pub subtitle: Option<String>,

    /// Accent color as a hex string (e.g. "#41395f")
    pub accent_color: String,
}

/// A fully indexed document, ready for composition.
///
/// Invariants: outline entries are ordered consistently with their
/// appearance in `body`, and every anchor resolves to exactly one
/// heading in `body`. The composer verifies this before handing the
/// document to the render engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Optional title page, shown first
    pub title_page: Option<TitlePage>,

    /// Ordered outline used to build navigation
    pub outline: Vec<OutlineEntry>,

    /// Ordered body fragments
    pub body: Vec<Fragment>,
}

impl Document {
    /// Create a document from body fragments and an outline.
    pub fn new(body: Vec<Fragment>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title_page: None,
            outline,
            body,
        }
    }

    /// Attach a title page.
    pub fn with_title_page(mut self, title_page: TitlePage) -> Self {
        self.title_page = Some(title_page);
        self
    }

    /// Number of headings in the outline.
    pub fn heading_count(&self) -> usize {
        self.outline.len()
    }

    /// Concatenated body markup.
    pub fn body_html(&self) -> String {
        self.body
            .iter()
            .map(|f| f.html.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_is_empty() {
        assert!(Fragment::new(0, "").is_empty());
        assert!(!Fragment::new(0, "<p>hi</p>").is_empty());
    }

    #[test]
    fn test_document_body_html() {
        let doc = Document::new(
            vec![Fragment::new(0, "<p>a</p>"), Fragment::new(1, "<p>b</p>")],
            vec![],
        );
        assert_eq!(doc.body_html(), "<p>a</p>\n<p>b</p>");
        assert_eq!(doc.heading_count(), 0);
    }

    #[test]
    fn test_document_with_title_page() {
        let doc = Document::new(vec![], vec![]).with_title_page(TitlePage {
            title: "Report".into(),
            subtitle: None,
            accent_color: "#41395f".into(),
        });
        assert!(doc.title_page.is_some());
    }
}
