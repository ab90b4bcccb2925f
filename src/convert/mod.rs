//! Conversion pipeline: notebook → composed document → paginated PDF.
//!
//! One [`Converter`] run executes the stages in fixed order: extract
//! cells, render fragments, index the outline, build navigation,
//! compose the document, then drive the render engine. No artifact is
//! written unless pagination succeeds; the typesetting timeout is the
//! only degradation allowed to produce output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::{ChromiumEngine, RenderEngine};
use crate::error::{Error, Result};
use crate::model::{Document, TitlePage};
use crate::parser::{Notebook, NotebookParser};
use crate::render::{apply_anchors, scan, Composer, HtmlRenderer, RenderOptions};

/// Notebook-to-PDF converter.
pub struct Converter {
    engine: Box<dyn RenderEngine>,
    options: RenderOptions,
}

impl Converter {
    /// Create a converter backed by headless Chromium.
    pub fn new(options: RenderOptions) -> Self {
        Self::with_engine(Box::new(ChromiumEngine::new()), options)
    }

    /// Create a converter with a custom render engine.
    pub fn with_engine(engine: Box<dyn RenderEngine>, options: RenderOptions) -> Self {
        Self { engine, options }
    }

    /// Convert a notebook file, writing the artifact to `output`.
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<ConvertResult> {
        let notebook = NotebookParser::open(input)?.parse()?;
        self.run(&notebook, output.as_ref())
    }

    /// Convert notebook bytes, writing the artifact to `output`.
    pub fn convert_bytes<Q: AsRef<Path>>(
        &self,
        data: &[u8],
        output: Q,
    ) -> Result<ConvertResult> {
        let notebook = NotebookParser::from_bytes(data)?.parse()?;
        self.run(&notebook, output.as_ref())
    }

    /// Build the indexed document for a parsed notebook.
    pub fn build_document(&self, notebook: &Notebook) -> Result<Document> {
        let mut body = HtmlRenderer::new(self.options.clone()).render(notebook)?;
        let outline = scan(&body);
        apply_anchors(&mut body, &outline);

        let mut document = Document::new(body, outline);
        if self.options.include_title_page {
            if let Some(title) = &self.options.title {
                document = document.with_title_page(TitlePage {
                    title: title.clone(),
                    subtitle: self.options.subtitle.clone(),
                    accent_color: self.options.accent_color.clone(),
                });
            }
        }
        Ok(document)
    }

    /// Compose the full HTML document for a parsed notebook.
    pub fn compose(&self, notebook: &Notebook) -> Result<String> {
        let document = self.build_document(notebook)?;
        Composer::new(self.options.clone()).compose(&document)
    }

    fn run(&self, notebook: &Notebook, output: &Path) -> Result<ConvertResult> {
        let document = self.build_document(notebook)?;
        let html = Composer::new(self.options.clone()).compose(&document)?;

        let mut session = self.engine.load(&html)?;
        let typeset_complete = session.wait_for_signal(self.options.typeset_timeout)?;
        if !typeset_complete {
            if self.options.fail_on_typeset_timeout {
                return Err(Error::RenderTimeout {
                    waited: self.options.typeset_timeout,
                });
            }
            log::warn!(
                "typesetting did not signal completion within {:?}; paginating anyway",
                self.options.typeset_timeout
            );
        }

        let bytes = session.paginate(&self.options.page)?;
        fs::write(output, &bytes)?;

        Ok(ConvertResult {
            output_path: output.to_path_buf(),
            bytes_written: bytes.len() as u64,
            heading_count: document.heading_count(),
            typeset_complete,
        })
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Where the artifact was written
    pub output_path: PathBuf,

    /// Artifact size in bytes
    pub bytes_written: u64,

    /// Number of outline headings
    pub heading_count: usize,

    /// False if the typesetting wait timed out and the artifact was
    /// produced in degraded form
    pub typeset_complete: bool,
}

impl ConvertResult {
    /// Artifact size in kilobytes.
    pub fn size_kb(&self) -> f64 {
        self.bytes_written as f64 / 1024.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::NotebookParser;

    fn converter(options: RenderOptions) -> Converter {
        // Document building and composition never touch the engine.
        Converter::new(options)
    }

    fn notebook(json: &str) -> Notebook {
        NotebookParser::from_json(json).unwrap().parse().unwrap()
    }

    #[test]
    fn test_build_document_indexes_outline() {
        let nb = notebook(
            r###"{"cells": [
                {"cell_type": "markdown", "source": "# Introduction"},
                {"cell_type": "markdown", "source": "## Introduction"}
            ]}"###,
        );
        let doc = converter(RenderOptions::default()).build_document(&nb).unwrap();
        assert_eq!(doc.heading_count(), 2);
        assert_eq!(doc.outline[0].anchor, "introduction");
        assert_eq!(doc.outline[1].anchor, "introduction-1");
        assert!(doc.body[0].html.contains("id=\"introduction\""));
    }

    #[test]
    fn test_title_page_requires_title() {
        let nb = notebook(r#"{"cells": []}"#);

        let doc = converter(RenderOptions::default()).build_document(&nb).unwrap();
        assert!(doc.title_page.is_none());

        let doc = converter(RenderOptions::default().with_title("T"))
            .build_document(&nb)
            .unwrap();
        assert_eq!(doc.title_page.as_ref().unwrap().title, "T");

        let doc = converter(
            RenderOptions::default()
                .with_title("T")
                .with_title_page(false),
        )
        .build_document(&nb)
        .unwrap();
        assert!(doc.title_page.is_none());
    }

    #[test]
    fn test_compose_end_to_end_html() {
        let nb = notebook(
            r##"{"cells": [
                {"cell_type": "markdown", "source": "# Introduction\n\nInline $x^2$ math."},
                {"cell_type": "code", "source": "print(\"hello\")", "outputs": []}
            ]}"##,
        );
        let html = converter(RenderOptions::default()).compose(&nb).unwrap();
        assert!(html.contains("id=\"introduction\""));
        assert!(html.contains("\\(x^2\\)"));
        assert!(html.contains("table-of-contents"));
    }
}
