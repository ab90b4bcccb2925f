//! End-to-end conversion tests against a mock render engine.
//!
//! The engine seam lets the pipeline run without a browser: the mock
//! session returns canned artifact bytes and a configurable typesetting
//! signal.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use nbprint::render::RenderOptions;
use nbprint::{
    Converter, EngineSession, EngineState, Error, PageSetup, RenderEngine, Result,
};

const MOCK_PDF: &[u8] = b"%PDF-1.7\n% nbprint mock artifact\n";

/// Mock engine whose typesetting signal is scripted.
struct MockEngine {
    signal: bool,
}

impl RenderEngine for MockEngine {
    fn load(&self, html: &str) -> Result<Box<dyn EngineSession>> {
        assert!(html.contains("<!DOCTYPE html>"));
        Ok(Box::new(MockSession {
            signal: self.signal,
            state: EngineState::TypesettingWait,
        }))
    }
}

struct MockSession {
    signal: bool,
    state: EngineState,
}

impl EngineSession for MockSession {
    fn wait_for_signal(&mut self, _timeout: Duration) -> Result<bool> {
        self.state = if self.signal {
            EngineState::Ready
        } else {
            EngineState::TimedOut
        };
        Ok(self.signal)
    }

    fn paginate(&mut self, _setup: &PageSetup) -> Result<Vec<u8>> {
        self.state = EngineState::Done;
        Ok(MOCK_PDF.to_vec())
    }

    fn state(&self) -> EngineState {
        self.state
    }
}

fn converter(signal: bool, options: RenderOptions) -> Converter {
    Converter::with_engine(Box::new(MockEngine { signal }), options)
}

fn sample_ipynb(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("sample.ipynb");
    fs::write(
        &path,
        r##"{"cells": [
            {"cell_type": "markdown", "source": "# Introduction\n\nInline math $x^2$."},
            {"cell_type": "code", "source": "print(\"hello\")", "outputs": [
                {"output_type": "stream", "name": "stdout", "text": "hello\n"}
            ]}
        ]}"##,
    )
    .unwrap();
    path
}

#[test]
fn test_end_to_end_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_ipynb(&dir);
    let output = dir.path().join("sample.pdf");

    let result = converter(true, RenderOptions::default())
        .convert_file(&input, &output)
        .unwrap();

    assert_eq!(result.output_path, output);
    assert_eq!(fs::read(&output).unwrap(), MOCK_PDF);
    assert_eq!(result.bytes_written, MOCK_PDF.len() as u64);
    assert_eq!(result.heading_count, 1);
    assert!(result.typeset_complete);
}

#[test]
fn test_timeout_still_produces_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_ipynb(&dir);
    let output = dir.path().join("degraded.pdf");

    // Completion signal never fires; the run degrades instead of aborting.
    let result = converter(false, RenderOptions::default())
        .convert_file(&input, &output)
        .unwrap();

    assert!(!result.typeset_complete);
    assert!(output.exists());
    assert_eq!(fs::read(&output).unwrap(), MOCK_PDF);
}

#[test]
fn test_strict_timeout_aborts_without_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_ipynb(&dir);
    let output = dir.path().join("strict.pdf");

    let err = converter(false, RenderOptions::default().strict_typesetting())
        .convert_file(&input, &output)
        .unwrap_err();

    assert!(matches!(err, Error::RenderTimeout { .. }));
    assert!(!output.exists(), "no artifact may be written on strict timeout");
}

#[test]
fn test_malformed_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("never.pdf");

    let err = converter(true, RenderOptions::default())
        .convert_bytes(br#"{"cells": [{"source": "missing type tag"}]}"#, &output)
        .unwrap_err();

    assert!(matches!(err, Error::MalformedInput(_)));
    assert!(!output.exists());
}

#[test]
fn test_title_page_controlled_by_options() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_ipynb(&dir);

    let with_title = converter(true, RenderOptions::default().with_title("Sample Report"));
    let notebook = nbprint::parse_file(&input).unwrap();
    let html = with_title.compose(&notebook).unwrap();
    assert!(html.contains("id=\"title-page\""));
    assert!(html.contains("Sample Report"));

    let without_title = converter(true, RenderOptions::default());
    let html = without_title.compose(&notebook).unwrap();
    assert!(!html.contains("id=\"title-page\""));
}

#[test]
fn test_invalid_color_aborts_before_engine() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_ipynb(&dir);
    let output = dir.path().join("color.pdf");

    let err = converter(true, RenderOptions::default().with_accent_color("mauve"))
        .convert_file(&input, &output)
        .unwrap_err();

    assert!(matches!(err, Error::InvalidColor(_)));
    assert!(!output.exists());
}
