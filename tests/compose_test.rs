//! Integration tests for document composition.

use nbprint::render::{Composer, RenderOptions};
use nbprint::{parse_bytes, Converter, Document, Error, Fragment, OutlineEntry};

fn sample_notebook() -> nbprint::Notebook {
    parse_bytes(
        br##"{"cells": [
            {"cell_type": "markdown", "source": "# Introduction\n\nInline math $x^2$ here."},
            {"cell_type": "code", "source": "print(\"hello\")", "execution_count": 1, "outputs": [
                {"output_type": "stream", "name": "stdout", "text": "hello\n"}
            ]}
        ], "metadata": {"language_info": {"name": "python"}}}"##,
    )
    .unwrap()
}

#[test]
fn test_composed_document_structure() {
    let converter = Converter::new(RenderOptions::default().with_title("Demo"));
    let html = converter.compose(&sample_notebook()).unwrap();

    // Fixed order: title page, toc, body.
    let title_pos = html.find("id=\"title-page\"").expect("title page present");
    let toc_pos = html.find("id=\"table-of-contents\"").expect("toc present");
    let body_pos = html.find("<main class=\"notebook\">").expect("body present");
    assert!(title_pos < toc_pos && toc_pos < body_pos);

    // Typesetting bootstrap and completion marker contract.
    assert!(html.contains("mathjax@3"));
    assert!(html.contains("window.__nbprintTypesetDone"));
}

#[test]
fn test_math_delimiters_survive_composition() {
    let converter = Converter::new(RenderOptions::default());
    let html = converter.compose(&sample_notebook()).unwrap();
    assert!(html.contains("\\(x^2\\)"), "math must pass through untypeset");
}

#[test]
fn test_toc_absent_when_disabled() {
    let converter = Converter::new(RenderOptions::default().with_toc(false));
    let html = converter.compose(&sample_notebook()).unwrap();
    assert!(!html.contains("table-of-contents"));
}

#[test]
fn test_title_page_only_with_title() {
    let converter = Converter::new(RenderOptions::default());
    let html = converter.compose(&sample_notebook()).unwrap();
    assert!(!html.contains("id=\"title-page\""));
}

#[test]
fn test_outline_entry_for_sample() {
    let converter = Converter::new(RenderOptions::default());
    let document = converter.build_document(&sample_notebook()).unwrap();
    assert_eq!(document.heading_count(), 1);
    assert_eq!(document.outline[0].text, "Introduction");
    assert_eq!(document.outline[0].level, 1);
    assert_eq!(document.outline[0].anchor, "introduction");
}

#[test]
fn test_code_output_rendered() {
    let converter = Converter::new(RenderOptions::default());
    let html = converter.compose(&sample_notebook()).unwrap();
    assert!(html.contains("In&nbsp;[1]:"));
    assert!(html.contains("hello"));
}

#[test]
fn test_dangling_anchor_rejected_before_rendering() {
    let document = Document::new(
        vec![Fragment::new(0, "<p>body without the heading</p>")],
        vec![OutlineEntry {
            level: 2,
            text: "Missing".into(),
            anchor: "missing".into(),
            cell_index: 0,
        }],
    );
    let err = Composer::new(RenderOptions::default())
        .compose(&document)
        .unwrap_err();
    assert!(matches!(err, Error::Composition(_)));
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_composition_is_deterministic() {
    let converter = Converter::new(RenderOptions::default().with_title("Same"));
    let notebook = sample_notebook();
    let first = converter.compose(&notebook).unwrap();
    let second = converter.compose(&notebook).unwrap();
    assert_eq!(first, second);
}
