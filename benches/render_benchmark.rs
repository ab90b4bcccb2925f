//! Benchmarks for notebook rendering and composition.
//!
//! Run with: cargo bench
//!
//! These benchmarks exercise the engine-independent pipeline stages
//! (extract, render, index, compose) on synthetic notebooks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use nbprint::render::RenderOptions;
use nbprint::Converter;

/// Creates a synthetic notebook with the given number of sections.
///
/// Each section is a heading cell, a math-bearing markdown cell, and a
/// code cell with a stream output.
fn create_test_notebook(section_count: usize) -> Vec<u8> {
    let mut cells = Vec::with_capacity(section_count * 3);
    for i in 0..section_count {
        cells.push(format!(
            r###"{{"cell_type": "markdown", "source": "## Section {}\n\nInline $x_{{{}}}^2$ and $$\\sum_i a_i$$."}}"###,
            i % 7, i
        ));
        cells.push(format!(
            r#"{{"cell_type": "markdown", "source": "Paragraph with a [link](#section-{}) and a | table | head |\n|---|---|\n| a | b |."}}"#,
            i % 7
        ));
        cells.push(format!(
            r#"{{"cell_type": "code", "source": "def step_{}(x):\n    return x ** 2\n", "execution_count": {}, "outputs": [
                {{"output_type": "stream", "name": "stdout", "text": "step {} done\n"}}
            ]}}"#,
            i, i + 1, i
        ));
    }
    format!(
        r#"{{"cells": [{}], "metadata": {{"language_info": {{"name": "python"}}}}}}"#,
        cells.join(",")
    )
    .into_bytes()
}

/// Benchmark notebook extraction.
fn bench_extraction(c: &mut Criterion) {
    let data = create_test_notebook(50);
    c.bench_function("parse_150_cells", |b| {
        b.iter(|| nbprint::parse_bytes(black_box(&data)).unwrap());
    });
}

/// Benchmark full composition (render + index + navigate + compose).
fn bench_composition(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");

    for section_count in [10, 50, 200].iter() {
        let data = create_test_notebook(*section_count);
        let notebook = nbprint::parse_bytes(&data).unwrap();
        let converter = Converter::new(RenderOptions::default().with_title("Benchmark"));

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| converter.compose(black_box(&notebook)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark sequential vs parallel fragment rendering.
fn bench_sequential_rendering(c: &mut Criterion) {
    let data = create_test_notebook(100);
    let notebook = nbprint::parse_bytes(&data).unwrap();
    let sequential = Converter::new(RenderOptions::default().sequential());

    c.bench_function("compose_sequential_100_sections", |b| {
        b.iter(|| sequential.compose(black_box(&notebook)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_extraction,
    bench_composition,
    bench_sequential_rendering,
);
criterion_main!(benches);
