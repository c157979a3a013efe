//! Benchmarks for docmd parsing and rendering.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use docmd::model::{Document, ListInfo, Paragraph, Table, TextRun, TextStyle};
use docmd::render::{self, DocumentAssembler, RenderOptions};

#[path = "../tests/common/mod.rs"]
mod common;

/// A document of `sections` heading + body + list + table groups.
fn synthetic_document(sections: usize) -> Document {
    let mut doc = Document::new();
    doc.add_paragraph(Paragraph::styled("Title", "Benchmark Report"));
    for i in 0..sections {
        doc.add_paragraph(Paragraph::styled("Heading 1", &format!("Section {}", i + 1)));

        let mut body = Paragraph::new();
        body.add_run(TextRun::new("Plain text with "));
        body.add_run(TextRun::bold("bold"));
        body.add_run(TextRun::new(" and ").with_style(TextStyle::default()));
        body.add_run(TextRun::new("a link").with_link("https://example.com"));
        doc.add_paragraph(body);

        for item in 0..5 {
            let level = (item % 2) as u8;
            doc.add_paragraph(
                Paragraph::with_text(&format!("Item {}", item)).with_list(ListInfo::numbered(level)),
            );
        }
        doc.add_table(Table::from_grid([
            vec!["Name", "Value"],
            vec!["alpha", "1"],
            vec!["beta", "2"],
        ]));
    }
    doc
}

fn synthetic_docx(paragraphs: usize) -> Vec<u8> {
    let mut builder = common::DocxBuilder::new().paragraph(Some("Title"), "Benchmark");
    for i in 0..paragraphs {
        builder = builder.paragraph(None, &format!("Paragraph {} of the benchmark body.", i));
    }
    builder.build()
}

/// Benchmark format detection.
fn bench_format_detection(c: &mut Criterion) {
    let docx = synthetic_docx(1);
    let other = b"Not a Word file at all, just random text content";

    c.bench_function("detect_docx", |b| {
        b.iter(|| docmd::detect_format_from_bytes(black_box(&docx)).unwrap());
    });

    c.bench_function("detect_non_word", |b| {
        b.iter(|| docmd::detect_format_from_bytes(black_box(other)).is_err());
    });
}

/// Benchmark package parsing at various sizes.
fn bench_docx_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("docx_parsing");

    for count in [10, 100, 1000].iter() {
        let data = synthetic_docx(*count);
        group.bench_function(format!("{}_paragraphs", count), |b| {
            b.iter(|| docmd::parse_bytes(black_box(&data)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark assembly and Markdown rendering.
fn bench_rendering(c: &mut Criterion) {
    let doc = synthetic_document(50);
    let options = RenderOptions::new();

    c.bench_function("assemble_50_sections", |b| {
        b.iter(|| DocumentAssembler::new(&options).assemble(black_box(&doc)));
    });

    c.bench_function("markdown_50_sections", |b| {
        b.iter(|| render::to_markdown(black_box(&doc), &options).unwrap());
    });

    let normalized = RenderOptions::new().with_heading_normalization(true);
    c.bench_function("markdown_50_sections_normalized", |b| {
        b.iter(|| render::to_markdown(black_box(&doc), &normalized).unwrap());
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_docx_parsing,
    bench_rendering,
);
criterion_main!(benches);
