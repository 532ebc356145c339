//! Performance benchmarks for smartmark
//!
//! Run with: cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use smartmark::Options;

/// Sample documents of various sizes
mod samples {
    pub const TINY: &str = "Hello, **world**!";

    pub const SMALL: &str = r#"# Heading

This is a paragraph with *emphasis* and **strong** text.

- Item 1
- Item 2
- Item 3

`inline code` and [a link](https://example.com).
"#;

    pub const MEDIUM: &str = r#"Title: Project Notes
Date: 2024-05-01

# Project Notes

This is a sample file that shows the markup features. "Quotes" and
dashes -- like these -- are typeset when smart punctuation is on.

## Features

- Sections nest by heading depth
- Footnotes[^1] collect at the end
- Links resolve in any order

### Code Example

    fn main() {
        println!("Hello, world!");
    }

## Links

See [the docs][docs] or <https://example.com/>. Mail <me@example.com>.

> This is a quotation with some *emphasized* text. It spans
> two lines.

[docs]: https://docs.rs "Documentation"

[^1]: A footnote body.
"#;

    /// Generate a large document by repeating sections
    pub fn large() -> String {
        let section = r#"
## Section Title

This paragraph contains various inline elements like *emphasis*, **strong**,
`code`, and [links](https://example.com). Mr. Smith said "hello"... Then left.

- First bullet point with **bold** text
- Second bullet point with *italic* text
- Third point with `code`

> A blockquote that spans
> multiple lines.

Another paragraph to add some content. This helps test the parser's ability
to handle longer documents efficiently -- or so we hope.

"#;
        section.repeat(50)
    }

    /// Many potential emphasis openers and closers
    pub fn pathological_emphasis() -> String {
        "*a ".repeat(1000) + &"b* ".repeat(1000)
    }

    /// Deeply nested quotations
    pub fn pathological_nested() -> String {
        "> ".repeat(100) + "deep\n"
    }

    /// Nested link descriptions
    pub fn pathological_brackets() -> String {
        "[".repeat(500) + "x" + &"](/u)".repeat(500)
    }
}

fn smart() -> Options {
    Options {
        smart_punctuation: true,
        ..Options::default()
    }
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    group.throughput(Throughput::Bytes(samples::TINY.len() as u64));
    group.bench_function("tiny", |b| {
        b.iter(|| smartmark::to_html(black_box(samples::TINY)))
    });

    group.throughput(Throughput::Bytes(samples::SMALL.len() as u64));
    group.bench_function("small", |b| {
        b.iter(|| smartmark::to_html(black_box(samples::SMALL)))
    });

    group.throughput(Throughput::Bytes(samples::MEDIUM.len() as u64));
    group.bench_function("medium", |b| {
        b.iter(|| smartmark::to_html(black_box(samples::MEDIUM)))
    });

    let large = samples::large();
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large", |b| {
        b.iter(|| smartmark::to_html(black_box(&large)))
    });

    group.finish();
}

fn bench_typography(c: &mut Criterion) {
    let mut group = c.benchmark_group("typography");
    let options = smart();

    let large = samples::large();
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large_plain", |b| {
        b.iter(|| smartmark::to_html(black_box(&large)))
    });
    group.bench_function("large_smart", |b| {
        b.iter(|| smartmark::to_html_with_options(black_box(&large), &options))
    });

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");

    let large = samples::large();
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("parse_only", |b| {
        b.iter(|| smartmark::parse(black_box(&large)))
    });

    let doc = smartmark::parse(&large);
    group.bench_function("render_only", |b| b.iter(|| black_box(&doc).to_html()));
    group.bench_function("xml_dump", |b| b.iter(|| black_box(&doc).to_xml()));

    group.finish();
}

fn bench_escaping(c: &mut Criterion) {
    let mut group = c.benchmark_group("escaping");

    let plain = "Hello, this is plain text without any special characters. ".repeat(100);
    group.throughput(Throughput::Bytes(plain.len() as u64));
    group.bench_function("plain_text", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(plain.len());
            smartmark::escape::escape_text_into(&mut out, black_box(&plain));
            out
        })
    });

    let html_heavy = "<script>alert('xss')</script> & more <tags> here! ".repeat(100);
    group.throughput(Throughput::Bytes(html_heavy.len() as u64));
    group.bench_function("html_heavy", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(html_heavy.len() * 2);
            smartmark::escape::escape_text_into(&mut out, black_box(&html_heavy));
            out
        })
    });

    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathological");
    group.sample_size(20); // Fewer samples for slow cases

    let emphasis = samples::pathological_emphasis();
    group.throughput(Throughput::Bytes(emphasis.len() as u64));
    group.bench_function("emphasis_explosion", |b| {
        b.iter(|| smartmark::to_html(black_box(&emphasis)))
    });

    let nested = samples::pathological_nested();
    group.throughput(Throughput::Bytes(nested.len() as u64));
    group.bench_function("deep_nesting", |b| {
        b.iter(|| smartmark::to_html(black_box(&nested)))
    });

    let brackets = samples::pathological_brackets();
    group.throughput(Throughput::Bytes(brackets.len() as u64));
    group.bench_function("nested_brackets", |b| {
        b.iter(|| smartmark::to_html(black_box(&brackets)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parsing,
    bench_typography,
    bench_stages,
    bench_escaping,
    bench_pathological
);
criterion_main!(benches);
