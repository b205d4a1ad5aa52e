//! Performance benchmarks for article-gravity.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - Small synthetic HTML (~2KB) for both presets
//! - Synthetic pages of growing size, to check scaling with the number of blocks
//! - Candidate selection alone, on a pre-parsed document

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use article_gravity::scoring::ScoringEngine;
use article_gravity::{dom, extract, extract_with_configuration, STANDARD, STANDARD_WITH_IMAGES};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article</title>
    <style>body { font-family: serif; }</style>
    <script>window.analytics = [];</script>
</head>
<body>
    <div id="nav" class="navigation">
        <a href="/">Home</a>
        <a href="/about">About</a>
    </div>
    <div class="article-body">
        <h1>Sample Article Title</h1>
        <p class="byline">By Jane Doe</p>
        <figure>
            <img src="/images/lead.jpg" width="800" height="450" alt="Lead photo showing the harbour at sunrise">
            <figcaption>The harbour at sunrise.</figcaption>
        </figure>
        <p>This is the first paragraph of the article. It contains some meaningful
        content that should be picked by the gravity scoring, being long enough to
        count as a real paragraph rather than a caption or a teaser line.</p>
        <p>Here is a second paragraph with more content. The extraction should
        preserve the text while removing navigation and other boilerplate.<br>
        It also carries a line break that turns into a separator.</p>
        <p>A third paragraph ensures we have enough content for meaningful
        benchmarking of the extraction performance on a typical page.</p>
        <!-- end of article -->
    </div>
    <div class="sidebar">
        <h3>Related Articles</h3>
        <ul>
            <li><a href="/1">Related article 1</a></li>
            <li><a href="/2">Related article 2</a></li>
        </ul>
    </div>
    <div class="ad" style="display:none">Buy now</div>
    <div id="footer"><p>Copyright 2024</p></div>
</body>
</html>
"#;

fn synthetic_page(blocks: usize) -> String {
    let mut html = String::from("<html><body>");
    for i in 0..blocks {
        html.push_str(&format!(
            r#"<div class="block-{i}"><h2>Block {i}</h2><p>Paragraph {i} with enough words in it to be counted as body text by the scoring engine, and then some more words.</p><div class="comment">Short note {i}</div></div>"#
        ));
    }
    html.push_str("</body></html>");
    html
}

fn bench_extract_default(c: &mut Criterion) {
    c.bench_function("extract_default", |b| {
        b.iter(|| extract(black_box(SAMPLE_HTML)));
    });
}

fn bench_extract_with_images(c: &mut Criterion) {
    c.bench_function("extract_with_images", |b| {
        b.iter(|| extract_with_configuration(black_box(SAMPLE_HTML), black_box(&STANDARD_WITH_IMAGES)));
    });
}

fn bench_synthetic_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthetic");

    for blocks in [10, 100, 1000] {
        let html = synthetic_page(blocks);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("extract", blocks), &html, |b, html| {
            b.iter(|| extract(black_box(html)));
        });
    }

    group.finish();
}

fn bench_select_candidate(c: &mut Criterion) {
    let html = synthetic_page(100);
    let engine = ScoringEngine::new(&STANDARD);

    c.bench_function("select_candidate", |b| {
        b.iter_batched(
            || dom::parse(&html),
            |doc| engine.select_candidate(black_box(&doc)).scores.len(),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_extract_default,
    bench_extract_with_images,
    bench_synthetic_pages,
    bench_select_candidate
);
criterion_main!(benches);
