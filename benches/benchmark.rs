//! Performance benchmarks for rs-clearhtml.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks cover the full string-to-string pipeline (parse, clean,
//! serialize) plus the tree-level cleaning pass on a pre-parsed document.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rs_clearhtml::{clean_html, clean_with_options, parse, Options};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article</title>
    <style>.hero { color: red; }</style>
</head>
<body>
    <div id="wrapper" class="page">
        <div class="article-body">
            <h1>Sample Article Title</h1>
            <div>This is the first paragraph of the article. It carries some
            meaningful content that survives cleanup.</div>
            <div>Here is a second block with <b>bold</b> and <i>italic</i>
            markup that gets normalized along the way.</div>
            <ul><li>point one</li><li>point two</li><li>point three</li></ul>
            <div class="twitter-tweet"><p>An embedded tweet</p>
            <script async src="https://platform.twitter.com/widgets.js"></script></div>
            <figure><img src="/img/photo.jpg" alt="a photo">
            <figcaption>The caption</figcaption></figure>
            <script>trackPageView();</script>
        </div>
    </div>
</body>
</html>
"#;

fn bench_clean_html(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean_html");
    group.throughput(Throughput::Bytes(SAMPLE_HTML.len() as u64));
    group.bench_function("default", |b| {
        b.iter(|| clean_html(black_box(SAMPLE_HTML)));
    });
    group.finish();
}

fn bench_clean_tree(c: &mut Criterion) {
    let options = Options::default();
    c.bench_function("clean_tree_preparsed", |b| {
        b.iter_batched(
            || parse(SAMPLE_HTML),
            |tree| clean_with_options(black_box(&tree), &options),
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_large_document(c: &mut Criterion) {
    // A realistically sized page: the sample body repeated.
    let large: String = SAMPLE_HTML.repeat(50);
    let mut group = c.benchmark_group("clean_html_large");
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("50x", |b| {
        b.iter(|| clean_html(black_box(&large)));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_clean_html,
    bench_clean_tree,
    bench_large_document
);
criterion_main!(benches);
