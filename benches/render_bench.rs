//! Benchmarks for rank construction, sample queries, and rendering.
//!
//! Corpus sizes simulate realistic inputs: a short article, a long
//! article, and a small book, tokenised by whitespace.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use quill::{Pen, RandomPicker, StringRelation, Token, token};

const WORDS: &[&str] = &[
    "the", "a", "and", "of", "to", "in", "cat", "dog", "house", "river", "stone", "light",
    "dark", "wind", "rain", "road", "tree", "bird", "song", "night", "day", "fire", "water",
    "earth", "sky", "cloud", "mountain", "valley", "field", "garden", "door", "window",
];

/// Deterministic pseudo-text: word choice driven by a simple LCG so the
/// corpus has realistic repetition without pulling in fixtures.
fn synthetic_corpus(len: usize) -> Vec<Token> {
    let mut state = 0x2545_f491_4f6c_dd1du64;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let index = (state >> 33) as usize % WORDS.len();
            token(WORDS[index])
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &size in &[1_000usize, 10_000] {
        let corpus = synthetic_corpus(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &corpus, |b, corpus| {
            b.iter(|| {
                Pen::new(
                    black_box(corpus.clone()),
                    StringRelation::Ordinal,
                    None,
                    false,
                )
            });
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let corpus = synthetic_corpus(10_000);
    let pen = Pen::new(corpus, StringRelation::Ordinal, None, false);
    let bigram = vec![token("the"), token("cat")];

    let mut group = c.benchmark_group("query");
    group.bench_function("count_bigram", |b| {
        b.iter(|| pen.count(black_box(&bigram)));
    });
    group.bench_function("positions_bigram", |b| {
        b.iter(|| pen.positions_of(black_box(&bigram)));
    });
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let corpus = synthetic_corpus(10_000);
    let pen = Pen::new(corpus, StringRelation::Ordinal, None, false);

    let mut group = c.benchmark_group("render");
    group.throughput(Throughput::Elements(100));
    for &window in &[1usize, 3] {
        group.bench_with_input(
            BenchmarkId::new("tokens_100", window),
            &window,
            |b, &window| {
                b.iter(|| {
                    pen.render(window, RandomPicker::from_seed(7), None)
                        .unwrap()
                        .take(100)
                        .map(|item| item.unwrap())
                        .count()
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_queries, bench_render);
criterion_main!(benches);
