//! Benchmarks for the length estimators and keyword recovery.
//!
//! The ciphertext is a repeated English paragraph under a 7-letter keyword, measured
//! at a few sizes to show how each stage scales with input length.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vigenere_analysis::estimate::{coincidence, kasiski};
use vigenere_analysis::{
    recover_keyword, transform, Direction, IcScanParams, KasiskiParams, Keyword, Scoring, Text,
};

const PARAGRAPH: &str = "It is a truth universally acknowledged, that a single man in possession \
of a good fortune, must be in want of a wife. However little known the feelings or views of such \
a man may be on his first entering a neighbourhood, this truth is so well fixed in the minds of \
the surrounding families, that he is considered the rightful property of some one or other of \
their daughters.";

/// Sizes in paragraph repetitions.
const SIZES: [usize; 3] = [1, 4, 16];

fn ciphertext(repetitions: usize) -> Text {
    let key = Keyword::new("AUSTENS").unwrap();
    transform(&Text::normalize(&PARAGRAPH.repeat(repetitions)), &key, Direction::Encrypt)
}

fn bench_kasiski(c: &mut Criterion) {
    let mut group = c.benchmark_group("kasiski");
    for size in SIZES {
        let text = ciphertext(size);
        group.throughput(Throughput::Elements(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(text.len()), &text, |b, text| {
            b.iter(|| kasiski::examine(black_box(text), &KasiskiParams::default()).unwrap());
        });
    }
    group.finish();
}

fn bench_ic_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("ic_scan");
    for size in SIZES {
        let text = ciphertext(size);
        group.throughput(Throughput::Elements(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(text.len()), &text, |b, text| {
            b.iter(|| coincidence::scan(black_box(text), &IcScanParams::default()).unwrap());
        });
    }
    group.finish();
}

fn bench_recover(c: &mut Criterion) {
    let mut group = c.benchmark_group("recover_keyword");
    let text = ciphertext(16);
    for (name, scoring) in [("ic_target", Scoring::default()), ("pearson", Scoring::Pearson)] {
        group.bench_function(name, |b| {
            b.iter(|| recover_keyword(black_box(&text), 7, scoring).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kasiski, bench_ic_scan, bench_recover);
criterion_main!(benches);
