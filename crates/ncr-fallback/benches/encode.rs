//! Benchmark – `ncr_fallback::FallbackEncoder`
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ncr_fallback::FallbackEncoder;

/// Produce a deterministic text of `len` characters in which every
/// `stride`-th character has no Shift_JIS representation.
fn make_text(len: usize, stride: usize) -> String {
    (0..len)
        .map(|i| {
            if stride != 0 && i % stride == 0 {
                '\u{1f600}'
            } else if i % 2 == 0 {
                '\u{3042}'
            } else {
                'a'
            }
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let encoder = FallbackEncoder::shift_jis();
    let mut group = c.benchmark_group("encode_shift_jis");

    for &stride in &[0usize, 100, 10, 1] {
        let text = make_text(10_000, stride);
        group.bench_with_input(BenchmarkId::new("encode", stride), &text, |b, text| {
            b.iter(|| {
                let bytes = encoder.encode(black_box(text)).unwrap();
                black_box(bytes);
            });
        });
        group.bench_with_input(BenchmarkId::new("escape", stride), &text, |b, text| {
            b.iter(|| {
                let escaped = encoder.escape(black_box(text)).unwrap();
                black_box(escaped);
            });
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(5))
            .measurement_time(Duration::from_secs(10));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_encode }
criterion_main!(benches);
