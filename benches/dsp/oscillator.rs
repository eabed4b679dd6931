//! Benchmarks for sine segment generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tonewave::dsp::oscillator::{note, ToneSegment};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f64; size];

        // Block render - sin() per sample
        group.bench_with_input(BenchmarkId::new("segment", size), &size, |b, &size| {
            b.iter(|| {
                let mut seg = ToneSegment::new(black_box(440.0), 44_100, size);
                seg.render(black_box(&mut buffer))
            })
        });

        // Tone plus gap through the iterator chain
        group.bench_with_input(BenchmarkId::new("note", size), &size, |b, &size| {
            b.iter(|| note(black_box(440.0), 44_100, size, size / 5).sum::<f64>())
        });
    }

    group.finish();
}
