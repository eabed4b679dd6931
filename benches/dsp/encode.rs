//! Benchmarks for PCM encoding.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tonewave::io::pcm::{encode_block, write_sample};

use crate::BLOCK_SIZES;

pub fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/encode");

    for &size in BLOCK_SIZES {
        // Mixed signal that crosses the clamp limits
        let samples: Vec<f64> = (0..size).map(|i| (i as f64 * 0.01).sin() * 5.0).collect();
        let mut bytes = Vec::with_capacity(size * 2);

        group.bench_with_input(BenchmarkId::new("block", size), &size, |b, _| {
            b.iter(|| {
                bytes.clear();
                encode_block(black_box(&samples), &mut bytes);
            })
        });

        group.bench_with_input(BenchmarkId::new("per_sample", size), &size, |b, _| {
            b.iter(|| {
                bytes.clear();
                for &s in &samples {
                    write_sample(&mut bytes, black_box(s)).unwrap();
                }
            })
        });
    }

    group.finish();
}
