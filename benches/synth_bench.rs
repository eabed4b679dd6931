//! Benchmarks for signal generation, encoding and the threaded pipeline.
//!
//! Run with: cargo bench
//!
//! Offline rendering has no hard deadline, but a render should stay far
//! faster than real time. At 44.1kHz one second of audio per voice is
//! 44_100 samples.
//!
//! Benchmark groups:
//!   - dsp/*        Tone segments and PCM encoding
//!   - scenarios/*  Full renders through voice, mixer and writer threads

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Block sizes fed to the per-sample primitives.
pub const BLOCK_SIZES: &[usize] = &[256, 4_096, 22_050];

criterion_group!(
    benches,
    // Primitives
    dsp::bench_oscillator,
    dsp::bench_encode,
    // Threaded renders
    scenarios::bench_render,
);
criterion_main!(benches);
