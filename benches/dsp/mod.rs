//! Benchmarks for the per-sample primitives.

mod encode;
mod oscillator;

pub use encode::bench_encode;
pub use oscillator::bench_oscillator;
