//! Whole-render benchmarks.
//!
//! These spawn the real voice and mixer threads, so they also measure
//! queue hand-off cost.

mod render;

pub use render::bench_render;
