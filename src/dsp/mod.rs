//! Low-level signal math used by the voice generators.
//!
//! Nothing here allocates or touches threads; the pipeline in
//! [`crate::synth`] drives these iterators sample by sample.

/// Sine tone segments and the gap that follows each note.
pub mod oscillator;

pub use oscillator::{note, sine_at, ToneSegment};
