pub mod config;
pub mod dsp; // Sine segments
pub mod engine; // Threads, queues, render entry points
pub mod error;
pub mod io;
pub mod sequencing; // Note names and voice specifications
pub mod synth; // Voice generators and the mixer

pub use config::{HeaderMode, RenderConfig, ToneSyntax};
pub use engine::{mix_voices, render, render_seekable, RenderReport};
pub use error::{Result, SynthError};
