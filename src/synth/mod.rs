// Purpose: the concurrent stages of the pipeline
// Voice generators feed their own queues; the mixer drains them in lock-step

pub mod mixer;
pub mod voice;

pub use mixer::{MixEnd, MixOutcome, Mixer};
pub use voice::{run_voice, Voice, VoiceOutcome};
