// Purpose: turning textual voices into frequencies

pub mod tones;
pub mod voice_spec;

pub use tones::{ToneTable, REST};
pub use voice_spec::VoiceSpec;
