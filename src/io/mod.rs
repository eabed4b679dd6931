// Purpose - byte-level output: PCM sample encoding and the WAV header

pub mod pcm;
pub mod wav;

pub use pcm::{encode_sample, write_sample, PCM_GAIN, PCM_LIMIT};
pub use wav::{WavHeader, HEADER_LEN};
