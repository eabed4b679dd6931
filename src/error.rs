//! Error type shared by every stage of the render pipeline.

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SynthError>;

/// Anything that aborts a render.
///
/// Generators and the mixer hand these back through their thread handles;
/// the orchestrator in [`crate::engine`] is the only place that decides to
/// stop the run.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("unknown tone {token:?} in voice {voice}")]
    UnknownTone { voice: usize, token: String },

    #[error("cannot parse frequency {token:?} in voice {voice}")]
    InvalidFrequency { voice: usize, token: String },

    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid wav header: {0}")]
    InvalidHeader(&'static str),

    #[error("header patching needs a seekable sink")]
    PatchUnsupported,

    #[error("worker thread {0} panicked")]
    WorkerPanicked(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
