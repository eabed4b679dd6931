//! Render settings consumed by the pipeline.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynthError};

pub const DEFAULT_SAMPLE_RATE: u32 = 8_000;
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;
/// Length advertised in the header before the real length is known.
pub const DEFAULT_DECLARED_SECONDS: u32 = 900;

/// What to put in front of the PCM stream.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// WAV header with a placeholder data length, never revisited.
    #[default]
    Declared,
    /// WAV header rewritten with the true lengths once rendering is done.
    /// Needs a seekable sink.
    Patched,
    /// Raw little-endian PCM.
    Omitted,
}

/// How voice tokens are turned into frequencies.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToneSyntax {
    /// Note names looked up in the tone table (`c4`, `a#3`, `_`).
    #[default]
    Notes,
    /// Literal frequencies in Hz (`220`, `440.5`).
    Hertz,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub sample_rate: u32,
    /// Global offset in semitones applied to the whole tone table.
    pub transpose: f64,
    pub header: HeaderMode,
    pub tone_syntax: ToneSyntax,
    pub declared_seconds: u32,
    /// Slots per bounded queue, voice and mixed queues alike.
    pub queue_capacity: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            transpose: 0.0,
            header: HeaderMode::default(),
            tone_syntax: ToneSyntax::default(),
            declared_seconds: DEFAULT_DECLARED_SECONDS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn transpose(mut self, steps: f64) -> Self {
        self.transpose = steps;
        self
    }

    pub fn header(mut self, header: HeaderMode) -> Self {
        self.header = header;
        self
    }

    pub fn tone_syntax(mut self, syntax: ToneSyntax) -> Self {
        self.tone_syntax = syntax;
        self
    }

    pub fn declared_seconds(mut self, seconds: u32) -> Self {
        self.declared_seconds = seconds;
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Samples in one sounding tone (half a second).
    pub fn tone_len(&self) -> usize {
        self.sample_rate as usize / 2
    }

    /// Samples in the silent gap after each tone (a tenth of a second).
    pub fn gap_len(&self) -> usize {
        self.sample_rate as usize / 10
    }

    /// Placeholder data length written into a declared header.
    pub fn declared_data_len(&self) -> u32 {
        let bytes = u64::from(self.sample_rate)
            * u64::from(crate::io::wav::BYTES_PER_SAMPLE)
            * u64::from(self.declared_seconds);
        bytes.min(u64::from(crate::io::wav::MAX_DATA_LEN)) as u32
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(SynthError::InvalidConfig(
                "sample rate must be positive".into(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(SynthError::InvalidConfig(
                "queue capacity must be positive".into(),
            ));
        }
        if !self.transpose.is_finite() {
            return Err(SynthError::InvalidConfig(format!(
                "transpose must be finite, got {}",
                self.transpose
            )));
        }
        Ok(())
    }
}
