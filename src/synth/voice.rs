use tracing::debug;

use crate::{
    config::RenderConfig,
    dsp::oscillator::note,
    engine::queue::SampleSender,
    error::Result,
    sequencing::{ToneTable, VoiceSpec},
};

/// One melodic line with every token already resolved to Hz.
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    index: usize,
    frequencies: Vec<f64>,
    sample_rate: u32,
    tone_len: usize,
    gap_len: usize,
}

/// How far a voice got before its queue closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceOutcome {
    pub voice: usize,
    pub samples_sent: usize,
    /// `false` when the mixer stopped listening before the voice ran out.
    pub finished: bool,
}

impl Voice {
    pub fn new(
        index: usize,
        spec: &VoiceSpec,
        config: &RenderConfig,
        table: &ToneTable,
    ) -> Result<Self> {
        let frequencies = spec.resolve(index, config.tone_syntax, table)?;
        Ok(Self::from_frequencies(index, frequencies, config))
    }

    pub fn from_frequencies(index: usize, frequencies: Vec<f64>, config: &RenderConfig) -> Self {
        Self {
            index,
            frequencies,
            sample_rate: config.sample_rate,
            tone_len: config.tone_len(),
            gap_len: config.gap_len(),
        }
    }

    /// Total number of samples this voice produces.
    pub fn len(&self) -> usize {
        self.frequencies.len() * (self.tone_len + self.gap_len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every sample of the voice, tone after tone.
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.frequencies
            .iter()
            .flat_map(|&freq| note(freq, self.sample_rate, self.tone_len, self.gap_len))
    }

    /// Stream the voice into `tx`. The queue closes when `tx` drops at the end.
    pub fn play(self, mut tx: SampleSender) -> VoiceOutcome {
        let (samples_sent, finished) = match tx.send_all(self.samples()) {
            Ok(sent) => (sent, true),
            Err((sent, _closed)) => (sent, false),
        };
        debug!(
            voice = self.index,
            tones = self.frequencies.len(),
            samples_sent,
            finished,
            "voice done"
        );
        VoiceOutcome {
            voice: self.index,
            samples_sent,
            finished,
        }
    }
}

/// Body of a voice generator thread.
///
/// Resolution happens before the first sample; on failure `tx` is dropped
/// unused, which closes the queue and lets the mixer wind down.
pub fn run_voice(
    index: usize,
    arg: &str,
    config: &RenderConfig,
    table: &ToneTable,
    tx: SampleSender,
) -> Result<VoiceOutcome> {
    let spec = VoiceSpec::parse(arg);
    debug!(voice = index, tokens = spec.len(), "voice starting");
    let voice = Voice::new(index, &spec, config, table)?;
    Ok(voice.play(tx))
}
