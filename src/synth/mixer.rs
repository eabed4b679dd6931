//! Lock-step fan-in of voice queues.

/*
Lock-step Mixing
================

Every tick the mixer takes exactly one sample from each voice, in voice
order, and emits their sum:

    voice 0:  a0  a1  a2  a3  (closed)
    voice 1:  b0  b1  b2  b3  b4  b5 ...
    mixed:    a0+b0  a1+b1  a2+b2  a3+b3  (closed)

The first voice to close ends the mix. Samples still queued in the other
voices are discarded, so the output is as long as the SHORTEST voice. Pad
short voices with rests ("_") to keep them sounding together.

No normalization happens here: two full-scale sines in phase sum to 2.0.
Clipping is the encoder's job.
*/

use tracing::debug;

use crate::engine::queue::{SampleReceiver, SampleSender};

/// Why the mixer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixEnd {
    /// A voice closed its queue; carries that voice's index.
    VoiceClosed(usize),
    /// There were no voices to mix.
    NoVoices,
    /// Nobody is reading the mixed queue any more.
    OutputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixOutcome {
    pub ticks: usize,
    pub end: MixEnd,
}

pub struct Mixer {
    voices: Vec<SampleReceiver>,
}

impl Mixer {
    pub fn new(voices: Vec<SampleReceiver>) -> Self {
        Self { voices }
    }

    /// Read one sample from every voice and sum them.
    ///
    /// Returns the index of the first closed voice instead.
    pub fn next_tick(&mut self) -> Result<f64, usize> {
        let mut sum = 0.0;
        for (index, voice) in self.voices.iter_mut().enumerate() {
            sum += voice.recv().ok_or(index)?;
        }
        Ok(sum)
    }

    /// Mix until the first voice closes. Dropping `self` on return releases
    /// every voice still blocked on a full queue.
    pub fn run(mut self, mut out: SampleSender) -> MixOutcome {
        let outcome = self.mix_into(&mut out);
        debug!(ticks = outcome.ticks, end = ?outcome.end, "mixer done");
        outcome
    }

    fn mix_into(&mut self, out: &mut SampleSender) -> MixOutcome {
        if self.voices.is_empty() {
            return MixOutcome {
                ticks: 0,
                end: MixEnd::NoVoices,
            };
        }

        let mut ticks = 0;
        loop {
            let sum = match self.next_tick() {
                Ok(sum) => sum,
                Err(voice) => {
                    return MixOutcome {
                        ticks,
                        end: MixEnd::VoiceClosed(voice),
                    }
                }
            };
            if out.send(sum).is_err() {
                return MixOutcome {
                    ticks,
                    end: MixEnd::OutputClosed,
                };
            }
            ticks += 1;
        }
    }
}
