use std::f64::consts::PI;
use std::iter::{repeat_n, RepeatN};

/// Value of a sine at `freq` Hz on `tick`, sampled at `sample_rate`.
#[inline]
pub fn sine_at(freq: f64, tick: usize, sample_rate: u32) -> f64 {
    (tick as f64 * 2.0 * PI * freq / f64::from(sample_rate)).sin()
}

/// A fixed-length run of sine samples starting at phase zero.
///
/// Every segment restarts its tick count, so consecutive tones do not keep
/// phase continuity.
#[derive(Debug, Clone)]
pub struct ToneSegment {
    freq: f64,
    sample_rate: u32,
    tick: usize,
    len: usize,
}

impl ToneSegment {
    pub fn new(freq: f64, sample_rate: u32, len: usize) -> Self {
        Self {
            freq,
            sample_rate,
            tick: 0,
            len,
        }
    }

    /// Fill `out` with the next samples, returning how many were written.
    pub fn render(&mut self, out: &mut [f64]) -> usize {
        let mut written = 0;
        for (slot, sample) in out.iter_mut().zip(self.by_ref()) {
            *slot = sample;
            written += 1;
        }
        written
    }
}

impl Iterator for ToneSegment {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.tick >= self.len {
            return None;
        }
        let sample = sine_at(self.freq, self.tick, self.sample_rate);
        self.tick += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.tick;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ToneSegment {}

/// A sounding tone followed by its silent gap.
pub fn note(freq: f64, sample_rate: u32, tone_len: usize, gap_len: usize) -> Note {
    ToneSegment::new(freq, sample_rate, tone_len).chain(repeat_n(0.0, gap_len))
}

pub type Note = std::iter::Chain<ToneSegment, RepeatN<f64>>;
