/*
Tone Table
==========

Maps note names to frequencies in the equal-tempered scale, anchored at
A4 = 440 Hz.

Each half step multiplies the frequency by the twelfth root of two, so a
note `n` half steps away from A4 sounds at:

    f = 440 × 2^(n / 12)

Twelve half steps double the frequency, which is why C5 is twice C4.

Naming:
- Lower case pitch letters, sharps only: a, a#, b, c, c#, d, d#, e, f, f#, g, g#
- Octave numbers change at C (scientific pitch notation), so b3 is followed
  by c4, and the table walks a0, a#0, b0, c1, ..., b8, c9, ..., g#9.
- "_" is a rest and sounds at 0 Hz (sin(0) = 0 for every tick).

Transposition shifts every entry by the same number of half steps, so
"a4" no longer means 440 Hz when transpose != 0.
*/

use std::collections::HashMap;

/// Reference pitch of A4 in Hz.
pub const A4_HZ: f64 = 440.0;
/// Token that produces silence.
pub const REST: &str = "_";

pub const CHROMATIC_SCALE: [&str; 12] = [
    "a", "a#", "b", "c", "c#", "d", "d#", "e", "f", "f#", "g", "g#",
];

/// Number of passes over the chromatic scale.
const OCTAVES: u32 = 9;
/// The table starts this many half steps below A4.
const HALF_STEPS_BELOW_ANCHOR: f64 = 4.0 * 12.0;

/// Read-only note name to frequency lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneTable {
    tones: HashMap<String, f64>,
}

impl ToneTable {
    pub fn new(transpose_steps: f64) -> Self {
        let mut tones = HashMap::with_capacity(CHROMATIC_SCALE.len() * OCTAVES as usize + 1);
        let mut octave = 0u32;
        let mut half_step = transpose_steps - HALF_STEPS_BELOW_ANCHOR;

        while octave < OCTAVES {
            for note in CHROMATIC_SCALE {
                if note == "c" {
                    octave += 1;
                }
                tones.insert(format!("{note}{octave}"), frequency(half_step));
                half_step += 1.0;
            }
        }

        tones.insert(REST.to_string(), 0.0);
        Self { tones }
    }

    pub fn get(&self, token: &str) -> Option<f64> {
        self.tones.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tones.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.tones.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl Default for ToneTable {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Frequency of the note `half_steps` away from A4.
pub fn frequency(half_steps: f64) -> f64 {
    A4_HZ * 2.0_f64.powf(half_steps / 12.0)
}
