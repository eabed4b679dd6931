//! Mixed samples to signed 16-bit little-endian PCM.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

/// Maps the nominal [-1, 1] signal range onto [-8000, 8000].
///
/// Leaves room for four voices in phase before the clamp kicks in.
pub const PCM_GAIN: f64 = 8_000.0;
/// Encoded samples never leave [-PCM_LIMIT, PCM_LIMIT].
pub const PCM_LIMIT: f64 = 32_000.0;

/// Scale, clamp and narrow one mixed sample.
///
/// Out-of-range values stick to the limit instead of wrapping around.
/// The fractional part is truncated toward zero.
#[inline]
pub fn encode_sample(mixed: f64) -> i16 {
    (mixed * PCM_GAIN).clamp(-PCM_LIMIT, PCM_LIMIT) as i16
}

pub fn write_sample<W: Write>(w: &mut W, mixed: f64) -> std::io::Result<()> {
    w.write_i16::<LittleEndian>(encode_sample(mixed))
}

/// Encode a whole block of samples into a byte buffer.
pub fn encode_block(samples: &[f64], out: &mut Vec<u8>) {
    out.reserve(samples.len() * 2);
    for &sample in samples {
        out.extend_from_slice(&encode_sample(sample).to_le_bytes());
    }
}
