//! 44-byte RIFF/WAVE header for mono 16-bit PCM.

/*
Header Layout
=============

  offset  size  field
  ------  ----  -----------------------------------------------
     0      4   "RIFF"
     4      4   RIFF chunk size = 36 + data length
     8      4   "WAVE"
    12      4   "fmt "
    16      4   format chunk length (16)
    20      2   format code (1 = PCM)
    22      2   channels (1)
    24      4   sample rate
    28      4   byte rate = sample rate × block align
    32      2   block align = channels × bytes per sample (2)
    34      2   bits per sample (16)
    36      4   "data"
    40      4   data length in bytes

Integers are little-endian. The four-character markers are raw bytes.

The header goes out before any sample, so the data length is a declared
placeholder unless the sink can seek back and patch it afterwards.
*/

use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{Result, SynthError};

pub const HEADER_LEN: usize = 44;
pub const CHANNELS: u16 = 1;
pub const BITS_PER_SAMPLE: u16 = 16;
pub const BYTES_PER_SAMPLE: u16 = BITS_PER_SAMPLE / 8;
pub const PCM_FORMAT: u16 = 1;
pub const FMT_CHUNK_LEN: u32 = 16;
/// Largest data length whose RIFF size still fits in 32 bits.
pub const MAX_DATA_LEN: u32 = u32::MAX - RIFF_OVERHEAD;

const RIFF_OVERHEAD: u32 = (HEADER_LEN - 8) as u32;
const RIFF_SIZE_OFFSET: u64 = 4;
const DATA_LEN_OFFSET: u64 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub riff_size: u32,
    pub format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_len: u32,
}

impl WavHeader {
    /// Mono 16-bit PCM header declaring `data_len` bytes of samples.
    pub fn mono16(sample_rate: u32, data_len: u32) -> Self {
        let block_align = CHANNELS * BYTES_PER_SAMPLE;
        Self {
            riff_size: riff_size(data_len),
            format: PCM_FORMAT,
            channels: CHANNELS,
            sample_rate,
            byte_rate: sample_rate.saturating_mul(u32::from(block_align)),
            block_align,
            bits_per_sample: BITS_PER_SAMPLE,
            data_len,
        }
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&self.to_bytes())?;
        Ok(())
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(b"RIFF");
        LittleEndian::write_u32(&mut bytes[4..8], self.riff_size);
        bytes[8..12].copy_from_slice(b"WAVE");

        bytes[12..16].copy_from_slice(b"fmt ");
        LittleEndian::write_u32(&mut bytes[16..20], FMT_CHUNK_LEN);
        LittleEndian::write_u16(&mut bytes[20..22], self.format);
        LittleEndian::write_u16(&mut bytes[22..24], self.channels);
        LittleEndian::write_u32(&mut bytes[24..28], self.sample_rate);
        LittleEndian::write_u32(&mut bytes[28..32], self.byte_rate);
        LittleEndian::write_u16(&mut bytes[32..34], self.block_align);
        LittleEndian::write_u16(&mut bytes[34..36], self.bits_per_sample);

        bytes[36..40].copy_from_slice(b"data");
        LittleEndian::write_u32(&mut bytes[40..44], self.data_len);
        bytes
    }

    /// Parse a header written by [`WavHeader::write_to`].
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        expect_marker(r, b"RIFF")?;
        let riff_size = r.read_u32::<LittleEndian>()?;
        expect_marker(r, b"WAVE")?;

        expect_marker(r, b"fmt ")?;
        if r.read_u32::<LittleEndian>()? != FMT_CHUNK_LEN {
            return Err(SynthError::InvalidHeader("unexpected fmt chunk length"));
        }
        let format = r.read_u16::<LittleEndian>()?;
        let channels = r.read_u16::<LittleEndian>()?;
        let sample_rate = r.read_u32::<LittleEndian>()?;
        let byte_rate = r.read_u32::<LittleEndian>()?;
        let block_align = r.read_u16::<LittleEndian>()?;
        let bits_per_sample = r.read_u16::<LittleEndian>()?;

        expect_marker(r, b"data")?;
        let data_len = r.read_u32::<LittleEndian>()?;

        Ok(Self {
            riff_size,
            format,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample,
            data_len,
        })
    }

    /// Overwrite the two length fields of a header already at the start of
    /// `w`, then return to where the stream was.
    pub fn patch_lengths<W: Write + Seek>(w: &mut W, data_len: u32) -> Result<()> {
        let end = w.stream_position()?;
        w.seek(SeekFrom::Start(RIFF_SIZE_OFFSET))?;
        w.write_u32::<LittleEndian>(riff_size(data_len))?;
        w.seek(SeekFrom::Start(DATA_LEN_OFFSET))?;
        w.write_u32::<LittleEndian>(data_len)?;
        w.seek(SeekFrom::Start(end))?;
        Ok(())
    }

    /// Seconds of audio the header claims.
    pub fn duration_seconds(&self) -> f64 {
        if self.byte_rate == 0 {
            return 0.0;
        }
        f64::from(self.data_len) / f64::from(self.byte_rate)
    }
}

fn riff_size(data_len: u32) -> u32 {
    data_len.saturating_add(RIFF_OVERHEAD)
}

fn expect_marker<R: Read>(r: &mut R, marker: &'static [u8; 4]) -> Result<()> {
    let mut found = [0u8; 4];
    r.read_exact(&mut found)?;
    if &found != marker {
        return Err(SynthError::InvalidHeader(match marker {
            b"RIFF" => "missing RIFF marker",
            b"WAVE" => "missing WAVE marker",
            b"fmt " => "missing fmt marker",
            _ => "missing data marker",
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn header_is_44_bytes() {
        let mut out = Vec::new();
        WavHeader::mono16(8_000, 0).write_to(&mut out).unwrap();
        assert_eq!(out.len(), HEADER_LEN);
    }

    #[test]
    fn fields_at_fixed_offsets() {
        let bytes = WavHeader::mono16(44_100, 1_000).to_bytes();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 1_036);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32::from_le_bytes(bytes[16..20].try_into().unwrap()), 16);
        assert_eq!(u16::from_le_bytes([bytes[20], bytes[21]]), 1);
        assert_eq!(u16::from_le_bytes([bytes[22], bytes[23]]), 1);
        assert_eq!(u32::from_le_bytes(bytes[24..28].try_into().unwrap()), 44_100);
        assert_eq!(u32::from_le_bytes(bytes[28..32].try_into().unwrap()), 88_200);
        assert_eq!(u16::from_le_bytes([bytes[32], bytes[33]]), 2);
        assert_eq!(u16::from_le_bytes([bytes[34], bytes[35]]), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32::from_le_bytes(bytes[40..44].try_into().unwrap()), 1_000);
    }

    #[test]
    fn streamed_and_array_headers_agree() {
        let header = WavHeader {
            riff_size: 0x0102_0304,
            format: 0xfffe,
            channels: 2,
            sample_rate: u32::MAX,
            byte_rate: 0x0a0b_0c0d,
            block_align: 4,
            bits_per_sample: 24,
            data_len: MAX_DATA_LEN,
        };
        let mut out = Vec::new();
        header.write_to(&mut out).unwrap();
        assert_eq!(out, header.to_bytes());
        assert_eq!(WavHeader::read_from(&mut Cursor::new(out)).unwrap(), header);
    }

    #[test]
    fn round_trip_nine_hundred_seconds() {
        let data_len = 8_000 * 2 * 900;
        let header = WavHeader::mono16(8_000, data_len);
        let mut out = Vec::new();
        header.write_to(&mut out).unwrap();

        let parsed = WavHeader::read_from(&mut Cursor::new(out)).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(parsed.format, 1);
        assert_eq!(parsed.channels, 1);
        assert_eq!(parsed.bits_per_sample, 16);
        assert_eq!(parsed.sample_rate, 8_000);
        assert_eq!(parsed.duration_seconds(), 900.0);
    }

    #[test]
    fn riff_size_saturates() {
        let header = WavHeader::mono16(8_000, u32::MAX);
        assert_eq!(header.riff_size, u32::MAX);
    }

    #[test]
    fn rejects_foreign_marker() {
        let mut bytes = WavHeader::mono16(8_000, 0).to_bytes();
        bytes[8..12].copy_from_slice(b"AVI ");
        let err = WavHeader::read_from(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, SynthError::InvalidHeader("missing WAVE marker")));
    }

    #[test]
    fn truncated_header_is_io_error() {
        let bytes = WavHeader::mono16(8_000, 0).to_bytes();
        let err = WavHeader::read_from(&mut Cursor::new(&bytes[..20])).unwrap_err();
        assert!(matches!(err, SynthError::Io(_)));
    }

    #[test]
    fn patch_rewrites_lengths_only() {
        let mut cursor = Cursor::new(Vec::new());
        WavHeader::mono16(8_000, 123_456).write_to(&mut cursor).unwrap();
        cursor.write_all(&[1, 2, 3, 4]).unwrap();

        WavHeader::patch_lengths(&mut cursor, 4).unwrap();
        assert_eq!(cursor.position(), 48);

        let bytes = cursor.into_inner();
        let parsed = WavHeader::read_from(&mut &bytes[..]).unwrap();
        assert_eq!(parsed, WavHeader::mono16(8_000, 4));
        assert_eq!(&bytes[44..], [1, 2, 3, 4]);
    }
}
