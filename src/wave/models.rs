//! Core data structures decoded from a RIFF/WAVE file.
//!
//! Each struct mirrors one chunk of the on-disk format. All multi-byte
//! integers are little-endian in the file; they are stored here in native
//! representation after decoding.

use std::fmt;

use super::error::{Result, WavError};

/// Audio format code for uncompressed linear PCM samples.
pub const FORMAT_PCM: u16 = 0x0001;
/// Audio format code for IEEE floating-point samples.
pub const FORMAT_IEEE_FLOAT: u16 = 0x0003;

/// A four-byte chunk or form identifier.
///
/// Tags are compared by exact byte equality, never case-folded, and are
/// not required to be printable ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const RIFF: FourCC = FourCC(*b"RIFF");
    pub const WAVE: FourCC = FourCC(*b"WAVE");
    pub const FMT: FourCC = FourCC(*b"fmt ");
    pub const DATA: FourCC = FourCC(*b"data");
    pub const FACT: FourCC = FourCC(*b"fact");
    pub const CUE: FourCC = FourCC(*b"cue ");

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for FourCC {
    fn from(bytes: [u8; 4]) -> Self {
        FourCC(bytes)
    }
}

impl fmt::Display for FourCC {
    /// Renders printable ASCII directly and escapes everything else,
    /// so arbitrary vendor tags are safe to log.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if (0x20..0x7f).contains(&b) {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

/// Format descriptor decoded from the "fmt " chunk.
///
/// Populated by the first "fmt " chunk encountered; a later occurrence
/// overwrites it wholesale (last wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtChunk {
    /// Audio format code (1 = PCM, 3 = IEEE float, others unsupported).
    pub audio_format: u16,
    pub num_channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

impl Default for FmtChunk {
    /// The descriptor in effect before any "fmt " chunk has been seen:
    /// PCM with all other fields zero.
    fn default() -> Self {
        FmtChunk {
            audio_format: FORMAT_PCM,
            num_channels: 0,
            sample_rate: 0,
            byte_rate: 0,
            block_align: 0,
            bits_per_sample: 0,
        }
    }
}

/// Sample data decoded from the "data" chunk.
///
/// The bytes are kept exactly as they appear in the file: interleaved,
/// little-endian, not converted to any sample type. `audio_format` and
/// `bits_per_sample` are copied from the format descriptor in effect when
/// the chunk was decoded, since only that descriptor defines how these
/// bytes are to be interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataChunk {
    /// Declared payload size in bytes, excluding any pad byte.
    pub size: u32,
    pub audio_format: u16,
    pub bits_per_sample: u16,
    /// Raw sample bytes in file order, exactly `size` long.
    pub samples: Vec<u8>,
}

/// Sample count decoded from the "fact" chunk, meaningful mainly for
/// non-PCM formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactChunk {
    pub sample_count: u32,
}

/// A single sample-accurate marker from the "cue " chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuePoint {
    pub identifier: u32,
    /// Position of this cue point in play order.
    pub position: u32,
    /// Chunk the marker points into. Always "data" in a decoded document.
    pub target: FourCC,
    pub chunk_start: u32,
    pub block_start: u32,
    /// Sample-accurate offset into the data chunk.
    pub sample_offset: u32,
}

/// Ordered cue point table decoded from the "cue " chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueChunk {
    /// Point count as read off the wire. Kept separate from `points.len()`
    /// because it is a distinct field of the file.
    pub declared_count: u32,
    /// Cue points in file order.
    pub points: Vec<CuePoint>,
}

/// The complete parsed result of one pass over a WAVE file.
///
/// Immutable once constructed; a failed parse never produces one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavDocument {
    fmt: FmtChunk,
    data: Option<DataChunk>,
    fact: Option<FactChunk>,
    cue: Option<CueChunk>,
}

impl WavDocument {
    /// The format descriptor. Always present in a successfully parsed file.
    pub fn fmt(&self) -> &FmtChunk {
        &self.fmt
    }

    /// The sample data block, if the file carried a "data" chunk.
    pub fn data(&self) -> Option<&DataChunk> {
        self.data.as_ref()
    }

    /// The per-channel sample count, if the file carried a "fact" chunk.
    pub fn fact(&self) -> Option<&FactChunk> {
        self.fact.as_ref()
    }

    /// The cue point table, if the file carried a "cue " chunk.
    pub fn cue(&self) -> Option<&CueChunk> {
        self.cue.as_ref()
    }

    pub fn num_channels(&self) -> u16 {
        self.fmt.num_channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.fmt.sample_rate
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.fmt.bits_per_sample
    }

    pub fn audio_format(&self) -> u16 {
        self.fmt.audio_format
    }
}

/// One-pass accumulator for the chunk walker.
///
/// Consumed by [`DocumentBuilder::finish`] into an immutable
/// [`WavDocument`] on success; simply dropped on failure.
#[derive(Debug, Default)]
pub(crate) struct DocumentBuilder {
    /// Descriptor currently in effect. Starts as the default (PCM, zeros)
    /// so a "data" chunk seen before any "fmt " still has something to
    /// echo.
    pub fmt: FmtChunk,
    /// Whether a "fmt " chunk has actually been decoded.
    pub fmt_seen: bool,
    pub data: Option<DataChunk>,
    pub fact: Option<FactChunk>,
    pub cue: Option<CueChunk>,
}

impl DocumentBuilder {
    /// Freezes the accumulated state into a document.
    ///
    /// Fails with [`WavError::MissingFormatChunk`] if the walk never saw a
    /// "fmt " chunk; this is the only chunk presence requirement.
    pub fn finish(self) -> Result<WavDocument> {
        if !self.fmt_seen {
            return Err(WavError::MissingFormatChunk);
        }
        Ok(WavDocument {
            fmt: self.fmt,
            data: self.data,
            fact: self.fact,
            cue: self.cue,
        })
    }
}
