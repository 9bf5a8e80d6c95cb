//! Typed chunk decoders and the generic skip.
//!
//! Every decoder is entered with the cursor positioned immediately after
//! the 4-byte chunk tag and begins by reading its own declared-size
//! field. Short reads of mandatory fixed fields fail the whole parse;
//! short *skips* of chunk bodies do not, the next tag read then ends the
//! walk.

use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, trace};

use super::cursor::{ByteCursor, Fill};
use super::error::{Result, WavError};
use super::models::{
    CueChunk, CuePoint, DataChunk, FactChunk, FmtChunk, FourCC, FORMAT_IEEE_FLOAT, FORMAT_PCM,
};

/// Fixed portion of the "fmt " payload: format code, channels, sample
/// rate, byte rate, block align, bits per sample.
const FMT_FIXED_LEN: u32 = 16;

/// Closed classification of chunk tags, matched by exact byte equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChunkKind {
    Fmt,
    Data,
    Fact,
    Cue,
    /// Everything else, recognized-but-inert metadata and unknown vendor
    /// tags alike, takes the generic skip.
    Skip,
}

impl ChunkKind {
    pub fn classify(tag: FourCC) -> ChunkKind {
        match tag.as_bytes() {
            b"fmt " => ChunkKind::Fmt,
            b"data" => ChunkKind::Data,
            b"fact" => ChunkKind::Fact,
            b"cue " => ChunkKind::Cue,
            _ => ChunkKind::Skip,
        }
    }
}

/// Metadata chunks the walker recognizes but does not decode.
const INERT_TAGS: [FourCC; 7] = [
    FourCC(*b"JUNK"),
    FourCC(*b"LIST"),
    FourCC(*b"INFO"),
    FourCC(*b"smpl"),
    FourCC(*b"inst"),
    FourCC(*b"bext"),
    FourCC(*b"iXML"),
];

/// Reads a mandatory fixed-size field; a short read is a fatal
/// chunk-format error.
fn read_field<R: Read>(
    cursor: &mut ByteCursor<R>,
    buf: &mut [u8],
    context: &'static str,
) -> Result<()> {
    match cursor.read_exact(buf)? {
        Fill::Complete => Ok(()),
        Fill::Short(got) => Err(WavError::ShortChunkRead {
            context,
            expected: buf.len(),
            got,
        }),
    }
}

fn read_u32_le<R: Read>(cursor: &mut ByteCursor<R>, context: &'static str) -> Result<u32> {
    let mut buf = [0u8; 4];
    read_field(cursor, &mut buf, context)?;
    Ok(LittleEndian::read_u32(&buf))
}

/// Decodes the "fmt " chunk into a format descriptor.
///
/// The 16 fixed bytes are read unconditionally; a declared size above 16
/// leaves extension bytes (non-PCM codec parameters) which are skipped
/// uninterpreted. A declared size below 16 is not special-cased.
pub(crate) fn decode_fmt<R: Read>(cursor: &mut ByteCursor<R>) -> Result<FmtChunk> {
    let declared_size = read_u32_le(cursor, "\"fmt \" chunk size")?;

    let mut fixed = [0u8; FMT_FIXED_LEN as usize];
    read_field(cursor, &mut fixed, "\"fmt \" chunk fields")?;

    let fmt = FmtChunk {
        audio_format: LittleEndian::read_u16(&fixed[0..2]),
        num_channels: LittleEndian::read_u16(&fixed[2..4]),
        sample_rate: LittleEndian::read_u32(&fixed[4..8]),
        byte_rate: LittleEndian::read_u32(&fixed[8..12]),
        block_align: LittleEndian::read_u16(&fixed[12..14]),
        bits_per_sample: LittleEndian::read_u16(&fixed[14..16]),
    };

    if declared_size > FMT_FIXED_LEN {
        cursor.skip(u64::from(declared_size - FMT_FIXED_LEN))?;
    }

    debug!(
        "Decoded \"fmt \" chunk: format {:#06x}, {} channel(s), {} Hz, {} bits",
        fmt.audio_format, fmt.num_channels, fmt.sample_rate, fmt.bits_per_sample
    );
    Ok(fmt)
}

/// Decodes the "data" chunk into a sample block.
///
/// The format descriptor in effect *right now* decides whether the chunk
/// is acceptable and is echoed into the result; a descriptor arriving
/// later in the file does not retroactively apply.
pub(crate) fn decode_data<R: Read>(
    cursor: &mut ByteCursor<R>,
    fmt: &FmtChunk,
) -> Result<DataChunk> {
    let declared_size = read_u32_le(cursor, "\"data\" chunk size")?;

    if fmt.audio_format != FORMAT_PCM && fmt.audio_format != FORMAT_IEEE_FLOAT {
        return Err(WavError::UnsupportedAudioFormat(fmt.audio_format));
    }

    let mut samples = vec![0u8; declared_size as usize];
    if declared_size > 0 {
        if let Fill::Short(got) = cursor.read_exact(&mut samples)? {
            return Err(WavError::TruncatedData {
                declared: declared_size,
                got,
            });
        }
    }

    // An odd payload is followed by one pad byte; it must be consumed so
    // the next tag read lands on a chunk boundary.
    if declared_size % 2 == 1 {
        cursor.skip(1)?;
    }

    debug!("Decoded \"data\" chunk: {} sample bytes", declared_size);
    Ok(DataChunk {
        size: declared_size,
        audio_format: fmt.audio_format,
        bits_per_sample: fmt.bits_per_sample,
        samples,
    })
}

/// Decodes the "fact" chunk.
///
/// Only the leading sample count is consumed; content beyond the first 4
/// payload bytes is left in the stream.
pub(crate) fn decode_fact<R: Read>(cursor: &mut ByteCursor<R>) -> Result<FactChunk> {
    let declared_size = read_u32_le(cursor, "\"fact\" chunk size")?;
    let sample_count = read_u32_le(cursor, "\"fact\" sample count")?;

    trace!(
        "Decoded \"fact\" chunk: {} samples per channel ({} bytes declared)",
        sample_count,
        declared_size
    );
    Ok(FactChunk { sample_count })
}

/// Decodes the "cue " chunk into an ordered cue point table.
///
/// The point count is taken at face value, without bounds-checking it
/// against the declared chunk size; a corrupt count runs the record loop
/// until the source ends in a short-read error.
pub(crate) fn decode_cue<R: Read>(cursor: &mut ByteCursor<R>) -> Result<CueChunk> {
    let declared_size = read_u32_le(cursor, "\"cue \" chunk size")?;
    let declared_count = read_u32_le(cursor, "\"cue \" point count")?;
    trace!(
        "\"cue \" chunk: {} bytes declared, {} point(s)",
        declared_size,
        declared_count
    );

    let mut points = Vec::new();
    for _ in 0..declared_count {
        points.push(decode_cue_point(cursor)?);
    }

    Ok(CueChunk {
        declared_count,
        points,
    })
}

/// Reads one fixed 24-byte cue point record.
///
/// The target tag is checked as soon as it is read: cue points into any
/// chunk other than "data" are unsupported and fail the whole parse.
fn decode_cue_point<R: Read>(cursor: &mut ByteCursor<R>) -> Result<CuePoint> {
    let identifier = read_u32_le(cursor, "cue point identifier")?;
    let position = read_u32_le(cursor, "cue point position")?;

    let mut tag = [0u8; 4];
    read_field(cursor, &mut tag, "cue point target tag")?;
    let target = FourCC(tag);
    if target != FourCC::DATA {
        return Err(WavError::UnsupportedCueTarget { identifier, target });
    }

    let chunk_start = read_u32_le(cursor, "cue point chunk start")?;
    let block_start = read_u32_le(cursor, "cue point block start")?;
    let sample_offset = read_u32_le(cursor, "cue point sample offset")?;

    Ok(CuePoint {
        identifier,
        position,
        target,
        chunk_start,
        block_start,
        sample_offset,
    })
}

/// Skips a chunk that is not decoded, honoring the even-alignment rule.
///
/// The size field itself is mandatory; the body may fall short of it
/// without error (the walk then ends at the next tag read).
pub(crate) fn skip_chunk<R: Read>(cursor: &mut ByteCursor<R>, tag: FourCC) -> Result<()> {
    let declared_size = read_u32_le(cursor, "chunk size")?;

    if INERT_TAGS.contains(&tag) {
        debug!("Skipping metadata chunk '{}' ({} bytes)", tag, declared_size);
    } else {
        trace!("Skipping unknown chunk '{}' ({} bytes)", tag, declared_size);
    }

    // The pad byte after an odd payload is not counted in the size.
    cursor.skip(u64::from(declared_size) + u64::from(declared_size % 2))?;
    Ok(())
}
