//! RIFF/WAVE container header validation.

use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};
use log::trace;

use super::cursor::{ByteCursor, Fill};
use super::error::{Result, WavError};
use super::models::FourCC;

/// Validates the 12-byte container header at the start of the source.
///
/// Layout: `"RIFF"`, a 4-byte size field, `"WAVE"`. The size field is
/// read but deliberately not checked against the actual stream length;
/// truncated or over-long files are caught later, per chunk.
pub(crate) fn validate<R: Read>(cursor: &mut ByteCursor<R>) -> Result<()> {
    let mut header = [0u8; 12];
    if let Fill::Short(_) = cursor.read_exact(&mut header)? {
        return Err(WavError::InvalidContainer("header shorter than 12 bytes"));
    }
    if &header[0..4] != FourCC::RIFF.as_bytes() {
        return Err(WavError::InvalidContainer("missing \"RIFF\" magic"));
    }
    if &header[8..12] != FourCC::WAVE.as_bytes() {
        return Err(WavError::InvalidContainer("missing \"WAVE\" form type"));
    }

    let riff_size = LittleEndian::read_u32(&header[4..8]);
    trace!("RIFF header: declared size {} bytes (not validated)", riff_size);

    Ok(())
}
