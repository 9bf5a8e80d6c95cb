//! Core RIFF/WAVE decoding module.
//!
//! One parse pass walks the container's chunk sequence, dispatches each
//! tag to a typed decoder or the generic skip, and freezes the results
//! into an immutable [`WavDocument`].

pub mod error;
pub mod models;

mod chunks;
mod container;
mod cursor;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{info, warn};

use chunks::ChunkKind;
use cursor::{ByteCursor, Fill};
use models::{CueChunk, DataChunk, DocumentBuilder, FactChunk, FmtChunk, FourCC, WavDocument};
pub use error::{Result, WavError};

/// The main reader for RIFF/WAVE audio files.
///
/// Opening a file runs the full parse; a constructed reader therefore
/// always holds a complete document, and every accessor is valid.
#[derive(Debug)]
pub struct WavReader {
    document: WavDocument,
}

impl WavReader {
    /// Open and parse a WAVE file from the given path.
    ///
    /// The file handle is owned by this one pass and closed when it
    /// returns, on success and failure alike.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be opened or read
    /// - The 12-byte RIFF/WAVE header is missing or invalid
    /// - A known chunk is malformed or truncated
    /// - A "data" chunk uses a non-PCM/non-float format code
    /// - No "fmt " chunk is present
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening WAVE file: {}", path.display());
        let file = File::open(path)?;
        let document = parse(file)?;
        Ok(WavReader { document })
    }

    pub fn num_channels(&self) -> u16 {
        self.document.num_channels()
    }

    pub fn sample_rate(&self) -> u32 {
        self.document.sample_rate()
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.document.bits_per_sample()
    }

    /// Audio format code from the format descriptor (1 = PCM, 3 = IEEE float).
    pub fn audio_format(&self) -> u16 {
        self.document.audio_format()
    }

    pub fn fmt(&self) -> &FmtChunk {
        self.document.fmt()
    }

    pub fn data(&self) -> Option<&DataChunk> {
        self.document.data()
    }

    pub fn fact(&self) -> Option<&FactChunk> {
        self.document.fact()
    }

    pub fn cue(&self) -> Option<&CueChunk> {
        self.document.cue()
    }

    /// Raw sample bytes exactly as stored in the file, or an empty slice
    /// if the file carried no "data" chunk.
    pub fn raw_sample_data(&self) -> &[u8] {
        self.document.data().map_or(&[], |d| d.samples.as_slice())
    }

    /// The complete parsed document.
    pub fn document(&self) -> &WavDocument {
        &self.document
    }

    /// Consumes the reader, yielding the parsed document.
    pub fn into_document(self) -> WavDocument {
        self.document
    }
}

/// Runs one complete parse pass over an arbitrary byte source.
///
/// The source is consumed by the pass; each call yields a fresh,
/// independent document. Re-parsing identical bytes produces a
/// structurally equal result.
pub fn parse<R: Read>(source: R) -> Result<WavDocument> {
    let mut cursor = ByteCursor::new(source);
    container::validate(&mut cursor)?;

    let mut builder = DocumentBuilder::default();
    while let Some(tag) = next_tag(&mut cursor)? {
        match ChunkKind::classify(tag) {
            ChunkKind::Fmt => {
                if builder.fmt_seen {
                    warn!(
                        "Second \"fmt \" chunk at offset {}; overwriting the previous descriptor",
                        cursor.position()
                    );
                }
                builder.fmt = chunks::decode_fmt(&mut cursor)?;
                builder.fmt_seen = true;
            }
            ChunkKind::Data => {
                builder.data = Some(chunks::decode_data(&mut cursor, &builder.fmt)?);
            }
            ChunkKind::Fact => {
                builder.fact = Some(chunks::decode_fact(&mut cursor)?);
            }
            ChunkKind::Cue => {
                builder.cue = Some(chunks::decode_cue(&mut cursor)?);
            }
            ChunkKind::Skip => {
                chunks::skip_chunk(&mut cursor, tag)?;
            }
        }
    }

    let document = builder.finish()?;
    info!(
        "Parse complete: format {:#06x}, {} channel(s), {} Hz, {} bits, {} sample bytes",
        document.audio_format(),
        document.num_channels(),
        document.sample_rate(),
        document.bits_per_sample(),
        document.data().map_or(0, |d| d.samples.len())
    );
    Ok(document)
}

/// Reads the next 4-byte chunk tag.
///
/// Any short read here ends the walk: a clean end of stream and a 1-3
/// byte tag fragment are not distinguished.
fn next_tag<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Option<FourCC>> {
    let mut tag = [0u8; 4];
    match cursor.read_exact(&mut tag)? {
        Fill::Complete => Ok(Some(FourCC(tag))),
        Fill::Short(_) => Ok(None),
    }
}
