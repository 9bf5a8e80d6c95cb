//! Error types for the wav-reader crate.

use thiserror::Error;

use super::models::FourCC;

/// The primary error type for all operations in this crate.
///
/// Every parse failure is fatal to the whole pass: there is no
/// partial-success mode, and the caller never observes a half-built
/// document.
#[derive(Debug, Error)]
pub enum WavError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The byte source does not start with a valid 12-byte RIFF/WAVE header.
    #[error("Invalid RIFF/WAVE container: {0}")]
    InvalidContainer(&'static str),

    /// A mandatory fixed-size field of a known chunk could not be read in full.
    #[error("Short read in {context}: expected {expected} bytes, got {got}")]
    ShortChunkRead {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    /// A "data" chunk was encountered while the format descriptor carries
    /// a code other than PCM (0x0001) or IEEE float (0x0003).
    #[error("Unsupported audio format {0:#06x} (only PCM 0x0001 and IEEE float 0x0003 are supported)")]
    UnsupportedAudioFormat(u16),

    /// The "data" chunk declared more sample bytes than the source holds.
    #[error("Truncated data chunk: declared {declared} bytes, got {got}")]
    TruncatedData { declared: u32, got: usize },

    /// A cue point references a chunk other than "data".
    #[error("Cue point {identifier} targets chunk '{target}'; only \"data\" targets are supported")]
    UnsupportedCueTarget { identifier: u32, target: FourCC },

    /// The stream ended without a "fmt " chunk having been seen.
    #[error("No \"fmt \" chunk found in the file")]
    MissingFormatChunk,
}

/// A convenience `Result` type alias using the crate's `WavError` type.
pub type Result<T> = std::result::Result<T, WavError>;
