//! # wav-reader
//!
//! A chunk-walking decoder for RIFF/WAVE audio files.
//!
//! Validates the container header, walks the tagged chunk sequence in
//! file order ("fmt ", "data", "fact" and "cue " are decoded, everything
//! else is skipped with correct even-byte alignment), and returns an
//! immutable document of typed records. Sample bytes are kept raw, in
//! file order; decoding them into typed PCM arrays is out of scope.
pub mod wave;

// Re-export the main types for convenience
pub use wave::{
    models::{CueChunk, CuePoint, DataChunk, FactChunk, FmtChunk, FourCC, WavDocument},
    Result, WavError, WavReader,
};
