//! Speech recognition: the accumulate-and-finalize protocol over an opaque engine.

pub mod recognizer;
pub mod vosk;
