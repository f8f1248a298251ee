//! Cassette format for recording filesystem interactions.

pub mod format;
pub mod recorder;
