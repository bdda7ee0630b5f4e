//! Word-level transcript to SRT subtitle pipeline.
//!
//! Takes the nested segment/word output of a speech-to-text engine and turns
//! it into a flat, ordered caption track, one word per caption, then renders
//! that track as an SRT file. Everything in this crate is a pure
//! transformation; the serializer is the only piece that touches a `Write`.

pub mod assemble;
pub mod normalize;
pub mod serialize;
pub mod timestamp;
pub mod types;

pub use assemble::assemble;
pub use normalize::normalize_word;
pub use serialize::{write_srt, SrtError};
pub use timestamp::format_timestamp;
pub use types::{Caption, Segment, Transcript, WordToken};
