use serde::Serialize;

/// A single recognized word as the engine reports it: raw text (engine
/// tokenizers routinely attach leading whitespace and trailing punctuation)
/// plus start/end offsets in seconds.
///
/// Ordering is recognition order. The engine guarantees `start <= end` and a
/// transcript-wide non-decreasing `start`; neither is re-checked here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordToken {
	pub text: String,
	pub start: f64,
	pub end: f64,
}

impl WordToken {
	pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
		Self { text: text.into(), start, end }
	}
}

/// An ordered run of word tokens, matching one engine segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Segment {
	pub words: Vec<WordToken>,
}

impl Segment {
	pub fn new(words: Vec<WordToken>) -> Self {
		Self { words }
	}
}

/// The engine's full output: ordered segments of ordered words.
/// An empty transcript is valid input everywhere in this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transcript {
	pub segments: Vec<Segment>,
}

impl Transcript {
	pub fn new(segments: Vec<Segment>) -> Self {
		Self { segments }
	}

	/// Total word tokens across all segments, before any filtering.
	pub fn word_count(&self) -> usize {
		self.segments.iter().map(|s| s.words.len()).sum()
	}
}

/// One subtitle block: a single normalized, non-empty word with the timing
/// carried over untouched from the token it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Caption {
	pub word: String,
	pub start: f64,
	pub end: f64,
}
