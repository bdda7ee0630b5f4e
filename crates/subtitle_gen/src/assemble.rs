use crate::normalize::normalize_word;
use crate::types::{Caption, Transcript};

/// Flatten an engine transcript into an ordered caption track.
///
/// Walks segments in order and words within each segment in order, normalizes
/// every token's text, and drops tokens that normalize to nothing (pure
/// punctuation, engine noise). Timestamps pass through untouched and captions
/// are never merged, split, or reordered, so the output is exactly the
/// surviving tokens in recognition order.
pub fn assemble(transcript: &Transcript) -> Vec<Caption> {
	let mut captions = Vec::with_capacity(transcript.word_count());

	for segment in &transcript.segments {
		for token in &segment.words {
			let word = normalize_word(&token.text);
			if !word.is_empty() {
				captions.push(Caption {
					word,
					start: token.start,
					end: token.end,
				});
			}
		}
	}

	captions
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::{Segment, WordToken};

	fn transcript(segments: Vec<Vec<(&str, f64, f64)>>) -> Transcript {
		Transcript::new(
			segments
				.into_iter()
				.map(|words| Segment::new(words.into_iter().map(|(t, s, e)| WordToken::new(t, s, e)).collect()))
				.collect(),
		)
	}

	#[test]
	fn test_empty_transcript_yields_empty_track() {
		assert!(assemble(&Transcript::default()).is_empty());
		assert!(assemble(&transcript(vec![vec![]])).is_empty());
	}

	#[test]
	fn test_preserves_recognition_order_across_segments() {
		let t = transcript(vec![vec![(" Hello,", 0.1, 0.62), (" world!", 0.7, 1.1)], vec![(" again.", 1.5, 1.9)]]);
		let captions = assemble(&t);
		let words: Vec<&str> = captions.iter().map(|c| c.word.as_str()).collect();
		assert_eq!(words, ["Hello", "world", "again"]);
	}

	#[test]
	fn test_noise_tokens_dropped_without_shifting_neighbors() {
		let t = transcript(vec![vec![(" one", 0.0, 0.3), ("...", 0.3, 0.4), (" two", 0.4, 0.8)]]);
		let captions = assemble(&t);
		assert_eq!(captions.len(), 2);
		assert_eq!(captions[0].word, "one");
		assert_eq!(captions[0].start, 0.0);
		assert_eq!(captions[0].end, 0.3);
		assert_eq!(captions[1].word, "two");
		assert_eq!(captions[1].start, 0.4);
		assert_eq!(captions[1].end, 0.8);
	}

	#[test]
	fn test_timing_untouched_by_normalization() {
		let t = transcript(vec![vec![("  Hello,  ", 0.1, 0.62)]]);
		let captions = assemble(&t);
		assert_eq!(captions[0].word, "Hello");
		assert_eq!(captions[0].start, 0.1);
		assert_eq!(captions[0].end, 0.62);
	}
}
