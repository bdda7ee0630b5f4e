use crate::timestamp::format_timestamp;
use crate::types::Caption;
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum SrtError {
	#[error("failed to write subtitle output: {0}")]
	Io(#[from] std::io::Error),
}

/// Render a caption track as SRT.
///
/// Each caption becomes one block: a 1-based index line, the
/// `start --> end` timing line, the word, and a blank separator. Numbering is
/// strictly sequential from 1 with no gaps regardless of what assembly
/// filtered out. An empty track writes nothing and is not an error.
pub fn write_srt<W: Write>(out: &mut W, captions: &[Caption]) -> Result<(), SrtError> {
	for (idx, caption) in captions.iter().enumerate() {
		writeln!(out, "{}", idx + 1)?;
		writeln!(out, "{} --> {}", format_timestamp(caption.start), format_timestamp(caption.end))?;
		writeln!(out, "{}", caption.word)?;
		writeln!(out)?;
	}
	Ok(())
}
