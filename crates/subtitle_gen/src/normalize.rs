/// Strip recognition noise from a single word token.
///
/// Removes every character that is neither a word character (Unicode
/// alphanumeric or `_`) nor whitespace, then trims surrounding whitespace.
/// Case and interior characters, diacritics and digits included, are
/// preserved exactly as recognized. Idempotent; may return an empty string
/// when the token was pure punctuation.
pub fn normalize_word(raw: &str) -> String {
	raw.chars().filter(|c| is_word_char(*c) || c.is_whitespace()).collect::<String>().trim().to_string()
}

fn is_word_char(c: char) -> bool {
	c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_strips_punctuation_and_whitespace() {
		assert_eq!(normalize_word(" Hello,"), "Hello");
		assert_eq!(normalize_word("world!"), "world");
		assert_eq!(normalize_word("  don't  "), "dont");
	}

	#[test]
	fn test_preserves_case_digits_and_diacritics() {
		assert_eq!(normalize_word("McDonald's"), "McDonalds");
		assert_eq!(normalize_word("café."), "café");
		assert_eq!(normalize_word("42nd,"), "42nd");
		assert_eq!(normalize_word("snake_case"), "snake_case");
	}

	#[test]
	fn test_pure_noise_becomes_empty() {
		assert_eq!(normalize_word("..."), "");
		assert_eq!(normalize_word(" ?! "), "");
		assert_eq!(normalize_word(""), "");
	}

	#[test]
	fn test_idempotent() {
		for raw in [" Hello,", "café.", "...", "already clean"] {
			let once = normalize_word(raw);
			assert_eq!(normalize_word(&once), once);
		}
	}
}
