/// Format a non-negative offset in seconds as an SRT clock string,
/// `HH:MM:SS,mmm`.
///
/// Sub-millisecond precision is truncated, never rounded, so adjacent
/// captions derived from the same engine run cannot drift past each other.
/// Offsets of 100 hours or more widen the hours field instead of wrapping.
/// Negative input is a caller bug; only a debug assertion guards it.
pub fn format_timestamp(seconds: f64) -> String {
	debug_assert!(seconds >= 0.0, "timestamp offsets are non-negative");

	let total_ms = (seconds * 1000.0) as u64;
	let hours = total_ms / 3_600_000;
	let minutes = (total_ms % 3_600_000) / 60_000;
	let secs = (total_ms % 60_000) / 1_000;
	let millis = total_ms % 1_000;

	format!("{hours:02}:{minutes:02}:{secs:02},{millis:03}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_zero() {
		assert_eq!(format_timestamp(0.0), "00:00:00,000");
	}

	#[test]
	fn test_round_trip_values() {
		assert_eq!(format_timestamp(1.234), "00:00:01,234");
		assert_eq!(format_timestamp(2.5), "00:00:02,500");
		assert_eq!(format_timestamp(0.1), "00:00:00,100");
		assert_eq!(format_timestamp(0.62), "00:00:00,620");
	}

	#[test]
	fn test_field_carries() {
		assert_eq!(format_timestamp(59.999), "00:00:59,999");
		assert_eq!(format_timestamp(60.0), "00:01:00,000");
		assert_eq!(format_timestamp(3_599.5), "00:59:59,500");
		assert_eq!(format_timestamp(3_600.0), "01:00:00,000");
	}

	#[test]
	fn test_hours_widen_past_two_digits() {
		assert_eq!(format_timestamp(100.0 * 3_600.0), "100:00:00,000");
		assert_eq!(format_timestamp(123.0 * 3_600.0 + 45.678), "123:00:45,678");
	}

	#[test]
	fn test_monotonic_under_overflow_threshold() {
		let samples = [0.0, 0.001, 0.1, 0.62, 1.234, 2.5, 59.999, 60.0, 61.5, 3_599.999, 3_600.0, 86_400.0, 359_999.999];
		for pair in samples.windows(2) {
			let (a, b) = (format_timestamp(pair[0]), format_timestamp(pair[1]));
			assert!(a <= b, "{a} should sort before {b}");
		}
	}
}
