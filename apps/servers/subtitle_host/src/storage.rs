use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// Paths for one request's upload and its subtitle artifact, tied together by
/// a collision-resistant base name. Both halves live until the retention
/// sweep reclaims them; request completion does not.
#[derive(Debug, Clone)]
pub struct StoredArtifact {
	pub upload_path: PathBuf,
	pub output_path: PathBuf,
	pub base_name: String,
}

impl StoredArtifact {
	/// Derive storage paths for an incoming upload.
	///
	/// Base name = sanitized original stem + `_` + 8 hex chars of a v4 uuid.
	/// The random suffix is the whole isolation story for concurrent requests
	/// with identical filenames: no counter, no lock, collision probability
	/// accepted as negligible.
	pub fn for_upload(upload_dir: &Path, output_dir: &Path, original_filename: &str, ext: &str) -> Self {
		let stem = sanitize_stem(file_stem(original_filename));
		let suffix = &Uuid::new_v4().simple().to_string()[..8];
		let base_name = format!("{stem}_{suffix}");

		Self {
			upload_path: upload_dir.join(format!("{base_name}.{ext}")),
			output_path: output_dir.join(format!("{base_name}.srt")),
			base_name,
		}
	}

	pub fn output_file_name(&self) -> String {
		format!("{}.srt", self.base_name)
	}
}

/// Lowercased extension of an uploaded filename, if it has one.
pub fn extension_of(filename: &str) -> Option<String> {
	Path::new(filename).extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase)
}

fn file_stem(filename: &str) -> &str {
	Path::new(filename).file_stem().and_then(|s| s.to_str()).unwrap_or("")
}

/// Reduce an untrusted filename stem to `[A-Za-z0-9._-]`.
///
/// Drops path separators, control characters and anything else that could
/// escape the storage directory. A stem with nothing left falls back to
/// `upload` so the base name never starts with the bare suffix separator.
pub fn sanitize_stem(stem: &str) -> String {
	let cleaned: String = stem.chars().filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')).collect();
	let cleaned = cleaned.trim_matches('.').to_string();

	if cleaned.is_empty() {
		"upload".to_string()
	} else {
		cleaned
	}
}

/// Best-effort age-based retention sweep over one storage directory.
///
/// Deletes regular files whose modification time is older than `max_age`.
/// Every failure is logged and swallowed: a file already gone lost a race
/// with another sweep or a concurrent download cleanup, and neither case may
/// fail the request that triggered the sweep. Returns the number of files
/// actually deleted.
pub fn sweep_dir(dir: &Path, max_age: Duration) -> usize {
	let entries = match std::fs::read_dir(dir) {
		Ok(entries) => entries,
		Err(e) => {
			warn!(dir = %dir.display(), error = %e, "Retention sweep could not read directory");
			return 0;
		}
	};

	let mut deleted = 0;
	for entry in entries.flatten() {
		let path = entry.path();
		let Ok(metadata) = entry.metadata() else { continue };
		if !metadata.is_file() {
			continue;
		}

		let age = metadata.modified().ok().and_then(|mtime| mtime.elapsed().ok());
		let Some(age) = age else { continue };
		if age <= max_age {
			continue;
		}

		match std::fs::remove_file(&path) {
			Ok(()) => {
				debug!(file = %path.display(), age_secs = age.as_secs(), "🧹 Deleted old file");
				deleted += 1;
			}
			Err(e) if e.kind() == ErrorKind::NotFound => {
				// Raced another sweep; the file is gone either way.
			}
			Err(e) => {
				warn!(file = %path.display(), error = %e, "Failed to delete old file");
			}
		}
	}

	deleted
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn test_sanitize_keeps_safe_characters() {
		assert_eq!(sanitize_stem("speech"), "speech");
		assert_eq!(sanitize_stem("My Talk 2024"), "MyTalk2024");
		assert_eq!(sanitize_stem("notes_v1.2-final"), "notes_v1.2-final");
	}

	#[test]
	fn test_sanitize_strips_traversal_attempts() {
		assert_eq!(sanitize_stem("../../etc/passwd"), "etcpasswd");
		assert!(!sanitize_stem("..\\windows\\system32").contains('\\'));
		assert_eq!(sanitize_stem("...."), "upload");
		assert_eq!(sanitize_stem(""), "upload");
		assert_eq!(sanitize_stem("é€ñ"), "upload");
	}

	#[test]
	fn test_artifact_paths_share_base_name() {
		let artifact = StoredArtifact::for_upload(Path::new("uploads"), Path::new("outputs"), "speech.wav", "wav");
		assert!(artifact.base_name.starts_with("speech_"));
		assert_eq!(artifact.base_name.len(), "speech_".len() + 8);
		assert_eq!(artifact.upload_path, Path::new("uploads").join(format!("{}.wav", artifact.base_name)));
		assert_eq!(artifact.output_path, Path::new("outputs").join(format!("{}.srt", artifact.base_name)));
	}

	#[test]
	fn test_identical_filenames_get_distinct_base_names() {
		let a = StoredArtifact::for_upload(Path::new("uploads"), Path::new("outputs"), "speech.wav", "wav");
		let b = StoredArtifact::for_upload(Path::new("uploads"), Path::new("outputs"), "speech.wav", "wav");
		assert_ne!(a.base_name, b.base_name);
		assert_ne!(a.upload_path, b.upload_path);
		assert_ne!(a.output_path, b.output_path);
	}

	#[test]
	fn test_extension_of() {
		assert_eq!(extension_of("speech.WAV"), Some("wav".to_string()));
		assert_eq!(extension_of("archive.tar.gz"), Some("gz".to_string()));
		assert_eq!(extension_of("noext"), None);
	}

	#[test]
	fn test_sweep_deletes_old_and_keeps_young() {
		let dir = tempfile::tempdir().unwrap();
		let old = dir.path().join("old.srt");
		let young = dir.path().join("young.srt");
		fs::write(&old, "1\n").unwrap();
		fs::write(&young, "1\n").unwrap();

		// Zero threshold ages out everything already on disk; a generous one
		// keeps it all.
		assert_eq!(sweep_dir(dir.path(), Duration::from_secs(3600)), 0);
		assert!(old.exists() && young.exists());

		std::thread::sleep(Duration::from_millis(20));
		assert_eq!(sweep_dir(dir.path(), Duration::ZERO), 2);
		assert!(!old.exists() && !young.exists());
	}

	#[test]
	fn test_sweep_missing_directory_is_harmless() {
		assert_eq!(sweep_dir(Path::new("/definitely/not/a/real/dir"), Duration::ZERO), 0);
	}
}
