use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use subtitle_gen::{assemble, write_srt};
use tracing::info;

use crate::error::SubtitleHostError;
use crate::storage::{self, StoredArtifact};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
	pub status: &'static str,
	pub message: String,
	pub download_url: String,
	pub caption_count: usize,
}

/// The per-request pipeline: validate the upload, persist it, run the engine,
/// assemble the caption track and write the SRT artifact.
///
/// Strictly sequential; the first failure is terminal and is mapped to the
/// error taxonomy at this boundary. The retention sweep is kicked off as a
/// side effect once the upload is stored and never affects the outcome.
pub async fn transcribe(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<TranscribeResponse>, SubtitleHostError> {
	// Received -> Validated
	let field = loop {
		match multipart.next_field().await? {
			Some(field) if field.name() == Some("audio") => break field,
			Some(_) => continue,
			None => return Err(SubtitleHostError::MissingFilePart),
		}
	};

	let filename = field.file_name().unwrap_or_default().to_string();
	if filename.is_empty() {
		return Err(SubtitleHostError::EmptyFilename);
	}

	let ext = storage::extension_of(&filename).filter(|e| state.config.allows_extension(e));
	let Some(ext) = ext else {
		return Err(SubtitleHostError::UnsupportedFormat(state.config.allowed_extensions_display()));
	};

	let payload = field.bytes().await?;
	if payload.len() > state.config.max_upload_bytes {
		return Err(SubtitleHostError::PayloadTooLarge(state.config.max_upload_bytes));
	}

	info!(file = %filename, bytes = payload.len(), "Processing file");

	// Validated -> Stored
	let artifact = StoredArtifact::for_upload(&state.config.upload_dir, &state.config.output_dir, &filename, &ext);
	tokio::fs::write(&artifact.upload_path, &payload).await?;

	spawn_retention_sweep(&state);

	// Stored -> Transcribed
	info!(base_name = %artifact.base_name, "🎬 Starting transcription...");
	let engine = state.engine.clone();
	let upload_path = artifact.upload_path.clone();
	let permit = state
		.engine_gate
		.clone()
		.acquire_owned()
		.await
		.map_err(|e| SubtitleHostError::Anyhow(anyhow::anyhow!("engine gate closed: {e}")))?;

	let transcript = tokio::task::spawn_blocking(move || {
		// Held for the whole blocking call: exactly one engine invocation in
		// flight process-wide.
		let _permit = permit;
		engine.transcribe(&upload_path)
	})
	.await
	.map_err(|e| SubtitleHostError::Anyhow(anyhow::anyhow!("transcription task panicked: {e}")))?
	.map_err(SubtitleHostError::Engine)?;

	info!(segments = transcript.segments.len(), words = transcript.word_count(), "✅ Audio transcription complete");

	// Transcribed -> Assembled -> Serialized
	let captions = assemble(&transcript);

	let mut srt = Vec::new();
	write_srt(&mut srt, &captions).map_err(|e| match e {
		subtitle_gen::SrtError::Io(io) => SubtitleHostError::Io(io),
	})?;
	tokio::fs::write(&artifact.output_path, srt).await?;

	info!(caption_count = captions.len(), output = %artifact.output_file_name(), "✅ Generated subtitle entries");

	// Serialized -> Completed
	Ok(Json(TranscribeResponse {
		status: "success",
		message: "Subtitles generated! Download now.".to_string(),
		download_url: format!("/download/{}", artifact.output_file_name()),
		caption_count: captions.len(),
	}))
}

/// Best-effort cleanup of both storage areas, off the request's await path.
fn spawn_retention_sweep(state: &AppState) {
	let upload_dir = state.config.upload_dir.clone();
	let output_dir = state.config.output_dir.clone();
	let max_age = state.config.retention_age();

	tokio::task::spawn_blocking(move || {
		let deleted = storage::sweep_dir(&upload_dir, max_age) + storage::sweep_dir(&output_dir, max_age);
		if deleted > 0 {
			info!(deleted, "🧹 Retention sweep removed old files");
		}
	});
}
