use axum::body::Body;
use axum::extract::{Path as UrlPath, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, Response, StatusCode};
use std::path::Path;
use tokio_util::io::ReaderStream;

use crate::AppState;

/// Stream a generated subtitle file as a download attachment.
pub async fn download_output(State(state): State<AppState>, UrlPath(filename): UrlPath<String>) -> Result<Response<Body>, StatusCode> {
	serve_file(&state.config.output_dir, &filename, Disposition::Attachment, "application/x-subrip; charset=utf-8").await
}

/// Stream a stored upload inline. Diagnostic surface only.
pub async fn serve_upload(State(state): State<AppState>, UrlPath(filename): UrlPath<String>) -> Result<Response<Body>, StatusCode> {
	serve_file(&state.config.upload_dir, &filename, Disposition::Inline, "application/octet-stream").await
}

enum Disposition {
	Attachment,
	Inline,
}

async fn serve_file(dir: &Path, filename: &str, disposition: Disposition, content_type: &'static str) -> Result<Response<Body>, StatusCode> {
	// Requested names must stay flat inside the storage directory.
	if filename.is_empty() || filename.contains(['/', '\\']) || filename.contains("..") {
		return Err(StatusCode::NOT_FOUND);
	}

	let path = dir.join(filename);
	let file = tokio::fs::File::open(&path).await.map_err(|_| StatusCode::NOT_FOUND)?;

	let disposition_value = match disposition {
		Disposition::Attachment => format!("attachment; filename=\"{filename}\""),
		Disposition::Inline => "inline".to_string(),
	};

	Response::builder()
		.header(CONTENT_TYPE, HeaderValue::from_static(content_type))
		.header(CONTENT_DISPOSITION, disposition_value)
		.body(Body::from_stream(ReaderStream::new(file)))
		.map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_traversal_names_are_not_found() {
		let dir = tempfile::tempdir().unwrap();
		for name in ["../secret.srt", "a/b.srt", "..", "a\\b.srt", ""] {
			let result = serve_file(dir.path(), name, Disposition::Inline, "application/octet-stream").await;
			assert_eq!(result.err(), Some(StatusCode::NOT_FOUND), "{name:?} should 404");
		}
	}

	#[tokio::test]
	async fn test_missing_file_is_not_found() {
		let dir = tempfile::tempdir().unwrap();
		let result = serve_file(dir.path(), "missing.srt", Disposition::Attachment, "application/x-subrip; charset=utf-8").await;
		assert_eq!(result.err(), Some(StatusCode::NOT_FOUND));
	}

	#[tokio::test]
	async fn test_existing_file_streams_with_attachment_header() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("speech_ab12cd34.srt"), "1\n").unwrap();

		let response = serve_file(dir.path(), "speech_ab12cd34.srt", Disposition::Attachment, "application/x-subrip; charset=utf-8")
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(
			response.headers().get(CONTENT_DISPOSITION).unwrap(),
			"attachment; filename=\"speech_ab12cd34.srt\""
		);
	}
}
