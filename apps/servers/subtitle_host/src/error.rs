use axum::body::Body;
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

/// Failure taxonomy for the transcription pipeline.
///
/// Every variant maps to exactly one HTTP status and one caller-visible
/// message. Engine and filesystem detail is logged at the boundary; only the
/// generic category text crosses the wire.
#[derive(thiserror::Error, Debug)]
pub enum SubtitleHostError {
	#[error("No file part in the request")]
	MissingFilePart,

	#[error("No selected file")]
	EmptyFilename,

	#[error("Unsupported file format. Please upload a file in one of these formats: {0}")]
	UnsupportedFormat(String),

	#[error("File exceeds the maximum upload size of {0} bytes")]
	PayloadTooLarge(usize),

	#[error("Malformed upload request")]
	Multipart(#[from] axum::extract::multipart::MultipartError),

	#[error("Transcription failed")]
	Engine(#[source] anyhow::Error),

	#[error("File processing error")]
	Io(#[from] std::io::Error),

	#[error("Unexpected error")]
	Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
	status: &'static str,
	message: String,
}

impl SubtitleHostError {
	pub const fn status_code(&self) -> StatusCode {
		match self {
			Self::MissingFilePart => StatusCode::BAD_REQUEST,
			Self::EmptyFilename => StatusCode::BAD_REQUEST,
			Self::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
			Self::PayloadTooLarge(_) => StatusCode::BAD_REQUEST,
			Self::Multipart(_) => StatusCode::BAD_REQUEST,
			Self::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
			Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
			Self::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl IntoResponse for SubtitleHostError {
	fn into_response(self) -> Response<Body> {
		match &self {
			Self::Engine(e) => tracing::error!(error = ?e, "❌ Engine failure"),
			Self::Io(e) => tracing::error!(error = ?e, "❌ Filesystem failure"),
			Self::Anyhow(e) => tracing::error!(error = ?e, "❌ Unexpected failure"),
			other => tracing::warn!(error = %other, "Request rejected"),
		}

		let body = ErrorBody {
			status: "error",
			message: self.to_string(),
		};

		(self.status_code(), Json(body)).into_response()
	}
}
