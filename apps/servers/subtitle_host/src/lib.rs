use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod storage;
pub mod transcription;

pub use config::Config;
pub use error::SubtitleHostError;
pub use storage::{sweep_dir, StoredArtifact};
pub use transcription::{SpeechEngine, WhisperEngine};

/// Allowance on top of the payload limit for multipart boundaries and part
/// headers, so a maximum-size audio file still fits in the request body.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Process-wide state shared by every request.
///
/// The engine is the one expensive, effectively-immutable piece: loaded once
/// at startup, injected read-only. `engine_gate` holds a single permit so at
/// most one engine invocation is in flight at a time regardless of how many
/// uploads are being handled.
#[derive(Clone)]
pub struct AppState {
	pub config: Arc<Config>,
	pub engine: Arc<dyn SpeechEngine>,
	pub engine_gate: Arc<Semaphore>,
}

impl AppState {
	pub fn new(config: Arc<Config>, engine: Arc<dyn SpeechEngine>) -> Self {
		Self {
			config,
			engine,
			engine_gate: Arc::new(Semaphore::new(1)),
		}
	}
}

/// Build the HTTP surface: upload orchestration, artifact downloads, the
/// diagnostic uploads view and a health probe.
pub fn router(state: AppState) -> Router {
	let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

	Router::new()
		.route("/", post(handlers::transcribe::transcribe))
		.route("/download/:filename", get(handlers::files::download_output))
		.route("/uploads/:filename", get(handlers::files::serve_upload))
		.route("/health", get(handlers::health::health))
		.layer(TraceLayer::new_for_http())
		.layer(DefaultBodyLimit::max(body_limit))
		.layer(RequestBodyLimitLayer::new(body_limit))
		.with_state(state)
}
