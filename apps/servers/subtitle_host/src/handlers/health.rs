use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use tracing::instrument;

#[derive(Serialize)]
pub struct HealthResponse {
	status: &'static str,
	version: &'static str,
}

/// Liveness probe. Answering at all means the model finished loading at
/// startup, so there is nothing deeper to check.
#[instrument(name = "health")]
pub async fn health() -> (StatusCode, Json<HealthResponse>) {
	(
		StatusCode::OK,
		Json(HealthResponse {
			status: "healthy",
			version: env!("CARGO_PKG_VERSION"),
		}),
	)
}
