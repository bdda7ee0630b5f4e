use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use subtitle_host::{router, AppState, Config, WhisperEngine};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
	// Load environment variables
	dotenvy::dotenv().ok();

	let config = Config::parse();
	config.validate().map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

	init_tracing();

	info!("🎯 Starting word-by-word subtitle generator");

	std::fs::create_dir_all(&config.upload_dir)?;
	std::fs::create_dir_all(&config.output_dir)?;

	// Load the model once; every request borrows this instance.
	let engine = WhisperEngine::load(&config.whisper_model_path, config.whisper_threads)?;

	let config = Arc::new(config);
	let state = AppState::new(config.clone(), Arc::new(engine));
	let app = router(state);

	let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
	info!(addr = %listener.local_addr()?, "🎧 Listening for uploads");

	let shutdown_token = CancellationToken::new();

	let signal_shutdown_token = shutdown_token.clone();
	tokio::spawn(async move {
		tokio::signal::ctrl_c().await.ok();
		info!("🛑 Received Ctrl+C, initiating shutdown...");
		signal_shutdown_token.cancel();
	});

	let server_token = shutdown_token.clone();
	axum::serve(listener, app)
		.with_graceful_shutdown(async move {
			server_token.cancelled().await;
		})
		.await?;

	info!("✅ Server stopped");
	Ok(())
}

fn init_tracing() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();
}
