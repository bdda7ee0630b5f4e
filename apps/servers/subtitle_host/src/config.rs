use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "subtitle_host")]
#[command(about = "Word-by-word subtitle generator service", long_about = None)]
pub struct Config {
	/// Server host
	#[arg(long, env = "HOST", default_value = "127.0.0.1")]
	pub host: String,

	/// Server port
	#[arg(long, env = "PORT", default_value = "3000")]
	pub port: u16,

	/// Directory for incoming audio uploads
	#[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
	pub upload_dir: PathBuf,

	/// Directory for generated subtitle files
	#[arg(long, env = "OUTPUT_DIR", default_value = "outputs")]
	pub output_dir: PathBuf,

	/// Maximum upload size in bytes
	#[arg(long, env = "MAX_UPLOAD_BYTES", default_value = "16777216")]
	pub max_upload_bytes: usize,

	/// Accepted audio file extensions, comma separated
	#[arg(long, env = "ALLOWED_EXTENSIONS", value_delimiter = ',', default_value = "mp3,wav,m4a,flac,ogg")]
	pub allowed_extensions: Vec<String>,

	/// Age in hours after which stored files are swept
	#[arg(long, env = "RETENTION_HOURS", default_value = "24")]
	pub retention_hours: u64,

	/// Whisper model path
	#[arg(long, env = "WHISPER_MODELS_PATH")]
	pub whisper_model_path: String,

	/// Number of threads for Whisper processing
	#[arg(long, env = "WHISPER_THREADS", default_value = "2")]
	pub whisper_threads: i32,
}

impl Config {
	/// Validate configuration values
	pub fn validate(&self) -> Result<(), String> {
		if self.max_upload_bytes == 0 {
			return Err("max_upload_bytes must be greater than 0".to_string());
		}

		if self.allowed_extensions.is_empty() {
			return Err("allowed_extensions must name at least one extension".to_string());
		}

		if self.retention_hours == 0 {
			return Err("retention_hours must be at least 1".to_string());
		}

		if self.whisper_threads < 1 {
			return Err("whisper_threads must be at least 1".to_string());
		}

		Ok(())
	}

	/// Case-insensitive membership test against the extension allow-list.
	pub fn allows_extension(&self, ext: &str) -> bool {
		self.allowed_extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext))
	}

	/// The allow-list as shown to callers in rejection messages.
	pub fn allowed_extensions_display(&self) -> String {
		self.allowed_extensions.join(", ")
	}

	pub fn retention_age(&self) -> Duration {
		Duration::from_secs(self.retention_hours * 3600)
	}
}
