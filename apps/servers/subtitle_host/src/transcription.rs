use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;
use subtitle_gen::{Segment, Transcript, WordToken};
use symphonia::core::audio::{SampleBuffer, SignalSpec};
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::info;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Seam between the pipeline and the speech-recognition engine.
///
/// The orchestrator only ever sees "audio file in, ordered segments of timed
/// words out". Implementations must be safe to share behind an `Arc`; the
/// caller still serializes invocations (one in flight at a time).
pub trait SpeechEngine: Send + Sync {
	fn transcribe(&self, audio_path: &Path) -> Result<Transcript>;
}

/// Whisper-backed engine. The context is loaded once at startup and shared
/// read-only; each call gets its own whisper state.
pub struct WhisperEngine {
	ctx: WhisperContext,
	threads: i32,
}

impl WhisperEngine {
	/// Load the Whisper model from disk.
	pub fn load(model_path: &str, threads: i32) -> Result<Self> {
		info!("🔄 Loading Whisper model from {}...", model_path);
		let start = Instant::now();

		let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())?;

		let load_time = start.elapsed();
		info!(load_time_ms = load_time.as_millis(), threads, "✅ Whisper model loaded");

		Ok(Self { ctx, threads })
	}

	fn create_params(&self) -> FullParams<'static, 'static> {
		let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
		params.set_translate(false);
		params.set_print_special(false);
		params.set_print_progress(false);
		params.set_print_realtime(false);
		params.set_print_timestamps(false);
		params.set_token_timestamps(true);
		params.set_n_threads(self.threads);
		params
	}
}

impl SpeechEngine for WhisperEngine {
	fn transcribe(&self, audio_path: &Path) -> Result<Transcript> {
		let samples = read_audio(audio_path)?;

		let mut state = self.ctx.create_state().context("failed to create Whisper state")?;
		state.full(self.create_params(), &samples).context("transcription failed")?;

		let num_segments = state.full_n_segments();
		let mut segments = Vec::new();

		for i in 0..num_segments {
			let Some(segment) = state.get_segment(i) else { continue };

			let mut words = Vec::new();
			let mut current = String::new();
			let mut word_start: Option<f64> = None;
			let mut word_end = 0.0_f64;

			for t in 0..segment.n_tokens() {
				let Some(token) = segment.get_token(t) else { continue };
				let Ok(piece) = token.to_str() else { continue };

				// Marker tokens like [_BEG_] carry no speech.
				if piece.starts_with('[') && piece.ends_with(']') {
					continue;
				}

				let piece = piece.replace('▁', " ");
				let data = token.token_data();
				let t0 = data.t0 as f64 / 100.0;
				let t1 = data.t1 as f64 / 100.0;

				// A leading word boundary closes the word in progress.
				if piece.starts_with(char::is_whitespace) {
					flush_word(&mut words, &mut current, &mut word_start, word_end);
				}

				if word_start.is_none() {
					word_start = Some(t0);
				}
				current.push_str(&piece);
				word_end = t1;
			}

			flush_word(&mut words, &mut current, &mut word_start, word_end);

			if !words.is_empty() {
				segments.push(Segment::new(words));
			}
		}

		Ok(Transcript::new(segments))
	}
}

fn flush_word(words: &mut Vec<WordToken>, current: &mut String, start: &mut Option<f64>, end: f64) {
	let text = std::mem::take(current);
	if let Some(start) = start.take() {
		if !text.trim().is_empty() {
			words.push(WordToken::new(text, start, end));
		}
	}
}

/// Decode an uploaded file into 16 kHz mono f32 samples for Whisper.
///
/// Symphonia probes the container, so every extension on the allow-list
/// (wav, flac, ogg, mp3, m4a) decodes through the same path.
fn read_audio(path: &Path) -> Result<Vec<f32>> {
	const WHISPER_SAMPLE_RATE: u32 = 16_000;

	let file = std::fs::File::open(path).with_context(|| format!("failed to open audio file {}", path.display()))?;
	let source = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

	let mut hint = Hint::new();
	if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
		hint.with_extension(ext);
	}

	let probed = symphonia::default::get_probe()
		.format(&hint, source, &FormatOptions::default(), &MetadataOptions::default())
		.context("unrecognized audio container")?;
	let mut format = probed.format;

	let track = format.default_track().context("no audio track in file")?;
	let track_id = track.id;
	let mut decoder = symphonia::default::get_codecs()
		.make(&track.codec_params, &DecoderOptions::default())
		.context("unsupported audio codec")?;

	let mut samples = Vec::new();
	let mut sample_buf: Option<SampleBuffer<f32>> = None;
	let mut signal_spec: Option<SignalSpec> = None;

	loop {
		let packet = match format.next_packet() {
			Ok(packet) => packet,
			Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
			Err(e) => return Err(e).context("failed to read audio packet"),
		};
		if packet.track_id() != track_id {
			continue;
		}

		match decoder.decode(&packet) {
			Ok(decoded) => {
				if sample_buf.is_none() {
					let spec = *decoded.spec();
					sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
					signal_spec = Some(spec);
				}
				if let Some(buf) = &mut sample_buf {
					buf.copy_interleaved_ref(decoded);
					samples.extend_from_slice(buf.samples());
				}
			}
			// Recoverable corruption; skip the packet.
			Err(SymphoniaError::DecodeError(_)) => continue,
			Err(e) => return Err(e).context("failed to decode audio"),
		}
	}

	let spec = signal_spec.context("audio stream contained no decodable packets")?;
	let channels = spec.channels.count();
	let mono: Vec<f32> = if channels > 1 {
		samples.chunks(channels).map(|frame| frame.iter().sum::<f32>() / frame.len() as f32).collect()
	} else {
		samples
	};

	Ok(resample_simple(&mono, spec.rate, WHISPER_SAMPLE_RATE))
}

fn resample_simple(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
	if from_rate == to_rate || samples.is_empty() {
		return samples.to_vec();
	}

	let ratio = from_rate as f32 / to_rate as f32;
	let output_len = (samples.len() as f32 / ratio) as usize;

	(0..output_len)
		.map(|i| {
			let src = (i as f32 * ratio) as usize;
			samples[src.min(samples.len() - 1)]
		})
		.collect()
}
