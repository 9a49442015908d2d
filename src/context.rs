//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::gemini::GeminiGenerator;
use crate::adapters::recording::design_generator::RecordingDesignGenerator;
use crate::adapters::replaying::design_generator::ReplayingDesignGenerator;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::error::ServerError;
use crate::ports::DesignGenerator;

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Design generator port.
    pub generator: Arc<dyn DesignGenerator>,
}

/// Handle to a recording session; call [`RecordingSession::finish`] on shutdown.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Write the recorded interactions to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(&self) -> Result<PathBuf, String> {
        let recorder = self.recorder.lock().map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.write().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context backed by the Gemini API.
    ///
    /// A missing API key is logged, not rejected: requests then fall back.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self { generator: Arc::new(gemini_generator(config)) }
    }

    /// Create a recording context that wraps a live adapter with a recorder.
    ///
    /// Every interaction, base64 image payloads included, stays in memory
    /// until [`RecordingSession::finish`]. Use this mode for short capture
    /// sessions, not for a long-running deployment.
    #[must_use]
    pub fn recording(config: &Config) -> (Self, RecordingSession) {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".respace/cassettes")
            .join(&timestamp)
            .join("design_generator.cassette.yaml");
        let recorder = CassetteRecorder::new(
            path,
            format!("{timestamp}-design_generator"),
            get_commit_hash(),
        );
        tracing::info!(
            path = %recorder.path().display(),
            "cassette will be written on shutdown"
        );
        let recorder = Arc::new(Mutex::new(recorder));

        let recording = RecordingDesignGenerator::new(
            Box::new(gemini_generator(config)),
            Arc::clone(&recorder),
        );

        (Self { generator: Arc::new(recording) }, RecordingSession { recorder })
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, ServerError> {
        let replayer = load_cassette(path)
            .map_err(|e| ServerError::Config(format!("Failed to load cassette: {e}")))?;
        let generator = ReplayingDesignGenerator::new(Arc::new(Mutex::new(replayer)));
        Ok(Self { generator: Arc::new(generator) })
    }
}

fn gemini_generator(config: &Config) -> GeminiGenerator {
    let key = config.gemini_key();
    if key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; /generate will return the fallback response");
    }
    let generator = GeminiGenerator::new(key);
    match &config.generation.api_base {
        Some(base) => generator.with_base_url(base.clone()),
        None => generator,
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
