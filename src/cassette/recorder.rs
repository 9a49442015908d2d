//! Records interactions into a cassette file.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use super::format::{Cassette, Interaction};

/// Collects interactions and writes them as a YAML cassette file.
///
/// The server keeps the recorder alive until shutdown, so writing takes a
/// snapshot instead of consuming the recorder. Interactions are held in
/// memory until then, so memory grows with every recorded request.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    commit: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            commit: commit.into(),
            interactions: Vec::new(),
        }
    }

    /// Destination path of the cassette.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Record an interaction from raw JSON values.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Record a `Result<T, E>` using the `Ok`/`Err` JSON convention.
    ///
    /// Values that fail to serialize are stored as `null` so a bad payload
    /// never takes down a request.
    pub fn record_result<I, T, E>(
        &mut self,
        port: &str,
        method: &str,
        input: &I,
        result: &Result<T, E>,
    ) where
        I: Serialize,
        T: Serialize,
        E: std::fmt::Display,
    {
        let input_json = serde_json::to_value(input).unwrap_or_default();
        let output_json = match result {
            Ok(v) => serde_json::json!({ "Ok": serde_json::to_value(v).unwrap_or_default() }),
            Err(e) => serde_json::json!({ "Err": e.to_string() }),
        };
        self.record(port, method, input_json, output_json);
    }

    /// Write everything recorded so far to the cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.name.clone(),
            recorded_at: Utc::now(),
            commit: self.commit.clone(),
            interactions: self.interactions.clone(),
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path.clone())
    }
}
