//! Recording adapter for the `DesignGenerator` port.

use std::sync::{Arc, Mutex};

use crate::cassette::recorder::CassetteRecorder;
use crate::ports::design_generator::{DesignGenerator, GenerateFuture, GenerationRequest};

/// Records generation interactions while delegating to an inner implementation.
pub struct RecordingDesignGenerator {
    inner: Box<dyn DesignGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingDesignGenerator {
    /// Creates a new recording generator wrapping the given implementation.
    pub fn new(inner: Box<dyn DesignGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl DesignGenerator for RecordingDesignGenerator {
    fn generate(&self, request: &GenerationRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate(&request).await;
            match recorder.lock() {
                Ok(mut guard) => {
                    guard.record_result("design_generator", "generate", &request, &result);
                }
                Err(e) => tracing::warn!(error = %e, "recorder lock poisoned; interaction dropped"),
            }
            result
        })
    }
}
