//! Replaying adapter for the `DesignGenerator` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::GenerationError;
use crate::ports::design_generator::{
    DesignGenerator, GenerateFuture, GenerationRequest, GenerationResponse,
};

/// Serves recorded generation results from a cassette.
pub struct ReplayingDesignGenerator {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingDesignGenerator {
    /// Create a replaying generator backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl DesignGenerator for ReplayingDesignGenerator {
    fn generate(&self, _request: &GenerationRequest) -> GenerateFuture<'_> {
        let result = next_output(&self.replayer, "design_generator", "generate")
            .and_then(replay_result::<GenerationResponse>)
            .map_err(GenerationError::Replay);
        Box::pin(async move { result })
    }
}
