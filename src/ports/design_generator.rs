//! Design generator port for multimodal image editing APIs.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// A request to redesign a room photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The resolved model identifier (e.g., `"gemini-2.5-flash-image-preview"`).
    pub model: String,
    /// The instruction built from the user's style and changes.
    pub prompt: String,
    /// Raw bytes of the uploaded room photo.
    #[serde(with = "base64_bytes")]
    pub image: Vec<u8>,
    /// MIME type of the uploaded photo.
    pub mime_type: String,
}

/// One piece of content returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    /// A text fragment.
    Text(String),
    /// Binary image data returned inline.
    InlineImage {
        /// Raw image bytes (decoded from base64).
        #[serde(with = "base64_bytes")]
        data: Vec<u8>,
        /// MIME type reported by the API.
        mime_type: String,
    },
    /// A part carrying neither text nor image data.
    Empty,
}

/// One alternative answer from the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Content parts in the order the model produced them.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Structured response from the generation service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Candidates in response order.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Convenience text exposed at the top level, if the service provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Boxed future type returned by [`DesignGenerator::generate`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GenerationResponse, GenerationError>> + Send + 'a>>;

/// Sends a prompt and a room photo to an external multimodal model.
pub trait DesignGenerator: Send + Sync {
    /// Generate a redesign for the given request.
    fn generate(&self, request: &GenerationRequest) -> GenerateFuture<'_>;
}

/// Serde helper for serializing `Vec<u8>` as base64 strings in cassettes.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize bytes as base64 string.
    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    /// Deserialize base64 string to bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
