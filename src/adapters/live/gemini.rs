//! Live adapter for the Gemini `generateContent` API.

use base64::Engine;
use reqwest::Client;
use serde::Deserialize;

use crate::error::GenerationError;
use crate::ports::design_generator::{
    Candidate, DesignGenerator, GenerateFuture, GenerationRequest, GenerationResponse, Part,
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Live Gemini generator that calls the Google AI API.
///
/// Built even without an API key so the server can start; every call then
/// fails with [`GenerationError::MissingApiKey`].
pub struct GeminiGenerator {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiGenerator {
    /// Create a new Gemini generator with the given API key.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    /// Point the generator at a different API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Build the JSON body for a `generateContent` call.
fn request_body(request: &GenerationRequest) -> serde_json::Value {
    let image_b64 = base64::engine::general_purpose::STANDARD.encode(&request.image);
    serde_json::json!({
        "contents": [{
            "parts": [
                {"text": request.prompt},
                {"inlineData": {"mimeType": request.mime_type, "data": image_b64}}
            ]
        }],
        "generationConfig": {
            "responseModalities": ["TEXT", "IMAGE"]
        }
    })
}

/// Parse a successful `generateContent` body into the port's response type.
fn parse_response(body: &str) -> Result<GenerationResponse, GenerationError> {
    let parsed: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::Decode(format!("Failed to parse response: {e}")))?;

    let candidates = parsed
        .candidates
        .into_iter()
        .map(|candidate| -> Result<Candidate, GenerationError> {
            let parts = candidate
                .content
                .map(|content| content.parts)
                .unwrap_or_default()
                .into_iter()
                .map(GeminiPart::into_part)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Candidate { parts })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GenerationResponse { candidates, text: None })
}

impl DesignGenerator for GeminiGenerator {
    fn generate(&self, request: &GenerationRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let api_key = self.api_key.as_deref().ok_or_else(|| GenerationError::MissingApiKey {
                env_var: "GEMINI_API_KEY".into(),
            })?;

            let url = format!("{}/{}:generateContent", self.base_url, request.model);
            tracing::debug!(
                model = %request.model,
                image_bytes = request.image.len(),
                mime_type = %request.mime_type,
                "calling Gemini"
            );

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", api_key)
                .json(&request_body(&request))
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(GenerationError::Api {
                    status: status.as_u16(),
                    message: truncate(&response_text, 500),
                });
            }

            parse_response(&response_text)
        })
    }
}

/// Cap a response body for inclusion in error messages.
fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

// --- Gemini API response types ---

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    inline_data: Option<GeminiInlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    data: String,
}

impl GeminiPart {
    fn into_part(self) -> Result<Part, GenerationError> {
        if let Some(text) = self.text.filter(|t| !t.is_empty()) {
            return Ok(Part::Text(text));
        }
        match self.inline_data {
            Some(inline) if !inline.data.is_empty() => {
                let data = base64::engine::general_purpose::STANDARD
                    .decode(&inline.data)
                    .map_err(|e| GenerationError::Decode(format!("Failed to decode base64: {e}")))?;
                Ok(Part::InlineImage { data, mime_type: inline.mime_type })
            }
            _ => Ok(Part::Empty),
        }
    }
}
