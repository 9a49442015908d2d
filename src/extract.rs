//! Pulls suggestion text and the generated image out of a model response.

use base64::Engine;
use serde::Serialize;

use crate::ports::{GenerationResponse, Part};

/// Apology returned to the client whenever the generation call fails.
pub const FALLBACK_MESSAGE: &str = "Sorry, I couldn't process that request. Try specifying the \
                                    item more clearly (e.g., 'coffee table', 'area rug', 'wall \
                                    color').";

/// Outcome of one redesign request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignResult {
    /// Generated image as a `data:` URL, if the model returned one.
    pub image_url: Option<String>,
    /// Suggestion text, newline-joined.
    pub suggestions: String,
}

impl DesignResult {
    /// Result used when the external call fails.
    #[must_use]
    pub fn fallback() -> Self {
        Self { image_url: None, suggestions: FALLBACK_MESSAGE.to_string() }
    }
}

/// Encode image bytes as a PNG data URL.
#[must_use]
pub fn png_data_url(data: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(data);
    format!("data:image/png;base64,{encoded}")
}

/// Collect all text parts and the first inline image from a response.
///
/// The top-level `text` field is used only when no text part was found.
#[must_use]
pub fn extract(response: &GenerationResponse) -> DesignResult {
    let mut texts: Vec<&str> = Vec::new();
    let mut image_url = None;

    for part in response.candidates.iter().flat_map(|c| c.parts.iter()) {
        match part {
            Part::Text(text) if !text.is_empty() => texts.push(text),
            Part::InlineImage { data, .. } if !data.is_empty() && image_url.is_none() => {
                image_url = Some(png_data_url(data));
            }
            Part::Text(_) | Part::InlineImage { .. } | Part::Empty => {}
        }
    }

    if texts.is_empty() {
        if let Some(text) = response.text.as_deref().filter(|t| !t.is_empty()) {
            texts.push(text);
        }
    }

    DesignResult { image_url, suggestions: texts.join("\n").trim().to_string() }
}
