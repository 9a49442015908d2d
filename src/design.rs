//! One redesign request, from prompt to extracted result.

use crate::extract::{extract, DesignResult};
use crate::ports::{DesignGenerator, GenerationRequest};
use crate::prompt::build_prompt;

/// MIME type assumed when the upload neither declares nor reveals one.
const FALLBACK_MIME_TYPE: &str = "image/png";

/// The user's photo and instructions.
#[derive(Debug, Clone)]
pub struct DesignRequest {
    /// Raw photo bytes.
    pub image: Vec<u8>,
    /// Content type declared by the client, if any.
    pub content_type: Option<String>,
    /// Target style label.
    pub style: String,
    /// Free-text edits the user asked for.
    pub specific_changes: Option<String>,
}

impl DesignRequest {
    /// MIME type to send upstream: the declared one when it is specific,
    /// otherwise whatever the bytes look like.
    #[must_use]
    pub fn mime_type(&self) -> String {
        match self.content_type.as_deref().map(str::trim) {
            Some(declared) if !declared.is_empty() && declared != "application/octet-stream" => {
                declared.to_string()
            }
            _ => image::guess_format(&self.image)
                .map_or(FALLBACK_MIME_TYPE, |format| format.to_mime_type())
                .to_string(),
        }
    }
}

/// Run a redesign against the generator.
///
/// Never fails: any generator error is logged and replaced by
/// [`DesignResult::fallback`].
pub async fn redesign(
    generator: &dyn DesignGenerator,
    model: &str,
    request: DesignRequest,
) -> DesignResult {
    let mime_type = request.mime_type();
    let prompt = build_prompt(&request.style, request.specific_changes.as_deref());
    let generation = GenerationRequest {
        model: model.to_string(),
        prompt,
        image: request.image,
        mime_type,
    };

    match generator.generate(&generation).await {
        Ok(response) => {
            let result = extract(&response);
            tracing::info!(
                candidates = response.candidates.len(),
                has_image = result.image_url.is_some(),
                suggestion_chars = result.suggestions.len(),
                "generation succeeded"
            );
            result
        }
        Err(e) => {
            tracing::warn!(kind = e.kind(), error = %e, "generation failed; returning fallback");
            DesignResult::fallback()
        }
    }
}
