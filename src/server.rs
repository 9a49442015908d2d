//! HTTP surface: `/health` and `/generate`.

use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::design::{redesign, DesignRequest};
use crate::error::{RequestError, ServerError};
use crate::ports::DesignGenerator;

/// State shared by all handlers, built once at startup.
pub struct AppState {
    /// Generation backend.
    pub generator: Arc<dyn DesignGenerator>,
    /// Resolved model identifier.
    pub model: String,
}

/// Router-level settings taken from the config.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    /// Origins allowed by CORS.
    pub allowed_origins: Vec<String>,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

/// Body of a `/health` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
}

/// Echo of what the server received.
#[derive(Debug, Serialize, Deserialize)]
pub struct Received {
    /// Original filename of the upload.
    pub filename: Option<String>,
    /// Content type declared by the client.
    pub content_type: Option<String>,
    /// Style label as submitted.
    pub style: String,
    /// Requested changes, empty when omitted.
    pub specific_changes: String,
}

/// Body of a `/generate` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Always `true`; failures are reported through the suggestion text.
    pub ok: bool,
    /// Echo of the request fields.
    pub received: Received,
    /// Generated image as a data URL.
    pub image_url: Option<String>,
    /// Design suggestions or the apology message.
    pub design_suggestions: String,
}

/// Build the CORS layer for an explicit origin allow-list.
///
/// # Errors
///
/// Returns an error if an origin is not a valid header value.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, ServerError> {
    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o)
                .map_err(|e| ServerError::Config(format!("Invalid CORS origin '{o}': {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Build the application router.
///
/// # Errors
///
/// Returns an error if the CORS settings are invalid.
pub fn router(state: Arc<AppState>, settings: &RouterSettings) -> Result<Router, ServerError> {
    Ok(Router::new()
        .route("/health", get(health))
        .route("/generate", post(generate))
        .layer(DefaultBodyLimit::max(settings.max_upload_bytes))
        .layer(cors_layer(&settings.allowed_origins)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string() })
}

/// Fields read from the `/generate` multipart body.
#[derive(Default)]
struct GenerateForm {
    image: Option<Vec<u8>>,
    filename: Option<String>,
    content_type: Option<String>,
    style: Option<String>,
    specific_changes: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<GenerateForm, RequestError> {
    let mut form = GenerateForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("image") => {
                // A part without a filename is a plain form value, not an upload.
                let Some(filename) = field.file_name().map(ToString::to_string) else {
                    continue;
                };
                form.filename = Some(filename);
                form.content_type = field.content_type().map(ToString::to_string);
                form.image = Some(field.bytes().await?.to_vec());
            }
            Some("style") => form.style = Some(field.text().await?),
            Some("specific_changes") => form.specific_changes = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(form)
}

async fn generate(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, RequestError> {
    let multipart = multipart.map_err(|e| RequestError::Multipart {
        status: e.status(),
        message: e.body_text(),
    })?;
    let form = read_form(multipart).await?;

    let image = form.image.ok_or(RequestError::MissingField("image"))?;
    let style = form
        .style
        .filter(|s| !s.is_empty())
        .ok_or(RequestError::MissingField("style"))?;
    let specific_changes = form.specific_changes.filter(|c| !c.is_empty());

    tracing::info!(
        filename = form.filename.as_deref().unwrap_or("-"),
        image_bytes = image.len(),
        style = %style,
        "generate request"
    );

    let result = redesign(
        state.generator.as_ref(),
        &state.model,
        DesignRequest {
            image,
            content_type: form.content_type.clone(),
            style: style.clone(),
            specific_changes: specific_changes.clone(),
        },
    )
    .await;

    Ok(Json(GenerateResponse {
        ok: true,
        received: Received {
            filename: form.filename,
            content_type: form.content_type,
            style,
            specific_changes: specific_changes.unwrap_or_default(),
        },
        image_url: result.image_url,
        design_suggestions: result.suggestions,
    }))
}
