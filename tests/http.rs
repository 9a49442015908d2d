//! Router tests against stub generators — no network I/O.

mod common;

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;

use common::{generate_request, json_body, send, FormField, TINY_PNG};
use respace::error::GenerationError;
use respace::ports::{
    Candidate, DesignGenerator, GenerateFuture, GenerationRequest, GenerationResponse, Part,
};
use respace::server::{router, AppState, RouterSettings};

const APOLOGY: &str = "Sorry, I couldn't process that request. Try specifying the item more \
                       clearly (e.g., 'coffee table', 'area rug', 'wall color').";

/// Remembers the last request and answers with a canned outcome.
struct StubGenerator {
    last: Mutex<Option<GenerationRequest>>,
    fail: bool,
}

impl StubGenerator {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self { last: Mutex::new(None), fail })
    }

    fn last_request(&self) -> GenerationRequest {
        self.last.lock().unwrap().clone().expect("generator was not called")
    }
}

impl DesignGenerator for StubGenerator {
    fn generate(&self, request: &GenerationRequest) -> GenerateFuture<'_> {
        *self.last.lock().unwrap() = Some(request.clone());
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                return Err(GenerationError::Api { status: 500, message: "internal".into() });
            }
            Ok(GenerationResponse {
                candidates: vec![Candidate {
                    parts: vec![
                        Part::Text("A".into()),
                        Part::InlineImage { data: vec![1, 2, 3], mime_type: "image/png".into() },
                        Part::Text("B".into()),
                    ],
                }],
                text: None,
            })
        })
    }
}

fn settings() -> RouterSettings {
    RouterSettings {
        allowed_origins: vec!["http://localhost:5173".into()],
        max_upload_bytes: 1024 * 1024,
    }
}

fn app(generator: Arc<StubGenerator>) -> Router {
    let state = Arc::new(AppState { generator, model: "gemini-test-model".into() });
    router(state, &settings()).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app(StubGenerator::new(false));
    let response =
        send(&app, Request::builder().uri("/health").body(Body::empty()).unwrap()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn generate_returns_image_and_suggestions() {
    let generator = StubGenerator::new(false);
    let app = app(Arc::clone(&generator));

    let response = send(
        &app,
        generate_request(&[
            FormField::file("image", "room.png", Some("image/png"), TINY_PNG),
            FormField::text("style", "Scandinavian"),
            FormField::text("specific_changes", "add a rug"),
        ]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["received"]["filename"], "room.png");
    assert_eq!(body["received"]["content_type"], "image/png");
    assert_eq!(body["received"]["style"], "Scandinavian");
    assert_eq!(body["received"]["specific_changes"], "add a rug");
    assert_eq!(body["image_url"], "data:image/png;base64,AQID");
    assert_eq!(body["design_suggestions"], "A\nB");

    let sent = generator.last_request();
    assert_eq!(sent.model, "gemini-test-model");
    assert_eq!(sent.image, TINY_PNG);
    assert_eq!(sent.mime_type, "image/png");
    assert!(sent.prompt.contains("into a 'Scandinavian' style"));
    assert!(sent.prompt.contains("Specific changes requested by user: add a rug"));
}

#[tokio::test]
async fn generator_failure_is_a_soft_fallback() {
    let app = app(StubGenerator::new(true));

    let response = send(
        &app,
        generate_request(&[
            FormField::file("image", "room.jpg", Some("image/jpeg"), b"\xFF\xD8\xFF\xE0"),
            FormField::text("style", "Industrial"),
        ]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["ok"], true);
    assert!(body["image_url"].is_null());
    assert_eq!(body["design_suggestions"], APOLOGY);
}

#[tokio::test]
async fn keep_style_without_changes() {
    let generator = StubGenerator::new(false);
    let app = app(Arc::clone(&generator));

    let response = send(
        &app,
        generate_request(&[
            FormField::file("image", "room.png", None, TINY_PNG),
            FormField::text("style", "  Keep Current Style "),
        ]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["received"]["specific_changes"], "");
    assert!(body["received"]["content_type"].is_null());
    assert_eq!(body["received"]["style"], "  Keep Current Style ");

    let sent = generator.last_request();
    assert_eq!(sent.mime_type, "image/png", "undeclared type should be sniffed");
    assert!(sent.prompt.contains("Keep the existing style"));
    assert!(sent.prompt.contains("(user did not specify)"));
    assert!(!sent.prompt.contains("Restyle"));
}

#[tokio::test]
async fn empty_style_is_unprocessable() {
    let generator = StubGenerator::new(false);
    let app = app(Arc::clone(&generator));

    let response = send(
        &app,
        generate_request(&[
            FormField::file("image", "room.png", Some("image/png"), TINY_PNG),
            FormField::text("style", ""),
        ]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["detail"].as_str().unwrap().contains("'style'"));
    assert!(generator.last.lock().unwrap().is_none());
}

#[tokio::test]
async fn image_without_filename_is_unprocessable() {
    let generator = StubGenerator::new(false);
    let app = app(Arc::clone(&generator));

    let image = FormField {
        name: "image",
        filename: None,
        content_type: Some("image/png"),
        data: TINY_PNG,
    };
    let response =
        send(&app, generate_request(&[image, FormField::text("style", "Boho")])).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["detail"].as_str().unwrap().contains("'image'"));
    assert!(generator.last.lock().unwrap().is_none());
}

#[tokio::test]
async fn oversized_upload_is_payload_too_large() {
    let generator = StubGenerator::new(false);
    let state = Arc::new(AppState {
        generator: Arc::clone(&generator) as Arc<dyn DesignGenerator>,
        model: "gemini-test-model".into(),
    });
    let app = router(
        state,
        &RouterSettings {
            allowed_origins: vec!["http://localhost:5173".into()],
            max_upload_bytes: 1024,
        },
    )
    .unwrap();

    let photo = vec![0xAB_u8; 4096];
    let response = send(
        &app,
        generate_request(&[
            FormField::text("style", "Boho"),
            FormField::file("image", "room.png", Some("image/png"), &photo),
        ]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(generator.last.lock().unwrap().is_none());
}

#[tokio::test]
async fn missing_image_is_unprocessable() {
    let generator = StubGenerator::new(false);
    let app = app(Arc::clone(&generator));

    let response = send(&app, generate_request(&[FormField::text("style", "Boho")])).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["detail"].as_str().unwrap().contains("'image'"));
    assert!(generator.last.lock().unwrap().is_none());
}

#[tokio::test]
async fn missing_style_is_unprocessable() {
    let app = app(StubGenerator::new(false));

    let response = send(
        &app,
        generate_request(&[FormField::file("image", "room.png", Some("image/png"), TINY_PNG)]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["detail"].as_str().unwrap().contains("'style'"));
}

#[tokio::test]
async fn non_multipart_body_is_unprocessable() {
    let app = app(StubGenerator::new(false));

    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/generate")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"style": "Boho"}"#))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method("OPTIONS")
        .uri("/generate")
        .header("origin", origin)
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn cors_allows_listed_origin() {
    let app = app(StubGenerator::new(false));

    let response = send(&app, preflight("http://localhost:5173")).await;

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn cors_ignores_unlisted_origin() {
    let app = app(StubGenerator::new(false));

    let response = send(&app, preflight("https://evil.example")).await;

    assert!(response.headers().get("access-control-allow-origin").is_none());
}
