//! HTTP API tests driven through the router with fake providers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio::sync::Notify;
use tower::ServiceExt;

use talkhis_core::error::{ProviderFailure, TalkhisError, TalkhisResult, EMPTY_INPUT_MESSAGE};
use talkhis_core::traits::{GenerationOptions, Llm, LlmConfig, LlmResponse};
use talkhis_core::types::Message;
use talkhis_extractors::{READ_FAILED_MESSAGE, UNSUPPORTED_FORMAT_MESSAGE};
use talkhis_server::{create_server, AppState};

/// Replies with a fixed result and counts calls.
struct ScriptedLlm {
    reply: Result<String, ProviderFailure>,
    calls: AtomicUsize,
}

impl ScriptedLlm {
    fn ok(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(failure: ProviderFailure) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(failure),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Llm for ScriptedLlm {
    async fn generate(
        &self,
        _messages: &[Message],
        _options: Option<GenerationOptions>,
    ) -> TalkhisResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(LlmResponse::text(text.clone())),
            Err(failure) => Err(TalkhisError::provider(failure.clone())),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Blocks inside `generate` until released.
struct GatedLlm {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl Llm for GatedLlm {
    async fn generate(
        &self,
        _messages: &[Message],
        _options: Option<GenerationOptions>,
    ) -> TalkhisResult<LlmResponse> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(LlmResponse::text("done"))
    }

    fn model_name(&self) -> &str {
        "gated"
    }
}

fn app(llm: Arc<dyn Llm>) -> Router {
    create_server(AppState::from_llm(llm, &LlmConfig::default()))
}

fn summarize_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/summarize")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn upload_request(file_name: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "talkhis-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/extract")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app(ScriptedLlm::ok("x"))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"], "scripted");
}

#[tokio::test]
async fn test_lengths_listing() {
    let response = app(ScriptedLlm::ok("x"))
        .oneshot(Request::get("/lengths").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = json_body(response).await;
    let lengths = body.as_array().unwrap();
    assert_eq!(lengths.len(), 5);
    assert_eq!(lengths[0]["key"], "very-short");
    assert_eq!(lengths[1]["label"], "قصير");
    assert_eq!(lengths[2]["default"], true);
    assert_eq!(lengths.iter().filter(|l| l["default"] == true).count(), 1);
}

#[tokio::test]
async fn test_summarize_returns_generated_text() {
    let llm = ScriptedLlm::ok("ملخص تجريبي");
    let response = app(llm.clone())
        .oneshot(summarize_request(
            json!({"text": "المقدمة\nهذا بحث تجريبي.", "length": "قصير"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["summary"], "ملخص تجريبي");
    assert_eq!(body["length"], "short");
    assert_eq!(body["label"], "قصير");
    assert_eq!(body["model"], "scripted");
    assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_summarize_unknown_length_is_medium() {
    let response = app(ScriptedLlm::ok("x"))
        .oneshot(summarize_request(json!({"text": "نص", "length": "huge"})))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["length"], "medium");

    let response = app(ScriptedLlm::ok("x"))
        .oneshot(summarize_request(json!({"text": "نص"})))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["length"], "medium");
}

#[tokio::test]
async fn test_summarize_empty_text_is_rejected_without_remote_call() {
    let llm = ScriptedLlm::ok("x");
    let response = app(llm.clone())
        .oneshot(summarize_request(json!({"text": "  \n\t "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "VAL_001");
    assert_eq!(body["error"]["message"], EMPTY_INPUT_MESSAGE);
    assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_summarize_remote_failure_is_bad_gateway() {
    let llm = ScriptedLlm::failing(ProviderFailure::structured(Some(429), "quota exceeded"));
    let response = app(llm)
        .oneshot(summarize_request(json!({"text": "نص"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "QTA_001");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .ends_with("quota exceeded"));
}

#[tokio::test]
async fn test_second_submission_while_busy_is_conflict() {
    let llm = Arc::new(GatedLlm {
        entered: Notify::new(),
        release: Notify::new(),
    });
    let app = app(llm.clone());

    let first = tokio::spawn(
        app.clone()
            .oneshot(summarize_request(json!({"text": "الأول"}))),
    );
    llm.entered.notified().await;

    let second = app
        .clone()
        .oneshot(summarize_request(json!({"text": "الثاني"})))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(second).await["error"]["code"], "BUSY");

    llm.release.notify_one();
    let first = first.await.unwrap().unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    // The slot is free again once the first request finishes.
    let upload = app
        .oneshot(upload_request("a.txt", "text/plain", "نص".as_bytes()))
        .await
        .unwrap();
    assert_eq!(upload.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_empty_text_while_busy_is_still_rejected_as_empty() {
    let llm = Arc::new(GatedLlm {
        entered: Notify::new(),
        release: Notify::new(),
    });
    let app = app(llm.clone());

    let first = tokio::spawn(
        app.clone()
            .oneshot(summarize_request(json!({"text": "الأول"}))),
    );
    llm.entered.notified().await;

    let blank = app
        .clone()
        .oneshot(summarize_request(json!({"text": " \n "})))
        .await
        .unwrap();
    assert_eq!(blank.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(blank).await["error"]["code"], "VAL_001");

    llm.release.notify_one();
    assert_eq!(first.await.unwrap().unwrap().status(), StatusCode::OK);
}

#[tokio::test]
async fn test_extract_plain_text_upload() {
    let text = "المقدمة\nهذا بحث تجريبي.";
    let response = app(ScriptedLlm::ok("x"))
        .oneshot(upload_request("paper.txt", "text/plain", text.as_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["file_name"], "paper.txt");
    assert_eq!(body["text"], text);
    assert_eq!(body["characters"], text.chars().count());
}

#[tokio::test]
async fn test_extract_generic_mime_falls_back_to_extension() {
    let response = app(ScriptedLlm::ok("x"))
        .oneshot(upload_request(
            "notes.txt",
            "application/octet-stream",
            b"plain notes",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["text"], "plain notes");
}

#[tokio::test]
async fn test_extract_unsupported_upload() {
    let response = app(ScriptedLlm::ok("x"))
        .oneshot(upload_request("paper.pdf", "application/pdf", b"%PDF-1.7"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "EXT_001");
    assert_eq!(body["error"]["message"], UNSUPPORTED_FORMAT_MESSAGE);
    assert_eq!(body["error"]["details"]["declared"], "application/pdf");
}

#[tokio::test]
async fn test_extract_invalid_utf8_is_unprocessable() {
    let response = app(ScriptedLlm::ok("x"))
        .oneshot(upload_request("broken.txt", "text/plain", &[0xff, 0xfe, 0x00]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"]["code"], "EXT_003");
}

#[tokio::test]
async fn test_extract_truncated_upload_is_read_failure() {
    let boundary = "talkhis-test-boundary";
    // The closing boundary never arrives.
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"paper.txt\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         نص مقطوع"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/extract")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app(ScriptedLlm::ok("x")).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "EXT_002");
    assert_eq!(body["error"]["message"], READ_FAILED_MESSAGE);
}
