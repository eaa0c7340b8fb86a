//! Adapter tests against a local HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use gemgate_core::{FetchError, GenerationError, GenerationPort, RemoteFetchPort};
use gemgate_gemini::{GeminiClient, GeminiClientConfig, ReqwestFetcher};
use serde_json::{Value, json};

#[derive(Debug, Clone)]
struct Captured {
    model_path: String,
    api_key: Option<String>,
    body: Value,
}

#[derive(Clone, Default)]
struct Upstream {
    captured: Arc<Mutex<Vec<Captured>>>,
}

async fn generate(
    State(upstream): State<Upstream>,
    Path(model_path): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let api_key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    upstream.captured.lock().unwrap().push(Captured {
        model_path: model_path.clone(),
        api_key: api_key.clone(),
        body,
    });

    if api_key.as_deref() != Some("test-key") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}})),
        );
    }
    if model_path.starts_with("empty-model") {
        return (StatusCode::OK, Json(json!({"candidates": []})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "A small "}, {"text": "red square."}]},
                "finishReason": "STOP"
            }]
        })),
    )
}

async fn image() -> impl IntoResponse {
    ([("content-type", "image/png")], b"\x89PNG-bytes".to_vec())
}

async fn slow_image() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(5)).await;
    b"late".to_vec()
}

async fn missing() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}

async fn spawn_upstream() -> (SocketAddr, Upstream) {
    let upstream = Upstream::default();
    let app = Router::new()
        .route("/v1beta/models/{model_path}", post(generate))
        .route("/img/square.png", get(image))
        .route("/img/slow.png", get(slow_image))
        .route("/img/missing.png", get(missing))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, upstream)
}

fn client_for(addr: SocketAddr, key: Option<&str>) -> GeminiClient {
    GeminiClient::new(
        GeminiClientConfig::new()
            .with_base_url(format!("http://{addr}/v1beta"))
            .with_optional_api_key(key.map(str::to_string))
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap()
}

#[tokio::test]
async fn text_only_request_sends_single_text_part() {
    let (addr, upstream) = spawn_upstream().await;
    let client = client_for(addr, Some("test-key"));

    let content = client
        .generate("Hi", "gemini-2.5-flash", None)
        .await
        .unwrap();

    assert_eq!(content.text, "A small red square.");
    let captured = upstream.captured.lock().unwrap().clone();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].model_path, "gemini-2.5-flash:generateContent");
    assert_eq!(captured[0].api_key.as_deref(), Some("test-key"));
    assert_eq!(
        captured[0].body,
        json!({"contents": [{"role": "user", "parts": [{"text": "Hi"}]}]})
    );
}

#[tokio::test]
async fn image_files_become_inline_data_parts() {
    let (addr, upstream) = spawn_upstream().await;
    let client = client_for(addr, Some("test-key"));
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("a.png");
    std::fs::write(&png, [0u8, 0, 0]).unwrap();
    let files: Vec<PathBuf> = vec![png];

    client
        .generate("Describe", "gemini-2.5-pro", Some(&files))
        .await
        .unwrap();

    let captured = upstream.captured.lock().unwrap().clone();
    let parts = &captured[0].body["contents"][0]["parts"];
    assert_eq!(parts[0], json!({"text": "Describe"}));
    assert_eq!(
        parts[1],
        json!({"inlineData": {"mimeType": "image/png", "data": "AAAA"}})
    );
}

#[tokio::test]
async fn rejected_key_is_an_upstream_error() {
    let (addr, _upstream) = spawn_upstream().await;
    let client = client_for(addr, Some("wrong-key"));

    let err = client
        .generate("Hi", "gemini-2.5-flash", None)
        .await
        .unwrap_err();

    let GenerationError::Upstream(message) = err else {
        panic!("expected upstream error, got {err:?}");
    };
    assert!(message.contains("400"));
    assert!(message.contains("API key not valid."));
}

#[tokio::test]
async fn missing_key_makes_no_request() {
    let (addr, upstream) = spawn_upstream().await;
    let client = client_for(addr, None);

    let err = client
        .generate("Hi", "gemini-2.5-flash", None)
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Unavailable(_)));
    assert!(upstream.captured.lock().unwrap().is_empty());
}

#[tokio::test]
async fn response_without_candidates_is_invalid() {
    let (addr, _upstream) = spawn_upstream().await;
    let client = client_for(addr, Some("test-key"));

    let err = client.generate("Hi", "empty-model", None).await.unwrap_err();

    assert!(matches!(err, GenerationError::InvalidResponse(_)));
}

#[tokio::test]
async fn fetcher_downloads_bytes() {
    let (addr, _upstream) = spawn_upstream().await;
    let fetcher = ReqwestFetcher::new("gemgate-test").unwrap();

    let bytes = fetcher
        .fetch(&format!("http://{addr}/img/square.png"), Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(bytes, b"\x89PNG-bytes".to_vec());
}

#[tokio::test]
async fn fetcher_reports_error_status() {
    let (addr, _upstream) = spawn_upstream().await;
    let fetcher = ReqwestFetcher::new("gemgate-test").unwrap();

    let err = fetcher
        .fetch(&format!("http://{addr}/img/missing.png"), Duration::from_secs(5))
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::Status { status: 404 });
}

#[tokio::test]
async fn fetcher_times_out() {
    let (addr, _upstream) = spawn_upstream().await;
    let fetcher = ReqwestFetcher::new("gemgate-test").unwrap();

    let err = fetcher
        .fetch(&format!("http://{addr}/img/slow.png"), Duration::from_millis(200))
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::Timeout(Duration::from_millis(200)));
}

#[tokio::test]
async fn fetcher_reports_unreachable_host() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let fetcher = ReqwestFetcher::new("gemgate-test").unwrap();

    let err = fetcher
        .fetch(&format!("http://{addr}/x.png"), Duration::from_secs(2))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
}
