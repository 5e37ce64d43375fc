// ABOUTME: Integration tests for the Groq provider against a local stand-in API
// ABOUTME: Checks the request wire format, response parsing and error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use repup_server::errors::ErrorCode;
use repup_server::llm::{ChatMessage, ChatRequest, GroqProvider, LlmProvider};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone)]
struct StubApi {
    status: StatusCode,
    body: Value,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn completions(
    State(api): State<StubApi>,
    headers: HeaderMap,
    Json(request): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);
    api.seen.lock().unwrap().push((auth, request));
    (api.status, Json(api.body.clone()))
}

async fn models(State(api): State<StubApi>) -> StatusCode {
    api.status
}

/// Serve the stub on an ephemeral port, returning its base URL
async fn spawn_stub(api: StubApi) -> String {
    let app = Router::new()
        .route("/openai/v1/chat/completions", post(completions))
        .route("/openai/v1/models", get(models))
        .with_state(api);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/openai/v1/")
}

fn stub(status: StatusCode, body: Value) -> StubApi {
    StubApi {
        status,
        body,
        seen: Arc::new(Mutex::new(Vec::new())),
    }
}

fn provider(base_url: &str) -> GroqProvider {
    GroqProvider::new("gsk_test", base_url, "llama3-8b-8192", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_complete_sends_openai_request_and_parses_reply() {
    let api = stub(
        StatusCode::OK,
        json!({
            "model": "llama3-8b-8192",
            "choices": [{"message": {"role": "assistant", "content": "## Plan"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        }),
    );
    let seen = Arc::clone(&api.seen);
    let base_url = spawn_stub(api).await;

    let request = ChatRequest::new(vec![ChatMessage::user("Generate a plan")])
        .with_temperature(0.5)
        .with_max_tokens(512);
    let response = provider(&base_url).complete(&request).await.unwrap();

    assert_eq!(response.content, "## Plan");
    assert_eq!(response.model, "llama3-8b-8192");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.unwrap().total_tokens, 15);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer gsk_test"));
    assert_eq!(body["model"], "llama3-8b-8192");
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "Generate a plan");
    assert_eq!(body["max_tokens"], 512);
    assert_eq!(body["temperature"], 0.5);
}

#[tokio::test]
async fn test_request_model_overrides_default() {
    let api = stub(
        StatusCode::OK,
        json!({"choices": [{"message": {"content": "ok"}, "finish_reason": "stop"}]}),
    );
    let seen = Arc::clone(&api.seen);
    let base_url = spawn_stub(api).await;

    let request = ChatRequest::new(vec![ChatMessage::user("hi")]).with_model("gemma2-9b-it");
    let response = provider(&base_url).complete(&request).await.unwrap();

    assert_eq!(response.model, "gemma2-9b-it");
    assert_eq!(seen.lock().unwrap()[0].1["model"], "gemma2-9b-it");
}

#[tokio::test]
async fn test_error_statuses_map_to_error_codes() {
    let cases = [
        (StatusCode::UNAUTHORIZED, ErrorCode::ExternalAuthFailed),
        (StatusCode::TOO_MANY_REQUESTS, ErrorCode::ExternalRateLimited),
        (StatusCode::BAD_REQUEST, ErrorCode::InvalidInput),
        (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::ExternalServiceError),
    ];

    for (status, code) in cases {
        let base_url = spawn_stub(stub(
            status,
            json!({"error": {"message": "nope", "type": "test_error"}}),
        ))
        .await;

        let err = provider(&base_url)
            .complete(&ChatRequest::new(vec![ChatMessage::user("hi")]))
            .await
            .unwrap_err();
        assert_eq!(err.code, code, "status {status}");
        assert!(err.message.contains("nope"), "status {status}");
    }
}

#[tokio::test]
async fn test_empty_choices_is_service_error() {
    let base_url = spawn_stub(stub(StatusCode::OK, json!({"choices": []}))).await;

    let err = provider(&base_url)
        .complete(&ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_unreachable_api_is_unavailable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = provider(&format!("http://{addr}"))
        .complete(&ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
}

#[tokio::test]
async fn test_health_check() {
    let healthy = spawn_stub(stub(StatusCode::OK, json!({}))).await;
    assert!(provider(&healthy).health_check().await.unwrap());

    let rejected = spawn_stub(stub(StatusCode::UNAUTHORIZED, json!({}))).await;
    assert!(!provider(&rejected).health_check().await.unwrap());
}
