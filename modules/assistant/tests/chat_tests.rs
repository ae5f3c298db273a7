//! `/api/assistant/chat` against a mocked Gemini endpoint

use assistant::{AssistantModule, Config, FALLBACK_REPLY};
use axum::{body::Body, Router};
use http::{header, Request, StatusCode};
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

fn print_test_header(name: &str, stages: &[&str]) {
    println!("\n🧪 {}", name);
    for (i, stage) in stages.iter().enumerate() {
        println!("📝 Stage {}: {}", i + 1, stage);
    }
}

fn router(server: &MockServer, api_key: Option<&str>) -> Router {
    let module = AssistantModule::default();
    module
        .init(Config {
            api_key: api_key.map(str::to_string),
            base_url: server.base_url(),
            ..Default::default()
        })
        .unwrap();
    module.register_rest(Router::new()).unwrap()
}

async fn chat(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/assistant/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_chat_returns_model_reply() {
    print_test_header(
        "test_chat_returns_model_reply",
        &["Forward the conversation to generateContent", "Return the first candidate"],
    );
    let server = MockServer::start_async().await;
    let gemini = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-1.5-flash:generateContent")
                .header("x-goog-api-key", "test-key");
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{"text": "Desconecte el equipo y revise el termostato."}]
                    }
                }]
            }));
        })
        .await;

    let (status, body) = chat(
        router(&server, Some("test-key")),
        json!({
            "message": "La refrigeradora no enfría",
            "history": [
                {"role": "user", "text": "Hola"},
                {"role": "model", "content": "¿En qué le ayudo?"}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Desconecte el equipo y revise el termostato.");
    gemini.assert_async().await;
}

#[tokio::test]
async fn test_gemini_failure_returns_fallback() {
    print_test_header(
        "test_gemini_failure_returns_fallback",
        &["An upstream 500 is answered with the fixed apology, not an error"],
    );
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(500).body("internal");
        })
        .await;

    let (status, body) = chat(
        router(&server, Some("test-key")),
        json!({"message": "Código E21 en lavadora"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], FALLBACK_REPLY);
}

#[tokio::test]
async fn test_empty_candidates_return_fallback() {
    print_test_header(
        "test_empty_candidates_return_fallback",
        &["A response without candidates counts as a failure"],
    );
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({"candidates": []}));
        })
        .await;

    let (_, body) = chat(router(&server, Some("test-key")), json!({"message": "hola"})).await;

    assert_eq!(body["reply"], FALLBACK_REPLY);
}

#[tokio::test]
async fn test_missing_key_skips_the_call() {
    print_test_header(
        "test_missing_key_skips_the_call",
        &["Without an API key nothing is sent and the fallback is returned"],
    );
    let server = MockServer::start_async().await;
    let gemini = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200);
        })
        .await;

    let (status, body) = chat(router(&server, None), json!({"message": "hola"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], FALLBACK_REPLY);
    gemini.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_empty_message_is_400() {
    print_test_header(
        "test_empty_message_is_400",
        &["Blank messages and unknown roles are rejected before any call"],
    );
    let server = MockServer::start_async().await;

    let (status, body) = chat(router(&server, Some("k")), json!({"message": "   "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, _) = chat(
        router(&server, Some("k")),
        json!({"message": "hola", "history": [{"role": "system", "text": "x"}]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
