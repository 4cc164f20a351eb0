// tests/api.rs
// HTTP surface tests driven through the router with a fake upstream

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aura::classifier::Classifier;
use aura::llm::{ChatOptions, ChatResult, LlmClient, Message, Provider};
use aura::web::{create_router, state::AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Answers by echoing the quoted transcript back as the only keyword
struct EchoClient {
    delay_per_char: Duration,
}

#[async_trait]
impl LlmClient for EchoClient {
    async fn chat(&self, messages: Vec<Message>, _options: ChatOptions) -> anyhow::Result<ChatResult> {
        let text = messages
            .last()
            .and_then(|m| m.content.strip_prefix("Analyze this transcript: \""))
            .and_then(|c| c.strip_suffix('"'))
            .unwrap_or_default()
            .to_string();

        // Longer texts answer later, so concurrent replies finish out of order
        tokio::time::sleep(self.delay_per_char * text.len() as u32).await;

        let reply = json!({ "emotion": format!("label-{}", text), "intensity": 0.7, "keywords": [text] });
        Ok(ChatResult {
            request_id: "echo".into(),
            content: Some(reply.to_string()),
            ..Default::default()
        })
    }

    fn provider_type(&self) -> Provider {
        Provider::Groq
    }

    fn model_name(&self) -> String {
        "echo".into()
    }
}

/// Replays one fixed completion, optionally after a delay
struct FixedClient {
    content: Result<String, String>,
    delay: Duration,
}

#[async_trait]
impl LlmClient for FixedClient {
    async fn chat(&self, _messages: Vec<Message>, _options: ChatOptions) -> anyhow::Result<ChatResult> {
        tokio::time::sleep(self.delay).await;
        match &self.content {
            Ok(content) => Ok(ChatResult {
                request_id: "fixed".into(),
                content: Some(content.clone()),
                ..Default::default()
            }),
            Err(msg) => Err(anyhow::anyhow!("{}", msg)),
        }
    }

    fn provider_type(&self) -> Provider {
        Provider::Groq
    }

    fn model_name(&self) -> String {
        "fixed".into()
    }
}

fn origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "https://*.onrender.com".to_string(),
    ]
}

fn app(client: impl LlmClient + 'static) -> axum::Router {
    let classifier = Classifier::new(Arc::new(client));
    create_router(AppState::new(classifier), &origins())
}

fn fixed(content: &str) -> FixedClient {
    FixedClient {
        content: Ok(content.to_string()),
        delay: Duration::ZERO,
    }
}

async fn post_text(app: axum::Router, text: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process_text")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "text": text }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

// ============================================================================
// /health
// ============================================================================

#[tokio::test]
async fn test_health_ignores_upstream_state() {
    let app = app(FixedClient {
        content: Err("upstream down".into()),
        delay: Duration::ZERO,
    });

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({ "status": "healthy" }));
}

// ============================================================================
// /process_text
// ============================================================================

#[tokio::test]
async fn test_success_is_passed_through() {
    let reply = json!({"emotion": "happy", "intensity": 0.8, "keywords": ["great", "day"]});
    let (status, body) = post_text(app(fixed(&reply.to_string())), "great day").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, reply);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_is_200_with_fallback() {
    let app = app(FixedClient {
        content: Ok(r#"{"emotion":"happy","intensity":0.8,"keywords":["a","b","c"]}"#.into()),
        delay: Duration::from_secs(60),
    });
    let (status, body) = post_text(app, "slow upstream").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"emotion": "calm", "intensity": 0.5, "keywords": ["timeout"], "error": "API timeout"})
    );
}

#[tokio::test]
async fn test_malformed_reply_is_200_with_fallback() {
    let (status, body) = post_text(app(fixed("Sure! Here is the JSON you asked for")), "hello").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["emotion"], "calm");
    assert_eq!(body["intensity"], 0.5);
    assert_eq!(body["keywords"], json!(["error"]));
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_key_is_200_with_fallback() {
    let (status, body) = post_text(app(fixed(r#"{"emotion":"sad","intensity":0.3}"#)), "rainy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["keywords"], json!(["error"]));
    assert_eq!(body["error"], "Invalid response structure");
}

#[tokio::test]
async fn test_upstream_failure_is_200_with_fallback() {
    let app = app(FixedClient {
        content: Err("API error 429 Too Many Requests: slow down".into()),
        delay: Duration::ZERO,
    });
    let (status, body) = post_text(app, "anything").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["emotion"], "calm");
    assert_eq!(body["error"], "API error 429 Too Many Requests: slow down");
}

#[tokio::test]
async fn test_empty_text_is_accepted() {
    let (status, body) = post_text(app(EchoClient { delay_per_char: Duration::ZERO }), "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["keywords"], json!([""]));
}

#[tokio::test]
async fn test_body_without_text_is_rejected() {
    let response = app(fixed("{}"))
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process_text")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"message": "hi"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_concurrent_requests_do_not_interfere() {
    let app = app(EchoClient {
        delay_per_char: Duration::from_millis(5),
    });
    let texts = ["a much longer sentence about fear", "short", "medium length text", "x"];

    let mut tasks = tokio::task::JoinSet::new();
    for text in texts {
        let app = app.clone();
        tasks.spawn(async move { (text, post_text(app, text).await) });
    }

    let mut seen = 0;
    while let Some(joined) = tasks.join_next().await {
        let (text, (status, body)) = joined.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["emotion"], format!("label-{}", text));
        assert_eq!(body["keywords"], json!([text]));
        seen += 1;
    }
    assert_eq!(seen, texts.len());
}

// ============================================================================
// CORS
// ============================================================================

async fn preflight(origin: &str) -> axum::response::Response {
    app(fixed("{}"))
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/process_text")
                .header(header::ORIGIN, origin)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let response = preflight("http://localhost:3000").await;
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_cors_allows_wildcard_subdomain() {
    let response = preflight("https://sentiment-frontend-vppb.onrender.com").await;
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://sentiment-frontend-vppb.onrender.com"
    );
}

#[tokio::test]
async fn test_cors_rejects_unknown_origin() {
    let response = preflight("https://evil.example").await;
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
