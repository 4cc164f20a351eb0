// crates/aura-server/src/llm/compat.rs
// Chat-completions client for OpenAI-compatible providers (Groq by default)

use crate::llm::http_client::LlmHttpClient;
use crate::llm::openai_compat::{ChatRequest, parse_chat_response};
use crate::llm::provider::{LlmClient, Provider};
use crate::llm::{ChatOptions, ChatResult, Message};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Instant;
use tracing::{Span, debug, info, instrument};
use uuid::Uuid;

/// Non-streaming client for any provider that speaks `/chat/completions`
pub struct CompatClient {
    provider: Provider,
    api_key: String,
    model: String,
    url: String,
    http: LlmHttpClient,
}

impl CompatClient {
    /// Create a client with the provider's default model and endpoint
    pub fn new(provider: Provider, api_key: String, http: LlmHttpClient) -> Self {
        Self {
            provider,
            api_key,
            model: provider.default_model().into(),
            url: provider.default_url().into(),
            http,
        }
    }

    /// Override the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the chat-completions URL (proxies, local test servers)
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self, messages, options), fields(request_id, provider = %self.provider, model = %self.model, message_count = messages.len()))]
    pub async fn chat(&self, messages: Vec<Message>, options: ChatOptions) -> Result<ChatResult> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();
        let provider = self.provider.display_name();

        Span::current().record("request_id", request_id.as_str());

        info!(
            request_id = %request_id,
            message_count = messages.len(),
            model = %self.model,
            "Starting {} chat request", provider
        );

        let request = ChatRequest::new(&self.model, messages).with_options(options);
        let body = serde_json::to_string(&request)?;
        debug!(request_id = %request_id, "{} request: {}", provider, body);

        let response_body = self
            .http
            .execute(&request_id, &self.url, &self.api_key, body)
            .await?;

        let duration_ms = start_time.elapsed().as_millis() as u64;
        let result = parse_chat_response(&response_body, &request_id, duration_ms)?;

        if let Some(ref u) = result.usage {
            crate::llm::logging::log_usage(&request_id, provider, u);
        }

        crate::llm::logging::log_completion(
            &request_id,
            provider,
            duration_ms,
            result.content.as_ref().map(|c| c.len()).unwrap_or(0),
        );

        Ok(result)
    }
}

#[async_trait]
impl LlmClient for CompatClient {
    fn provider_type(&self) -> Provider {
        self.provider
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }

    async fn chat(&self, messages: Vec<Message>, options: ChatOptions) -> Result<ChatResult> {
        // Delegate to the inherent implementation
        self.chat(messages, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn http() -> LlmHttpClient {
        LlmHttpClient::new(Duration::from_secs(1), Duration::from_millis(200))
    }

    // ========================================================================
    // Client construction
    // ========================================================================

    #[test]
    fn test_new_uses_provider_defaults() {
        let client = CompatClient::new(Provider::Groq, "key".into(), http());
        assert_eq!(client.model_name(), "llama-3.3-70b-versatile");
        assert_eq!(client.url(), Provider::Groq.default_url());
        assert_eq!(client.provider_type(), Provider::Groq);
    }

    #[test]
    fn test_with_model_and_url() {
        let client = CompatClient::new(Provider::OpenAi, "key".into(), http())
            .with_model("gpt-4.1-mini")
            .with_url("http://localhost:9999/v1/chat/completions");
        assert_eq!(client.model_name(), "gpt-4.1-mini");
        assert_eq!(client.url(), "http://localhost:9999/v1/chat/completions");
        assert_eq!(client.provider_type(), Provider::OpenAi);
    }

    // ========================================================================
    // Failure surfaces as Err, not panic
    // ========================================================================

    #[tokio::test]
    async fn test_chat_unreachable_upstream_is_error() {
        let client = CompatClient::new(Provider::Groq, "key".into(), http())
            .with_url("http://127.0.0.1:1/chat/completions");
        let result = client
            .chat(vec![Message::user("hi")], ChatOptions::default())
            .await;
        assert!(result.is_err());
    }
}
