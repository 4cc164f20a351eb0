// crates/aura-server/src/llm/http_client.rs
// Single-attempt HTTP transport for upstream LLM calls

use anyhow::{Result, anyhow};
use reqwest::{Client, header::CONTENT_TYPE};
use std::time::Duration;
use tracing::warn;

/// Thin wrapper over a pooled reqwest client.
///
/// Every call is one attempt. Transient failures surface to the caller
/// instead of being retried.
pub struct LlmHttpClient {
    client: Client,
}

impl LlmHttpClient {
    /// Build a dedicated client with its own transport timeouts
    pub fn new(request_timeout: Duration, connect_timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }

    /// Reuse the process-wide client from [`crate::http::create_shared_client`]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// POST a JSON body with Bearer auth and return the response text.
    /// Non-2xx statuses are errors carrying the status and body.
    pub async fn execute(&self, request_id: &str, url: &str, api_key: &str, body: String) -> Result<String> {
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| anyhow!(transport_failure(&e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.text().await?);
        }

        let error_body = response.text().await.unwrap_or_default();
        warn!(
            request_id = %request_id,
            status = %status,
            body = %error_body,
            "Upstream rejected request"
        );
        Err(anyhow!("API error {}: {}", status, error_body))
    }
}

/// Describe a send failure so logs can tell "unreachable" from "slow"
fn transport_failure(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("Upstream transport timeout: {}", e)
    } else if e.is_connect() {
        format!("Upstream unreachable: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}
