// crates/aura-server/src/classifier/mod.rs
// Emotion classification gateway: prompt, time-boxed upstream call, reply contract, fallback

mod prompt;
mod schema;

pub use prompt::{build_messages, system_prompt, user_message};
pub use schema::{
    ClassificationRequest, Emotion, FALLBACK_INTENSITY, FALLBACK_SENTIMENT, FallbackResult, OutputMode,
    Outcome,
};

use crate::error::ClassifyError;
use crate::llm::{ChatOptions, LlmClient, ResponseFormat};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Wall-clock budget for one upstream call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Low randomness favors repeatable labels
pub const TEMPERATURE: f32 = 0.3;

/// Caps cost and latency; a long reply may be cut off and fail to parse
pub const MAX_TOKENS: u32 = 200;

/// Mediates between callers and the upstream model.
///
/// Holds the only shared state in the service, a read-only client handle,
/// so one instance serves every request concurrently.
pub struct Classifier {
    client: Arc<dyn LlmClient>,
    mode: OutputMode,
    timeout: Duration,
}

impl Classifier {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            mode: OutputMode::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Options sent with every classification call
    pub fn chat_options() -> ChatOptions {
        ChatOptions {
            temperature: Some(TEMPERATURE),
            max_tokens: Some(MAX_TOKENS),
            response_format: Some(ResponseFormat::json_object()),
        }
    }

    /// Classify `text`. Never fails: every error becomes a fallback payload.
    #[instrument(skip(self, text), fields(mode = %self.mode, text_len = text.len()))]
    pub async fn classify(&self, text: &str) -> Outcome {
        match self.try_classify(text).await {
            Ok(obj) => {
                self.log_classified(&obj);
                Outcome::Classified(obj)
            }
            Err(err) => {
                let fallback = FallbackResult::new(self.mode, &err);
                warn!(
                    kind = err.kind(),
                    error = %err,
                    keywords = ?fallback.keywords,
                    intensity = fallback.intensity,
                    "Classification failed, returning fallback"
                );
                Outcome::Fallback(fallback)
            }
        }
    }

    /// The primary path, with failures kept as typed errors
    pub async fn try_classify(&self, text: &str) -> Result<Map<String, Value>, ClassifyError> {
        let messages = build_messages(self.mode, text);
        let call = self.client.chat(messages, Self::chat_options());

        // Dropping the call future on expiry abandons the in-flight request
        let result = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| ClassifyError::Timeout)??;

        let content = result.content.ok_or_else(|| {
            ClassifyError::MalformedResponse("Upstream returned no content".to_string())
        })?;

        validate_reply(self.mode, &content)
    }

    fn log_classified(&self, obj: &Map<String, Value>) {
        let field = |key: &str| obj.get(key).cloned().unwrap_or(Value::Null);
        let conforms = self.mode.conforms(obj);

        info!(
            label = %field(self.mode.label_key()),
            intensity = %field("intensity"),
            keywords = %field("keywords"),
            conforms,
            "Classification complete"
        );
        if !conforms {
            warn!("Upstream reply is outside the requested ranges; passing it through unchanged");
        }
    }
}

/// Parse the model's text as a JSON object carrying every required key.
///
/// Values are not range-checked; an accepted object is returned as-is.
pub fn validate_reply(mode: OutputMode, content: &str) -> Result<Map<String, Value>, ClassifyError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| ClassifyError::MalformedResponse(format!("Invalid JSON from upstream: {}", e)))?;

    match value {
        Value::Object(obj) if mode.has_required_keys(&obj) => Ok(obj),
        _ => Err(ClassifyError::MalformedResponse(
            "Invalid response structure".to_string(),
        )),
    }
}
