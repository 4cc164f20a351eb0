// crates/aura-server/src/llm/factory.rs
// Builds the process-wide upstream client from configuration

use crate::config::EnvConfig;
use crate::error::{AuraError, Result};
use crate::llm::http_client::LlmHttpClient;
use crate::llm::{CompatClient, LlmClient};
use std::sync::Arc;
use tracing::info;

/// Construct the upstream client once at startup.
///
/// Fails when the provider's API key is missing, so a misconfigured
/// deployment stops at boot instead of answering every request with a
/// fallback.
pub fn client_from_config(config: &EnvConfig, http: reqwest::Client) -> Result<Arc<dyn LlmClient>> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        AuraError::Config(format!(
            "{} is not set",
            config.provider.api_key_env_var()
        ))
    })?;

    let mut client = CompatClient::new(config.provider, api_key, LlmHttpClient::from_client(http));
    if let Some(ref model) = config.model {
        client = client.with_model(model.clone());
    }
    if let Some(ref url) = config.base_url {
        client = client.with_url(url.clone());
    }

    info!(
        provider = %config.provider,
        model = %client.model_name(),
        "Upstream LLM client initialized"
    );

    Ok(Arc::new(client))
}
