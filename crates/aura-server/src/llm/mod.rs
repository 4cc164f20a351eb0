// crates/aura-server/src/llm/mod.rs
// Upstream LLM chat-completion clients (OpenAI-compatible wire format)

mod compat;
mod factory;
mod http_client;
mod logging;
mod openai_compat;
mod provider;
mod types;

pub use compat::CompatClient;
pub use factory::client_from_config;
pub use http_client::LlmHttpClient;
pub use openai_compat::{ChatRequest, parse_chat_response};
pub use provider::{LlmClient, Provider};
pub use types::{ChatOptions, ChatResult, Message, ResponseFormat, Role, Usage};
