// crates/aura-server/src/lib.rs
// Aura - emotion classification gateway over an LLM chat-completion API

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod classifier;
pub mod config;
pub mod error;
pub mod http;
pub mod llm;
pub mod web;

pub use error::{AuraError, ClassifyError, Result};
