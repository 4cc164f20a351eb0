// crates/aura-server/src/config/mod.rs
// Configuration and shared constants

pub mod env;

pub use env::{ConfigValidation, DEFAULT_CORS_ORIGINS, EnvConfig};
