// crates/aura-server/src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use crate::classifier::{DEFAULT_TIMEOUT, OutputMode};
use crate::llm::Provider;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Origins allowed when AURA_CORS_ORIGINS is unset
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "https://sentiment-frontend-vppb.onrender.com",
    "https://*.onrender.com",
];

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Configuration validation result
#[derive(Debug)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Default for ConfigValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warn in &self.warnings {
                lines.push(format!("  - {}", warn));
            }
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Environment configuration - all env vars in one place
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Upstream provider (AURA_LLM_PROVIDER)
    pub provider: Provider,
    /// Upstream credential, read from the provider's key variable (GROQ_API_KEY, ...)
    pub api_key: Option<String>,
    /// Model override (AURA_LLM_MODEL)
    pub model: Option<String>,
    /// Chat-completions URL override (AURA_LLM_BASE_URL)
    pub base_url: Option<String>,
    /// Response contract (AURA_OUTPUT_MODE)
    pub output_mode: OutputMode,
    /// Upstream time budget (AURA_TIMEOUT_SECS)
    pub timeout: Duration,
    /// CORS allowlist (AURA_CORS_ORIGINS, comma-separated)
    pub cors_origins: Vec<String>,
    /// Bind host (AURA_HOST)
    pub host: String,
    /// Bind port (PORT)
    pub port: u16,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Groq,
            api_key: None,
            model: None,
            base_url: None,
            output_mode: OutputMode::default(),
            timeout: DEFAULT_TIMEOUT,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl EnvConfig {
    /// Load all environment configuration (call once at startup)
    pub fn load() -> Self {
        info!("Loading environment configuration");
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let provider = match read("AURA_LLM_PROVIDER") {
            Some(raw) => Provider::from_str(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "Unknown AURA_LLM_PROVIDER, using groq");
                Provider::Groq
            }),
            None => defaults.provider,
        };

        let output_mode = match read("AURA_OUTPUT_MODE") {
            Some(raw) => raw.parse::<OutputMode>().unwrap_or_else(|_| {
                warn!(value = %raw, "Unknown AURA_OUTPUT_MODE, using emotion");
                OutputMode::default()
            }),
            None => defaults.output_mode,
        };

        let timeout = read("AURA_TIMEOUT_SECS")
            .and_then(|raw| parse_timeout(&raw))
            .unwrap_or(defaults.timeout);

        let cors_origins = read("AURA_CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or(defaults.cors_origins);

        let port = read("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);

        let config = Self {
            provider,
            api_key: read(provider.api_key_env_var()),
            model: read("AURA_LLM_MODEL"),
            base_url: read("AURA_LLM_BASE_URL"),
            output_mode,
            timeout,
            cors_origins,
            host: read("AURA_HOST").unwrap_or(defaults.host),
            port,
        };

        debug!(
            provider = %config.provider,
            mode = %config.output_mode,
            timeout_secs = config.timeout.as_secs_f64(),
            origins = config.cors_origins.len(),
            "Configuration resolved"
        );

        config
    }

    /// `host:port` string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if self.api_key.is_none() {
            validation.add_error(format!(
                "No upstream API key configured. Set {}.",
                self.provider.api_key_env_var()
            ));
        }

        if self.cors_origins.is_empty() {
            validation.add_warning("AURA_CORS_ORIGINS is empty; browsers will block cross-origin calls.");
        }

        if self.timeout >= crate::http::DEFAULT_TIMEOUT {
            validation.add_warning(format!(
                "Upstream timeout of {}s is not below the {}s transport timeout; transport errors will fire first.",
                self.timeout.as_secs(),
                crate::http::DEFAULT_TIMEOUT.as_secs()
            ));
        }

        validation
    }
}

/// Positive number of seconds, fractional allowed
fn parse_timeout(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<f64>() {
        Ok(secs) if secs > 0.0 => match Duration::try_from_secs_f64(secs) {
            Ok(timeout) => Some(timeout),
            Err(_) => {
                warn!(value = raw, "AURA_TIMEOUT_SECS out of range, using default");
                None
            }
        },
        _ => {
            warn!(value = raw, "Invalid AURA_TIMEOUT_SECS, using default");
            None
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
