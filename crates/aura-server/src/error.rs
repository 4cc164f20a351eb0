// crates/aura-server/src/error.rs
// Standardized error types for Aura

use thiserror::Error;

/// Main error type for the Aura library (startup, config, listener I/O)
#[derive(Error, Debug)]
pub enum AuraError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Result using AuraError
pub type Result<T> = std::result::Result<T, AuraError>;

/// Why a classification fell back to the default payload.
///
/// The `Display` text of each variant is what callers see in the
/// fallback's `error` field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// Upstream did not answer within the time budget
    #[error("API timeout")]
    Timeout,

    /// Upstream answered, but not with a usable JSON object
    #[error("{0}")]
    MalformedResponse(String),

    /// Anything else raised while calling or reading the upstream API
    #[error("{0}")]
    Upstream(String),
}

impl ClassifyError {
    /// Keyword placed in the fallback payload's `keywords`
    pub fn sentinel(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::MalformedResponse(_) | Self::Upstream(_) => "error",
        }
    }

    /// Stable short name for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Upstream(_) => "upstream",
        }
    }
}

impl From<anyhow::Error> for ClassifyError {
    fn from(err: anyhow::Error) -> Self {
        ClassifyError::Upstream(err.to_string())
    }
}
