// crates/aura-server/src/web/state.rs
// Web server state management

use std::sync::Arc;

use crate::classifier::Classifier;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Classification gateway (read-only, shared by all requests)
    pub classifier: Arc<Classifier>,
}

impl AppState {
    /// Create new application state
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier: Arc::new(classifier),
        }
    }
}
