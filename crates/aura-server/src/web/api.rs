// crates/aura-server/src/web/api.rs
// REST API handlers

use axum::{Json, extract::State, response::IntoResponse};

use crate::classifier::{ClassificationRequest, Outcome};
use crate::web::state::AppState;

// ═══════════════════════════════════════
// HEALTH
// ═══════════════════════════════════════

/// Liveness only; the upstream API is not probed
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ═══════════════════════════════════════
// CLASSIFICATION
// ═══════════════════════════════════════

/// Always 200: upstream failures come back as a fallback payload
pub async fn process_text(
    State(state): State<AppState>,
    Json(req): Json<ClassificationRequest>,
) -> Json<Outcome> {
    Json(state.classifier.classify(&req.text).await)
}
