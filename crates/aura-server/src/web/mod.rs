// crates/aura-server/src/web/mod.rs
// Web server layer for Aura

pub mod api;
pub mod state;

use axum::{
    Router,
    http::{HeaderValue, request::Parts},
    routing::{get, post},
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;
use crate::web::state::AppState;

/// Create the web server router
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/process_text", post(api::process_text))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured frontend origins.
///
/// Credentials are allowed, so methods and headers are mirrored from the
/// preflight rather than answered with `*`.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let patterns = origins.to_vec();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|o| patterns.iter().any(|p| origin_matches(p, o)))
                    .unwrap_or(false)
            },
        ))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Match an origin against an allowlist entry.
///
/// An entry may contain one `*`, which matches a non-empty run of
/// characters without `/` (e.g. `https://*.onrender.com`). A bare `*`
/// allows every origin.
pub fn origin_matches(pattern: &str, origin: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    match pattern.split_once('*') {
        None => pattern == origin,
        Some((prefix, suffix)) => {
            origin.len() > prefix.len() + suffix.len()
                && origin.starts_with(prefix)
                && origin.ends_with(suffix)
                && !origin[prefix.len()..origin.len() - suffix.len()].contains('/')
        }
    }
}

/// Bind and serve until the process is stopped
pub async fn serve(addr: &str, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Aura listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
