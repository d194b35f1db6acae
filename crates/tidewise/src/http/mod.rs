//! HTTP API server for Tidewise
//!
//! Exposes search, autocomplete, recommendations and profile statistics as
//! JSON endpoints.

mod routes;
mod types;


pub use routes::create_router;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tidewise_relevance::RelevanceEngine;
use tidewise_store::SqliteStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Maximum request body size (1 MB). Prevents OOM from oversized payloads.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared state behind every handler.
pub struct ApiState {
    pub engine: Arc<RelevanceEngine>,
    /// Present when preferences persist to SQLite; feeds `/stats`.
    pub sqlite: Option<Arc<SqliteStore>>,
    pub default_profile: String,
    /// Deadline for one search; expiry answers with no results.
    pub search_timeout: Duration,
}

impl ApiState {
    pub fn new(
        engine: RelevanceEngine,
        sqlite: Option<Arc<SqliteStore>>,
        default_profile: String,
        search_timeout: Duration,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            sqlite,
            default_profile,
            search_timeout,
        }
    }

    /// The requested profile key, or the default when absent or blank.
    pub fn profile_key(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.default_profile)
            .to_string()
    }
}

/// Start the HTTP API server
pub async fn serve_http(state: ApiState, port: u16, cors_origin: Option<String>) -> Result<()> {
    let state = Arc::new(state);

    // Build CORS layer
    let cors = if let Some(origin) = cors_origin {
        CorsLayer::new()
            .allow_origin(origin.parse::<axum::http::HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        warn!("No CORS origin specified, allowing all origins. Set --cors-origin in production.");
        CorsLayer::very_permissive()
    };

    let app: Router = create_router(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP API server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
