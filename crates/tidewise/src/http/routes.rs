//! HTTP API routes and handlers

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Instant;
use tidewise_relevance::{PriceRange, SearchOptions};
use tracing::{debug, error, warn};

use super::ApiState;
use super::types::*;

type AppState = Arc<ApiState>;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Maximum query length in characters.
const MAX_QUERY_LENGTH: usize = 500;

/// Create the router with all API endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route("/search", post(search))
        .route("/suggestions", post(suggestions))
        .route("/recommendations", post(recommendations))
        .with_state(state)
}

fn api_error(status: StatusCode, error: &str, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            code: code.to_string(),
        }),
    )
}

fn check_query_length(query: &str) -> Result<(), ApiError> {
    if query.chars().count() > MAX_QUERY_LENGTH {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Query exceeds maximum length of 500 characters",
            "QUERY_TOO_LONG",
        ));
    }
    Ok(())
}

// ============================================
// Health & Stats
// ============================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn stats(
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, ApiError> {
    let profile = state.profile_key(params.profile.as_deref());

    let store = match state.sqlite {
        Some(ref sqlite) => match sqlite.get_stats() {
            Ok(stats) => Some(StoreSummary {
                profiles: stats.profile_count,
                learned_terms: stats.term_count,
                history_entries: stats.history_count,
            }),
            Err(e) => {
                error!("Failed to get stats: {}", e);
                return Err(api_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to get stats",
                    "STATS_ERROR",
                ));
            }
        },
        None => None,
    };

    Ok(Json(StatsResponse {
        analytics: state.engine.analytics(&profile),
        catalog_products: state.engine.catalog().len(),
        profile,
        store,
    }))
}

// ============================================
// Search
// ============================================

fn search_options(req: &SearchRequest) -> Result<SearchOptions, ApiError> {
    let mut options = SearchOptions::new()
        .with_in_stock_only(req.in_stock_only.unwrap_or(false))
        .with_sort_by(req.sort_by.unwrap_or_default());

    if let Some(ref category) = req.category {
        options = options.with_category(category);
    }

    if let Some([min, max]) = req.price_range {
        let range = PriceRange::new(min, max);
        if !range.is_valid() {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "Price range minimum must not exceed its maximum",
                "INVALID_PRICE_RANGE",
            ));
        }
        options.price_range = Some(range);
    }

    if let Some(limit) = req.limit {
        options = options.with_limit(limit);
    }

    Ok(options)
}

async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let start = Instant::now();

    // Validate query
    let query = req.query.trim().to_string();
    if query.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Query cannot be empty",
            "INVALID_QUERY",
        ));
    }
    check_query_length(&query)?;

    let options = search_options(&req)?;
    let profile = state.profile_key(req.profile.as_deref());

    debug!(query = %query, profile = %profile, "HTTP search request");

    let engine = Arc::clone(&state.engine);
    let task_query = query.clone();
    let task = tokio::task::spawn_blocking(move || engine.search(&profile, &task_query, &options));

    match tokio::time::timeout(state.search_timeout, task).await {
        Ok(Ok(results)) => Ok(Json(SearchResponse {
            query,
            total_count: results.total_count,
            search_time_ms: start.elapsed().as_millis() as u64,
            results: results.results,
            timed_out: false,
        })),
        Ok(Err(e)) => {
            error!("Search failed: {}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Search failed",
                "SEARCH_ERROR",
            ))
        }
        Err(_) => {
            warn!(
                query = %query,
                timeout_ms = state.search_timeout.as_millis() as u64,
                "Search timed out"
            );
            Ok(Json(SearchResponse {
                query,
                results: Vec::new(),
                total_count: 0,
                search_time_ms: start.elapsed().as_millis() as u64,
                timed_out: true,
            }))
        }
    }
}

// ============================================
// Suggestions
// ============================================

async fn suggestions(
    State(state): State<AppState>,
    Json(req): Json<SuggestionsRequest>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    check_query_length(&req.query)?;

    debug!(query = %req.query, "HTTP suggestions request");

    let suggestions = state.engine.suggestions(&req.query);
    Ok(Json(SuggestionsResponse {
        query: req.query,
        suggestions,
    }))
}

// ============================================
// Recommendations
// ============================================

async fn recommendations(
    State(state): State<AppState>,
    Json(req): Json<RecommendationsRequest>,
) -> Json<RecommendationsResponse> {
    let profile = state.profile_key(req.profile.as_deref());
    let limit = req.limit.map(|l| l.min(state.engine.config().max_limit));

    debug!(profile = %profile, "HTTP recommendations request");

    let products = state.engine.recommendations(&profile, limit);
    Json(RecommendationsResponse { profile, products })
}
