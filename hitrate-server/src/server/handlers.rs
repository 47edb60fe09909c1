use crate::core::{CacheAsideAccessor, DataSource, HitrateError, KeyStatus};
use axum::{
    Json,
    extract::{Query, State},
    response::Html,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Cache key under which the full item list is stored
pub const ITEMS_CACHE_KEY: &str = "items_all";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub accessor: Arc<CacheAsideAccessor>,
    pub source: Arc<dyn DataSource>,
}

#[derive(Debug, Deserialize)]
pub struct SpeedTestParams {
    /// `on` routes the read through the cache; anything else hits the
    /// database directly
    pub cache: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SpeedTestResponse {
    pub source: &'static str,
    pub cache_status: Option<&'static str>,
    pub execution_time_ms: f64,
    pub items_count: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub message: String,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CacheStatusResponse {
    pub key: &'static str,
    pub status: KeyStatus,
}

#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub loads: u64,
    pub invalidations: u64,
    pub hit_rate: f64,
}

/// Speed test endpoint - compares a direct database read against the
/// cache-aside path
pub async fn speed_test(
    State(state): State<AppState>,
    Query(params): Query<SpeedTestParams>,
) -> Result<Json<SpeedTestResponse>, HitrateError> {
    let use_cache = params.cache.as_deref() == Some("on");
    debug!("GET /test cache={}", if use_cache { "on" } else { "off" });

    let started = Instant::now();

    let (items_count, source, cache_status) = if use_cache {
        let (items, hit) = state.accessor.get_or_load(ITEMS_CACHE_KEY).await?;
        (items.len(), "cache", Some(if hit { "hit" } else { "miss" }))
    } else {
        let items = state.source.fetch_all().await?;
        (items.len(), "database", None)
    };

    let execution_time_ms = round_ms(started.elapsed());

    let message = match cache_status {
        Some(status) => {
            format!("Cache ({status}) returned {items_count} items in {execution_time_ms}ms")
        }
        None => format!("Database query returned {items_count} items in {execution_time_ms}ms"),
    };

    Ok(Json(SpeedTestResponse {
        source,
        cache_status,
        execution_time_ms,
        items_count,
        message,
    }))
}

/// Invalidate endpoint - drops the cached item list so the next cached read
/// is a miss
pub async fn invalidate_cache(State(state): State<AppState>) -> Json<InvalidateResponse> {
    state.accessor.invalidate(ITEMS_CACHE_KEY);

    Json(InvalidateResponse {
        message: "Cache cleared! Next request will be a cache miss.".to_string(),
        status: "success",
    })
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Report the cache state for the item list without disturbing it
pub async fn cache_status(State(state): State<AppState>) -> Json<CacheStatusResponse> {
    let status = state.accessor.peek_status(ITEMS_CACHE_KEY);

    Json(CacheStatusResponse {
        key: ITEMS_CACHE_KEY,
        status,
    })
}

/// Cache counter snapshot
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let stats = state.accessor.stats();

    Json(CacheStatsResponse {
        hits: stats.hits,
        misses: stats.misses,
        loads: stats.loads,
        invalidations: stats.invalidations,
        hit_rate: stats.hit_rate(),
    })
}

/// Demo page that drives the endpoints from the browser
pub async fn demo_page() -> Html<&'static str> {
    Html(include_str!("demo.html"))
}

// Milliseconds with two decimal places, matching what the demo page shows
fn round_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}
