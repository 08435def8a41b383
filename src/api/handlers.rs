//! API Handlers
//!
//! HTTP request handlers exposing the cache operations.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{Cache, CacheStats, TracingObserver};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    ClearResponse, DeleteResponse, GetResponse, HasResponse, HealthResponse, SetRequest,
    SetResponse, SweepResponse, VersionRequest, VersionResponse,
};

/// Application state shared across all handlers.
///
/// The cache handle is cheap to clone and does its own locking.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache of JSON payloads
    pub cache: Cache<Value>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: Cache<Value>) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// The cache reports its events through `tracing`.
    pub fn from_config(config: &Config) -> Self {
        let cache = Cache::with_observer(config.cache_config(), Arc::new(TracingObserver));
        Self::new(cache)
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    state.cache.set(req.key.clone(), req.value);
    // None when a zero-capacity cache dropped the entry straight away
    let digest = state.cache.digest_of(&req.key).map(|d| d.to_string());

    Ok(Json(SetResponse::new(req.key, digest)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(ApiError::NotFound(key)),
    }
}

/// Handler for GET /has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<HasResponse> {
    let present = state.cache.has(&key);
    Json(HasResponse { key, present })
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if state.cache.delete(&key) {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(ApiError::NotFound(key))
    }
}

/// Handler for POST /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.size();
    state.cache.clear();
    Json(ClearResponse { cleared })
}

/// Handler for POST /sweep
pub async fn sweep_handler(State(state): State<AppState>) -> Json<SweepResponse> {
    Json(SweepResponse {
        removed: state.cache.sweep(),
    })
}

/// Handler for PUT /version
pub async fn version_handler(
    State(state): State<AppState>,
    Json(req): Json<VersionRequest>,
) -> Result<Json<VersionResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let previous = state.cache.version();
    let changed = state.cache.set_version(req.version);

    Ok(Json(VersionResponse {
        previous,
        current: state.cache.version(),
        changed,
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
