//! Host contract handlers.
//!
//! Each handler forwards to the configured `AnimeProvider`. Upstream
//! failures surface as `502 Bad Gateway` with a JSON error body; a smart
//! search the provider cannot satisfy is a successful empty list.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::{info, warn};

use anitorrent_core::{AnimeTorrent, ProviderError, ProviderSettings, SearchIntent};

use crate::metrics::PROVIDER_CALLS_TOTAL;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoHashResponse {
    pub info_hash: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MagnetLinkResponse {
    pub magnet_link: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

fn error_status(error: &ProviderError) -> StatusCode {
    match error {
        ProviderError::Connection(_)
        | ProviderError::Timeout
        | ProviderError::Http { .. }
        | ProviderError::MalformedPayload(_) => StatusCode::BAD_GATEWAY,
        ProviderError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Record the outcome of one provider operation and convert it to a response.
fn respond(
    operation: &str,
    result: Result<Vec<AnimeTorrent>, ProviderError>,
) -> ApiResult<Vec<AnimeTorrent>> {
    match result {
        Ok(torrents) => {
            PROVIDER_CALLS_TOTAL
                .with_label_values(&[operation, "success"])
                .inc();
            info!(operation = operation, results = torrents.len(), "Provider call complete");
            Ok(Json(torrents))
        }
        Err(e) => {
            PROVIDER_CALLS_TOTAL
                .with_label_values(&[operation, "error"])
                .inc();
            warn!(operation = operation, error = %e, "Provider call failed");
            Err((
                error_status(&e),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/provider/settings
pub async fn settings(State(state): State<Arc<AppState>>) -> Json<ProviderSettings> {
    Json(state.provider().settings())
}

/// POST /api/v1/provider/search
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(intent): Json<SearchIntent>,
) -> ApiResult<Vec<AnimeTorrent>> {
    respond("search", state.provider().search(&intent).await)
}

/// POST /api/v1/provider/smart-search
pub async fn smart_search(
    State(state): State<Arc<AppState>>,
    Json(intent): Json<SearchIntent>,
) -> ApiResult<Vec<AnimeTorrent>> {
    respond("smart_search", state.provider().smart_search(&intent).await)
}

/// GET /api/v1/provider/latest
pub async fn latest(State(state): State<Arc<AppState>>) -> ApiResult<Vec<AnimeTorrent>> {
    respond("latest", state.provider().latest().await)
}

/// POST /api/v1/provider/info-hash
pub async fn info_hash(
    State(state): State<Arc<AppState>>,
    Json(torrent): Json<AnimeTorrent>,
) -> Json<InfoHashResponse> {
    Json(InfoHashResponse {
        info_hash: state.provider().info_hash(&torrent),
    })
}

/// POST /api/v1/provider/magnet-link
pub async fn magnet_link(
    State(state): State<Arc<AppState>>,
    Json(torrent): Json<AnimeTorrent>,
) -> Json<MagnetLinkResponse> {
    Json(MagnetLinkResponse {
        magnet_link: state.provider().magnet_link(&torrent),
    })
}
