//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::{error, warn};

use crate::domain::RecommendRequest;
use crate::pipeline::PipelineError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/trips", post(recommend_trips))
        .route("/api/cache", get(cache_stats).delete(clear_cache))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Recommend outings for a location and set of preferences.
async fn recommend_trips(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RecommendResponse>, AppError> {
    // Parse JSON manually so a bad body gets our error shape
    let request: RecommendRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "rejecting unparseable request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let rec = state.pipeline.recommend(&request).await?;

    Ok(Json(RecommendResponse::from_recommendation(rec)))
}

/// Number of cached recommendation sets.
async fn cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let cache = state.pipeline.cache();
    cache.sync().await;

    Json(CacheStatsResponse {
        entries: cache.entry_count(),
    })
}

/// Drop every cached recommendation set.
async fn clear_cache(State(state): State<AppState>) -> StatusCode {
    state.pipeline.cache().invalidate_all();
    StatusCode::NO_CONTENT
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::InvalidRequest(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            PipelineError::GenerationFailed(_) | PipelineError::MalformedResponse(_) => {
                AppError::Upstream {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, retryable) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message, false),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message, true),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse {
            error: message,
            retryable,
        });
        (status, body).into_response()
    }
}
