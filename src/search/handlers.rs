use super::engine::IndexEngine;
use super::types::{HealthResponse, IndexRequest, IndexResponse, SearchParams, SearchResponse};
use crate::error::ApiError;
use axum::body::Bytes;
use axum::extract::Query;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Result limit applied when `GET /search` carries no `limit`.
pub const DEFAULT_SEARCH_LIMIT: usize = 25;

/// Per-router settings shared with the handlers.
#[derive(Debug, Clone, Copy)]
pub struct SearchSettings {
    pub default_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

pub fn router(engine: Arc<IndexEngine>, settings: SearchSettings) -> Router {
    Router::new()
        .route("/healthz", get(handle_healthz))
        .route("/index", post(handle_index))
        .route("/search", get(handle_search))
        .layer(Extension(engine))
        .layer(Extension(settings))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

pub async fn handle_healthz() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Decodes the body by hand so every malformed payload maps to `400`.
pub async fn handle_index(
    Extension(engine): Extension<Arc<IndexEngine>>,
    body: Bytes,
) -> Result<Json<IndexResponse>, ApiError> {
    let req: IndexRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Rejected index request: {}", e);
        ApiError::from(e)
    })?;

    let indexed = engine.add_documents(req.documents);
    tracing::info!(
        "Indexed {} documents ({} in store)",
        indexed,
        engine.document_count()
    );

    Ok(Json(IndexResponse { indexed }))
}

/// Reads the query as raw pairs so repeated or unparsable values never reject the request.
pub async fn handle_search(
    Query(pairs): Query<Vec<(String, String)>>,
    Extension(engine): Extension<Arc<IndexEngine>>,
    Extension(settings): Extension<SearchSettings>,
) -> Json<SearchResponse> {
    let params = SearchParams::from_pairs(&pairs);
    let limit = match params.limit {
        Some(limit) if limit > 0 => limit as usize,
        Some(_) => 0,
        None => settings.default_limit,
    };

    let results = engine.search(&params.q, limit);
    tracing::debug!("Query {:?} matched {} documents", params.q, results.len());

    Json(SearchResponse { results })
}
