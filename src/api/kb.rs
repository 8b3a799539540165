//! Knowledge base API handlers

use crate::api::utils::MAX_SEARCH_RESULTS;
use crate::error::AppError;
use crate::orchestrator::constants::DEFAULT_TOP_K;
use crate::state::SharedState;
use crate::tools::kb::NewKbEntry;
use crate::tools::{KbArticle, KnowledgeBase};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

/// Query string of `GET /kb/search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Full-text query
    #[serde(default)]
    pub q: String,
    /// Maximum results, capped
    pub top_k: Option<usize>,
}

/// Search results
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// The query as received
    pub query: String,
    /// Matching articles in relevance order
    pub results: Vec<KbArticle>,
}

/// Created-entry acknowledgement
#[derive(Debug, Serialize)]
pub struct KbEntryCreated {
    /// Row id of the new article
    pub id: i64,
    /// Always "created"
    pub status: String,
}

/// GET /kb/search - Search the knowledge base directly
pub async fn search_kb(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let top_k = params
        .top_k
        .unwrap_or(DEFAULT_TOP_K)
        .min(MAX_SEARCH_RESULTS);
    let results = state.kb.search(&params.q, top_k).await;
    Json(SearchResponse {
        query: params.q,
        results,
    })
}

/// POST /kb - Add an article
pub async fn add_kb_entry(
    State(state): State<SharedState>,
    Json(entry): Json<NewKbEntry>,
) -> Result<(StatusCode, Json<KbEntryCreated>), AppError> {
    let id = state.kb.add_entry(&entry).await?;
    Ok((
        StatusCode::CREATED,
        Json(KbEntryCreated {
            id,
            status: "created".to_string(),
        }),
    ))
}
