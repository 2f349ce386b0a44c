use super::SearchResponse;
use crate::handler::AppState;
use crate::session::outcome::SearchOutcome;
use axum::extract::{Query, State};
use axum::Json;
use dracin_source_prelude::SourceId;

#[derive(Debug, serde::Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    source: SourceId,
    #[serde(default)]
    q: String,
}

pub async fn handler(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Json<SearchResponse> {
    let query = params.q.trim().to_string();
    let outcome = if query.is_empty() {
        SearchOutcome::Idle
    } else {
        SearchOutcome::resolve(state.search.search(params.source, &query).await)
    };
    Json(SearchResponse {
        source: params.source,
        query,
        outcome,
    })
}
