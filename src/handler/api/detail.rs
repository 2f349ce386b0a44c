use crate::handler::AppState;
use crate::session::outcome::FailureDescriptor;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use dracin_source_prelude::{
    DramaDetail, Episode, ErrorKind, SourceError, SourceErrorReason, SourceId,
};

type Failure = (StatusCode, Json<FailureDescriptor>);

fn failure(err: SourceError) -> Failure {
    let status = match (err.kind(), &err.reason) {
        (ErrorKind::Unsupported, _) => StatusCode::NOT_FOUND,
        (_, SourceErrorReason::EntryIdentityNotFound) => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    };
    (status, Json(FailureDescriptor::from(&err)))
}

pub async fn detail(
    State(state): State<AppState>,
    Path((source, id)): Path<(SourceId, String)>,
) -> Result<Json<DramaDetail>, Failure> {
    state.search.detail(source, &id).await.map(Json).map_err(failure)
}

pub async fn episodes(
    State(state): State<AppState>,
    Path((source, id)): Path<(SourceId, String)>,
) -> Result<Json<Vec<Episode>>, Failure> {
    state.search.episodes(source, &id).await.map(Json).map_err(failure)
}
