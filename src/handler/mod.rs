use crate::service::search::SearchService;
use crate::session::SessionConfig;

pub mod api;

#[derive(Clone)]
pub struct AppState {
    pub search: SearchService,
    pub session: SessionConfig,
}

pub fn router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/api/sources", axum::routing::get(api::sources::handler))
        .route(
            "/api/sources/:source/detail/:id",
            axum::routing::get(api::detail::detail),
        )
        .route(
            "/api/sources/:source/episodes/:id",
            axum::routing::get(api::detail::episodes),
        )
        .route("/api/search", axum::routing::get(api::search::handler))
        .route("/api/live", axum::routing::get(api::live::handler))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{router, AppState};
    use crate::service::cache::CacheConfig;
    use crate::service::search::SearchService;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use dracin_source_manager::SourceManager;
    use tower::ServiceExt;

    pub(crate) fn build(manager: SourceManager) -> axum::Router {
        router(AppState {
            search: SearchService::new(manager, &CacheConfig::default()),
            session: Default::default(),
        })
    }

    pub(crate) async fn get(app: axum::Router, uri: &str) -> (StatusCode, hyper::body::Bytes) {
        let res = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
        (status, body)
    }

    pub(crate) async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = get(app, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }
}
