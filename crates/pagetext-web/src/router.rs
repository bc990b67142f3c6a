use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.server.max_upload_mb * 1024 * 1024);

    Router::new()
        .route("/", get(handlers::index::index))
        .route("/upload", post(handlers::documents::upload))
        .route("/documents/{id}", get(handlers::documents::show))
        .route("/documents/{id}/pages", get(handlers::documents::pages))
        .route("/documents/{id}/download", get(handlers::documents::download))
        .route(
            "/documents/{id}/pages/download",
            get(handlers::documents::download_pages),
        )
        .route("/documents/{id}/report", get(handlers::documents::report))
        .layer(body_limit)
        .with_state(state)
}
