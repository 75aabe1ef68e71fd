use axum::{routing::get, Router};

use crate::{api::handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/media", get(handlers::media::get_media))
        .route(
            "/api/progress",
            get(handlers::progress::get_progress).put(handlers::progress::put_progress),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
