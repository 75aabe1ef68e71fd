use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};
use crate::models::{ProgressObservation, SyncResponse, WatchProgress};
use crate::repositories::WatchProgressRepository;
use crate::state::AppState;

/// Query parameters for progress reads
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProgressQuery {
    /// User identity, issued by the session provider
    pub user_id: Option<String>,
    /// Restrict to one media id
    pub media_id: Option<String>,
}

/// Record a progress observation. Observations are throttled per
/// (user, media) pair; the response reports what happened to this one.
#[utoipa::path(
    put,
    path = "/api/progress",
    tag = "progress",
    request_body = ProgressObservation,
    responses(
        (status = 200, description = "Sync outcome", body = SyncResponse)
    )
)]
pub async fn put_progress(
    State(state): State<AppState>,
    Json(observation): Json<ProgressObservation>,
) -> Json<SyncResponse> {
    let status = state.progress.observe(observation).await;
    Json(SyncResponse { status })
}

/// Read progress: one row when mediaId is given, otherwise the user's
/// full history ordered by recency.
#[utoipa::path(
    get,
    path = "/api/progress",
    tag = "progress",
    params(ProgressQuery),
    responses(
        (status = 200, description = "Progress row or history", body = Vec<WatchProgress>),
        (status = 400, description = "Missing userId"),
        (status = 404, description = "No progress recorded for the pair")
    )
)]
pub async fn get_progress(
    State(state): State<AppState>,
    Query(query): Query<ProgressQuery>,
) -> AppResult<Response> {
    let Some(user_id) = query.user_id.as_deref() else {
        return Err(AppError::bad_request("Missing userId"));
    };

    match query.media_id.as_deref() {
        Some(media_id) => {
            let row = WatchProgressRepository::get(&state.db, user_id, media_id)
                .await?
                .ok_or_else(|| AppError::not_found("No progress recorded"))?;
            Ok(Json(row).into_response())
        }
        None => {
            let rows = WatchProgressRepository::list_for_user(&state.db, user_id).await?;
            Ok(Json(rows).into_response())
        }
    }
}
