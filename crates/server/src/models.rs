use chrono::{DateTime, Utc};
use providers::MediaType;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Durable viewing/reading position for one (user, media) pair. One
/// row per pair; a later write overwrites, never appends.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WatchProgress {
    pub user_id: String,
    pub media_id: String,
    pub media_type: MediaType,
    /// Seconds for video, page number for manga.
    pub progress: f64,
    /// Denormalized snapshot (title/poster/genres/season/episode/
    /// chapter) taken at write time; a display cache, not a join key.
    pub metadata: serde_json::Value,
    pub last_watched_at: DateTime<Utc>,
}

/// Candidate progress write, as observed by a playback or reading
/// session.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressObservation {
    pub user_id: String,
    pub media_id: String,
    pub media_type: MediaType,
    pub progress: f64,
    #[serde(default = "empty_snapshot")]
    pub metadata: serde_json::Value,
}

fn empty_snapshot() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

/// What happened to one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SyncOutcome {
    /// Persisted.
    Written,
    /// Dropped: the sync interval has not elapsed yet.
    Throttled,
    /// Dropped by the guard: non-positive progress or missing ids.
    Rejected,
    /// The write failed; logged, not retried. The next eligible
    /// observation tries again.
    Failed,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SyncResponse {
    pub status: SyncOutcome,
}
