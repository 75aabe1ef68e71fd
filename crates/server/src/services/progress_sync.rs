//! Throttled, fire-and-forget progress persistence.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::Utc;
use parking_lot::Mutex;
use session::{WriteThrottle, SYNC_INTERVAL};
use sqlx::SqlitePool;

use crate::models::{ProgressObservation, SyncOutcome};
use crate::repositories::WatchProgressRepository;

/// Snapshots playback/reading position into the store at most once per
/// interval per (user, media) pair. Persistence failures are logged
/// and swallowed: playback must never be interrupted by them.
pub struct ProgressSyncService {
    db: SqlitePool,
    interval: Duration,
    throttles: Mutex<HashMap<(String, String), WriteThrottle>>,
}

impl ProgressSyncService {
    pub fn new(db: SqlitePool) -> Self {
        Self::with_interval(db, SYNC_INTERVAL)
    }

    pub fn with_interval(db: SqlitePool, interval: Duration) -> Self {
        Self {
            db,
            interval,
            throttles: Mutex::new(HashMap::new()),
        }
    }

    /// Handle one observation at the current time.
    pub async fn observe(&self, observation: ProgressObservation) -> SyncOutcome {
        self.observe_at(observation, Instant::now()).await
    }

    /// Handle one observation at an explicit time. Split out so the
    /// throttling sequence is testable without timers.
    pub async fn observe_at(&self, observation: ProgressObservation, now: Instant) -> SyncOutcome {
        // Never persist a zero/garbage baseline before real playback
        // or reading starts.
        if observation.progress <= 0.0
            || observation.user_id.is_empty()
            || observation.media_id.is_empty()
        {
            tracing::debug!(
                "Rejecting progress observation for ({}, {})",
                observation.user_id,
                observation.media_id
            );
            return SyncOutcome::Rejected;
        }

        let key = (observation.user_id.clone(), observation.media_id.clone());
        {
            let throttles = self.throttles.lock();
            if let Some(throttle) = throttles.get(&key) {
                if !throttle.is_due(now, self.interval) {
                    return SyncOutcome::Throttled;
                }
            }
        }

        match WatchProgressRepository::upsert(&self.db, &observation, Utc::now()).await {
            Ok(()) => {
                // Advance the throttle only on success: a failed write
                // leaves the next observation eligible.
                self.throttles
                    .lock()
                    .entry(key)
                    .or_default()
                    .record(now);
                SyncOutcome::Written
            }
            Err(e) => {
                tracing::error!(
                    "Progress sync failed for ({}, {}): {}",
                    observation.user_id,
                    observation.media_id,
                    e
                );
                SyncOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use providers::MediaType;

    use super::*;
    use crate::db::create_pool;

    fn observation(progress: f64) -> ProgressObservation {
        ProgressObservation {
            user_id: "user-1".to_string(),
            media_id: "media-1".to_string(),
            media_type: MediaType::Movie,
            progress,
            metadata: serde_json::json!({}),
        }
    }

    async fn service() -> ProgressSyncService {
        let pool = create_pool("sqlite::memory:", 1).await.unwrap();
        ProgressSyncService::new(pool)
    }

    #[tokio::test]
    async fn throttling_drops_mid_interval_observations() {
        let service = service().await;
        let t0 = Instant::now();

        assert_eq!(
            service.observe_at(observation(5.0), t0).await,
            SyncOutcome::Written
        );
        assert_eq!(
            service
                .observe_at(observation(9.0), t0 + Duration::from_secs(4))
                .await,
            SyncOutcome::Throttled
        );
        assert_eq!(
            service
                .observe_at(observation(16.0), t0 + Duration::from_secs(11))
                .await,
            SyncOutcome::Written
        );

        // Exactly two writes happened; the final state carries the
        // latest observation, not the dropped one.
        let row = WatchProgressRepository::get(&service.db, "user-1", "media-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.progress, 16.0);
    }

    #[tokio::test]
    async fn zero_progress_is_never_written() {
        let service = service().await;
        let t0 = Instant::now();

        assert_eq!(
            service.observe_at(observation(0.0), t0).await,
            SyncOutcome::Rejected
        );
        assert_eq!(
            service
                .observe_at(observation(0.0), t0 + Duration::from_secs(30))
                .await,
            SyncOutcome::Rejected
        );
        assert!(
            WatchProgressRepository::get(&service.db, "user-1", "media-1")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn missing_ids_are_rejected() {
        let service = service().await;
        let mut obs = observation(5.0);
        obs.user_id = String::new();
        assert_eq!(service.observe(obs).await, SyncOutcome::Rejected);
    }

    #[tokio::test]
    async fn pairs_are_throttled_independently() {
        let service = service().await;
        let t0 = Instant::now();

        assert_eq!(
            service.observe_at(observation(5.0), t0).await,
            SyncOutcome::Written
        );
        let mut other = observation(7.0);
        other.media_id = "media-2".to_string();
        assert_eq!(
            service
                .observe_at(other, t0 + Duration::from_secs(1))
                .await,
            SyncOutcome::Written
        );
    }
}
