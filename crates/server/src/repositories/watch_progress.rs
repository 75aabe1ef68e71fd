use chrono::{DateTime, Utc};
use providers::MediaType;
use sqlx::SqlitePool;

use crate::models::{ProgressObservation, WatchProgress};

/// Common SELECT fields for watch_progress queries
const SELECT_PROGRESS: &str = r#"
    SELECT
        user_id, media_id, media_type,
        progress, metadata, last_watched_at
    FROM watch_progress
"#;

pub struct WatchProgressRepository;

impl WatchProgressRepository {
    /// Upsert the progress row for a (user, media) pair. Conflict
    /// resolution is overwrite.
    pub async fn upsert(
        pool: &SqlitePool,
        observation: &ProgressObservation,
        now: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        let metadata_json = serde_json::to_string(&observation.metadata)
            .unwrap_or_else(|_| "{}".to_string());

        sqlx::query(
            r#"
            INSERT INTO watch_progress (user_id, media_id, media_type, progress, metadata, last_watched_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, media_id) DO UPDATE SET
                media_type = excluded.media_type,
                progress = excluded.progress,
                metadata = excluded.metadata,
                last_watched_at = excluded.last_watched_at
            "#,
        )
        .bind(&observation.user_id)
        .bind(&observation.media_id)
        .bind(observation.media_type.as_str())
        .bind(observation.progress)
        .bind(&metadata_json)
        .bind(now)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Get the progress row for a (user, media) pair.
    pub async fn get(
        pool: &SqlitePool,
        user_id: &str,
        media_id: &str,
    ) -> Result<Option<WatchProgress>, sqlx::Error> {
        let query = format!("{} WHERE user_id = $1 AND media_id = $2", SELECT_PROGRESS);
        let row = sqlx::query_as::<_, WatchProgressRow>(&query)
            .bind(user_id)
            .bind(media_id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// All progress rows for a user, most recently watched first.
    pub async fn list_for_user(
        pool: &SqlitePool,
        user_id: &str,
    ) -> Result<Vec<WatchProgress>, sqlx::Error> {
        let query = format!(
            "{} WHERE user_id = $1 ORDER BY last_watched_at DESC",
            SELECT_PROGRESS
        );
        let rows = sqlx::query_as::<_, WatchProgressRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[derive(sqlx::FromRow)]
struct WatchProgressRow {
    user_id: String,
    media_id: String,
    media_type: String,
    progress: f64,
    metadata: String,
    last_watched_at: DateTime<Utc>,
}

impl From<WatchProgressRow> for WatchProgress {
    fn from(row: WatchProgressRow) -> Self {
        WatchProgress {
            user_id: row.user_id,
            media_id: row.media_id,
            media_type: row
                .media_type
                .parse::<MediaType>()
                .unwrap_or(MediaType::Movie),
            progress: row.progress,
            metadata: serde_json::from_str(&row.metadata)
                .unwrap_or(serde_json::Value::Object(Default::default())),
            last_watched_at: row.last_watched_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    fn observation(progress: f64) -> ProgressObservation {
        ProgressObservation {
            user_id: "user-1".to_string(),
            media_id: "media-1".to_string(),
            media_type: MediaType::Anime,
            progress,
            metadata: serde_json::json!({"title": "Some Anime", "episode": "3"}),
        }
    }

    #[tokio::test]
    async fn upsert_overwrites_the_existing_row() {
        let pool = create_pool("sqlite::memory:", 1).await.unwrap();

        WatchProgressRepository::upsert(&pool, &observation(5.0), Utc::now())
            .await
            .unwrap();
        WatchProgressRepository::upsert(&pool, &observation(16.0), Utc::now())
            .await
            .unwrap();

        let row = WatchProgressRepository::get(&pool, "user-1", "media-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.progress, 16.0);
        assert_eq!(row.media_type, MediaType::Anime);
        assert_eq!(row.metadata["title"], "Some Anime");

        let all = WatchProgressRepository::list_for_user(&pool, "user-1")
            .await
            .unwrap();
        assert_eq!(all.len(), 1, "upsert must overwrite, not append");
    }

    #[tokio::test]
    async fn list_is_ordered_by_recency() {
        let pool = create_pool("sqlite::memory:", 1).await.unwrap();
        let t0 = Utc::now();

        let mut older = observation(3.0);
        older.media_id = "media-old".to_string();
        WatchProgressRepository::upsert(&pool, &older, t0 - chrono::Duration::hours(1))
            .await
            .unwrap();
        WatchProgressRepository::upsert(&pool, &observation(9.0), t0)
            .await
            .unwrap();

        let all = WatchProgressRepository::list_for_user(&pool, "user-1")
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].media_id, "media-1");
        assert_eq!(all[1].media_id, "media-old");
    }
}
