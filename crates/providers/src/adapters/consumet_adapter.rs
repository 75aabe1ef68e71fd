//! Anime provider backed by the Consumet meta/anilist aggregator.

use std::sync::Arc;

use async_trait::async_trait;
use consumet::{
    models::release_date_string, AnimeEpisode, ConsumetClient, StreamSource, SubtitleTrack,
};

use crate::models::{Episode, MediaMetadata, MediaType, Subtitle, VideoStream};
use crate::{ContentProvider, ProviderError, VideoProvider};

/// AniList ratings are 0-100; the normalized model is 0-10.
const RATING_SCALE: f64 = 10.0;

/// Rating assumed when the trending feed omits one.
const DEFAULT_TRENDING_RATING: f64 = 80.0;

pub struct ConsumetProvider {
    client: Arc<ConsumetClient>,
}

impl ConsumetProvider {
    pub fn new(client: Arc<ConsumetClient>) -> Self {
        Self { client }
    }
}

impl From<AnimeEpisode> for Episode {
    fn from(ep: AnimeEpisode) -> Self {
        Episode {
            id: ep.id,
            number: ep.number,
            title: ep.title,
            description: ep.description,
            thumbnail_path: ep.image,
        }
    }
}

fn subtitles(tracks: Option<Vec<SubtitleTrack>>) -> Option<Vec<Subtitle>> {
    tracks.map(|tracks| {
        tracks
            .into_iter()
            .map(|track| Subtitle {
                url: track.url,
                label: track.lang.clone(),
                lang: track.lang,
            })
            .collect()
    })
}

fn stream(source: StreamSource, subtitles: Option<Vec<Subtitle>>) -> VideoStream {
    VideoStream {
        url: source.url,
        quality: source.quality.unwrap_or_else(|| "auto".to_string()),
        headers: None,
        subtitles,
    }
}

#[async_trait]
impl ContentProvider for ConsumetProvider {
    /// Hard failure on a metadata miss: there is no fallback catalog
    /// for anime.
    async fn fetch_metadata(&self, id: &str) -> Result<MediaMetadata, ProviderError> {
        let info = self
            .client
            .get_anime_info(id)
            .await
            .map_err(|e| ProviderError::upstream(self.name(), "metadata", e))?;

        Ok(MediaMetadata {
            id: info.id,
            title: info.title.preferred(),
            description: info.description,
            poster_path: info.image,
            backdrop_path: None,
            rating: info.rating.map(|r| r / RATING_SCALE),
            release_date: release_date_string(&info.release_date),
            genres: (!info.genres.is_empty()).then_some(info.genres),
            media_type: MediaType::Anime,
            episodes: info
                .episodes
                .map(|eps| eps.into_iter().map(Episode::from).collect()),
            chapters: None,
        })
    }

    async fn fetch_trending(
        &self,
        _type_hint: Option<MediaType>,
    ) -> Result<Vec<MediaMetadata>, ProviderError> {
        let response = self
            .client
            .get_trending()
            .await
            .map_err(|e| ProviderError::upstream(self.name(), "trending", e))?;

        Ok(response
            .results
            .into_iter()
            .map(|entry| MediaMetadata {
                id: entry.id,
                title: entry.title.preferred(),
                description: None,
                poster_path: entry.image,
                backdrop_path: None,
                rating: Some(entry.rating.unwrap_or(DEFAULT_TRENDING_RATING) / RATING_SCALE),
                release_date: release_date_string(&entry.release_date),
                genres: None,
                media_type: MediaType::Anime,
                episodes: None,
                chapters: None,
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "consumet"
    }
}

#[async_trait]
impl VideoProvider for ConsumetProvider {
    /// `episode` is the upstream episode id; the watch endpoint
    /// orchestrates extraction. Season is meaningless for AniList ids.
    async fn fetch_stream(
        &self,
        _id: &str,
        episode: Option<&str>,
        _season: Option<&str>,
    ) -> Result<Vec<VideoStream>, ProviderError> {
        let episode_id = episode.ok_or_else(|| {
            ProviderError::InvalidRequest("Episode ID is required for anime streams".to_string())
        })?;

        let watch = self
            .client
            .get_watch(episode_id)
            .await
            .map_err(|e| ProviderError::upstream(self.name(), "stream", e))?;

        let tracks = subtitles(watch.subtitles);
        Ok(watch
            .sources
            .into_iter()
            .map(|source| stream(source, tracks.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{http::StatusCode, routing::get, Json, Router};

    use super::*;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn provider_for(base_url: &str) -> ConsumetProvider {
        let client = ConsumetClient::with_base_url(reqwest::Client::new(), base_url);
        ConsumetProvider::new(Arc::new(client))
    }

    #[tokio::test]
    async fn metadata_normalizes_rating_and_episodes() {
        let router = Router::new().route(
            "/meta/anilist/info/{id}",
            get(|| async {
                Json(serde_json::json!({
                    "id": "21",
                    "title": {"english": "One Piece", "romaji": "One Piece"},
                    "description": "Pirates.",
                    "image": "https://img.example/op.jpg",
                    "rating": 88,
                    "releaseDate": 1999,
                    "genres": ["Action", "Adventure"],
                    "episodes": [
                        {"id": "one-piece-ep-1", "number": 1, "title": "Romance Dawn"}
                    ]
                }))
            }),
        );
        let base = spawn_stub(router).await;

        let meta = provider_for(&base).fetch_metadata("21").await.unwrap();
        assert_eq!(meta.title, "One Piece");
        assert_eq!(meta.media_type, MediaType::Anime);
        assert_eq!(meta.rating, Some(8.8));
        assert_eq!(meta.release_date.as_deref(), Some("1999"));
        let episodes = meta.episodes.unwrap();
        assert_eq!(episodes[0].number, 1);
        assert_eq!(episodes[0].id, "one-piece-ep-1");
    }

    #[tokio::test]
    async fn metadata_failure_is_hard() {
        let router = Router::new().route(
            "/meta/anilist/info/{id}",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn_stub(router).await;

        let err = provider_for(&base).fetch_metadata("21").await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Upstream { provider: "consumet", operation: "metadata", .. }
        ));
    }

    #[tokio::test]
    async fn stream_requires_episode_id() {
        let provider = provider_for("http://127.0.0.1:1");
        let err = provider.fetch_stream("21", None, None).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn stream_carries_subtitles_per_source() {
        let router = Router::new().route(
            "/meta/anilist/watch/{episode_id}",
            get(|| async {
                Json(serde_json::json!({
                    "sources": [
                        {"url": "https://cdn.example/master.m3u8", "quality": "1080p"},
                        {"url": "https://cdn.example/auto.m3u8"}
                    ],
                    "subtitles": [{"url": "https://cdn.example/en.vtt", "lang": "en"}]
                }))
            }),
        );
        let base = spawn_stub(router).await;

        let streams = provider_for(&base)
            .fetch_stream("21", Some("one-piece-ep-1"), None)
            .await
            .unwrap();
        assert_eq!(streams.len(), 2);
        assert_eq!(streams[0].quality, "1080p");
        assert_eq!(streams[1].quality, "auto");
        let subs = streams[1].subtitles.as_ref().unwrap();
        assert_eq!(subs[0].lang, "en");
        assert_eq!(subs[0].label, "en");
    }
}
