//! Movie/TV provider backed by the TMDB catalog and the vidsrc embed
//! service.

use std::sync::Arc;

use async_trait::async_trait;
use tmdb::{models::TrendingItem, MovieDetails, TmdbClient, TrendingKind, TvShowDetails};

use crate::models::{MediaMetadata, MediaType, VideoStream, QUALITY_IFRAME};
use crate::{ContentProvider, ProviderError, VideoProvider};

const EMBED_BASE: &str = "https://vidsrc.to";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

pub struct VidsrcProvider {
    tmdb: Arc<TmdbClient>,
}

impl VidsrcProvider {
    pub fn new(tmdb: Arc<TmdbClient>) -> Self {
        Self { tmdb }
    }

    /// Minimal metadata used when the id resolves in neither catalog.
    /// Deliberately a success, not an error: the gateway never needs a
    /// special case for "metadata unknown".
    fn degraded(id: &str) -> MediaMetadata {
        MediaMetadata::minimal(id, format!("Media {}", id), MediaType::Movie)
    }
}

fn poster_url(path: Option<String>) -> Option<String> {
    path.map(|p| format!("{}/w500{}", IMAGE_BASE, p))
}

fn backdrop_url(path: Option<String>) -> Option<String> {
    path.map(|p| format!("{}/original{}", IMAGE_BASE, p))
}

impl From<MovieDetails> for MediaMetadata {
    fn from(movie: MovieDetails) -> Self {
        MediaMetadata {
            id: movie.id.to_string(),
            title: movie.title,
            description: Some(movie.overview),
            poster_path: poster_url(movie.poster_path),
            backdrop_path: backdrop_url(movie.backdrop_path),
            rating: Some(movie.vote_average),
            release_date: movie.release_date,
            genres: Some(movie.genres.into_iter().map(|g| g.name).collect()),
            media_type: MediaType::Movie,
            episodes: None,
            chapters: None,
        }
    }
}

impl From<TvShowDetails> for MediaMetadata {
    fn from(show: TvShowDetails) -> Self {
        MediaMetadata {
            id: show.id.to_string(),
            title: show.name,
            description: Some(show.overview),
            poster_path: poster_url(show.poster_path),
            backdrop_path: backdrop_url(show.backdrop_path),
            rating: Some(show.vote_average),
            release_date: show.first_air_date,
            genres: Some(show.genres.into_iter().map(|g| g.name).collect()),
            media_type: MediaType::Tv,
            episodes: None,
            chapters: None,
        }
    }
}

fn trending_metadata(item: TrendingItem, media_type: MediaType) -> MediaMetadata {
    MediaMetadata {
        id: item.id.to_string(),
        title: item.display_title(),
        description: item.overview.clone(),
        rating: item.vote_average,
        release_date: item.date(),
        poster_path: poster_url(item.poster_path),
        backdrop_path: backdrop_url(item.backdrop_path),
        genres: None,
        media_type,
        episodes: None,
        chapters: None,
    }
}

#[async_trait]
impl ContentProvider for VidsrcProvider {
    /// Movies and TV shows share one upstream catalog keyed
    /// ambiguously by id, so a miss on the movie endpoint is retried
    /// as a TV show before degrading.
    async fn fetch_metadata(&self, id: &str) -> Result<MediaMetadata, ProviderError> {
        match self.tmdb.get_movie_details(id).await {
            Ok(movie) => Ok(movie.into()),
            Err(movie_err) => match self.tmdb.get_tv_details(id).await {
                Ok(show) => Ok(show.into()),
                Err(tv_err) => {
                    tracing::warn!(
                        "TMDB metadata unavailable for {} (movie: {}, tv: {}), returning degraded result",
                        id,
                        movie_err,
                        tv_err
                    );
                    Ok(Self::degraded(id))
                }
            },
        }
    }

    async fn fetch_trending(
        &self,
        type_hint: Option<MediaType>,
    ) -> Result<Vec<MediaMetadata>, ProviderError> {
        let (kind, media_type) = match type_hint {
            Some(MediaType::Tv) => (TrendingKind::Tv, MediaType::Tv),
            _ => (TrendingKind::Movie, MediaType::Movie),
        };
        let page = self
            .tmdb
            .get_trending(kind)
            .await
            .map_err(|e| ProviderError::upstream(self.name(), "trending", e))?;
        Ok(page
            .results
            .into_iter()
            .map(|item| trending_metadata(item, media_type))
            .collect())
    }

    fn name(&self) -> &'static str {
        "vidsrc"
    }
}

#[async_trait]
impl VideoProvider for VidsrcProvider {
    /// No direct media extraction is attempted: the returned stream is
    /// always an embeddable document and tagged accordingly.
    async fn fetch_stream(
        &self,
        id: &str,
        episode: Option<&str>,
        season: Option<&str>,
    ) -> Result<Vec<VideoStream>, ProviderError> {
        let url = match (season, episode) {
            (Some(season), Some(episode)) => {
                format!("{}/embed/tv/{}/{}/{}", EMBED_BASE, id, season, episode)
            }
            _ => format!("{}/embed/movie/{}", EMBED_BASE, id),
        };
        Ok(vec![VideoStream {
            url,
            quality: QUALITY_IFRAME.to_string(),
            headers: None,
            subtitles: None,
        }])
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{http::StatusCode, routing::get, Json, Router};
    use tmdb::{AccessToken, TmdbClient};

    use super::*;

    fn token() -> AccessToken {
        Arc::new(parking_lot::RwLock::new("test-token".to_string()))
    }

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn provider_for(base_url: &str) -> VidsrcProvider {
        let client = TmdbClient::with_base_url(reqwest::Client::new(), token(), base_url);
        VidsrcProvider::new(Arc::new(client))
    }

    #[tokio::test]
    async fn metadata_falls_back_to_tv_when_movie_lookup_fails() {
        let router = Router::new()
            .route(
                "/movie/{id}",
                get(|| async { (StatusCode::NOT_FOUND, "not found") }),
            )
            .route(
                "/tv/{id}",
                get(|| async {
                    Json(serde_json::json!({
                        "id": 1399,
                        "name": "Some Show",
                        "overview": "A show.",
                        "poster_path": "/p.jpg",
                        "backdrop_path": null,
                        "first_air_date": "2011-04-17",
                        "vote_average": 8.4,
                        "genres": [{"id": 18, "name": "Drama"}]
                    }))
                }),
            );
        let base = spawn_stub(router).await;

        let meta = provider_for(&base).fetch_metadata("1399").await.unwrap();
        assert_eq!(meta.title, "Some Show");
        assert_eq!(meta.media_type, MediaType::Tv);
        assert_eq!(meta.genres.as_deref(), Some(&["Drama".to_string()][..]));
    }

    #[tokio::test]
    async fn metadata_degrades_when_both_lookups_fail() {
        let router = Router::new()
            .route(
                "/movie/{id}",
                get(|| async { (StatusCode::NOT_FOUND, "not found") }),
            )
            .route(
                "/tv/{id}",
                get(|| async { (StatusCode::NOT_FOUND, "not found") }),
            );
        let base = spawn_stub(router).await;

        let meta = provider_for(&base).fetch_metadata("999").await.unwrap();
        assert_eq!(meta.title, "Media 999");
        assert_eq!(meta.media_type, MediaType::Movie);
        assert!(meta.description.is_none());
    }

    #[tokio::test]
    async fn stream_is_always_an_iframe_embed() {
        let provider = provider_for("http://127.0.0.1:1");

        let movie = provider.fetch_stream("603", None, None).await.unwrap();
        assert_eq!(movie[0].url, "https://vidsrc.to/embed/movie/603");
        assert_eq!(movie[0].quality, QUALITY_IFRAME);

        let episode = provider
            .fetch_stream("1399", Some("3"), Some("1"))
            .await
            .unwrap();
        assert_eq!(episode[0].url, "https://vidsrc.to/embed/tv/1399/1/3");
        assert_eq!(episode[0].quality, QUALITY_IFRAME);
    }
}
