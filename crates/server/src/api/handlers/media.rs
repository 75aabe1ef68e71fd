use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use providers::MediaType;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Catalog responses may be served stale while a fresh copy is
/// revalidated in the background. Streams are never cached: they can
/// expire or require session-specific resolution.
const CATALOG_CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

/// Query parameters of the media proxy endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct MediaQuery {
    /// Media type: movie, tv, anime or manga
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    /// Upstream catalog identifier
    pub id: Option<String>,
    /// One of metadata, stream, pages, trending (default metadata)
    pub action: Option<String>,
    /// Season number, stream action only
    pub season: Option<String>,
    /// Episode number or id, stream action only
    pub episode: Option<String>,
    /// Chapter id, required for the pages action
    pub chapter_id: Option<String>,
}

fn catalog_response<T: Serialize>(data: &T) -> Response {
    (
        [(header::CACHE_CONTROL, CATALOG_CACHE_CONTROL)],
        Json(data),
    )
        .into_response()
}

/// Aggregation gateway: dispatches a (type, id, action) request to the
/// provider serving that media type and shapes the response.
#[utoipa::path(
    get,
    path = "/api/media",
    tag = "media",
    params(MediaQuery),
    responses(
        (status = 200, description = "Metadata, streams, pages or a trending list depending on action"),
        (status = 400, description = "Missing or invalid request parameter"),
        (status = 502, description = "Upstream provider failure")
    )
)]
pub async fn get_media(
    State(state): State<AppState>,
    Query(query): Query<MediaQuery>,
) -> AppResult<Response> {
    // Validated before any provider resolution or I/O.
    let (Some(type_tag), Some(id)) = (query.media_type.as_deref(), query.id.as_deref()) else {
        return Err(AppError::bad_request("Missing type or id"));
    };
    let media_type: MediaType = type_tag.parse()?;
    let action = query.action.as_deref().unwrap_or("metadata");

    match action {
        "metadata" => {
            let provider = state.registry.resolve(media_type);
            let data = provider.fetch_metadata(id).await.map_err(|e| {
                tracing::error!("Proxy error: {}", e);
                AppError::from(e)
            })?;
            Ok(catalog_response(&data))
        }
        "stream" => {
            if media_type == MediaType::Manga {
                return Err(AppError::bad_request("Manga does not support streaming"));
            }
            let provider = state.registry.resolve_video(media_type)?;
            let data = provider
                .fetch_stream(id, query.episode.as_deref(), query.season.as_deref())
                .await
                .map_err(|e| {
                    tracing::error!("Proxy error: {}", e);
                    AppError::from(e)
                })?;
            Ok(Json(data).into_response())
        }
        "pages" => {
            if media_type != MediaType::Manga {
                return Err(AppError::bad_request("Only manga supports pages"));
            }
            let Some(chapter_id) = query.chapter_id.as_deref() else {
                return Err(AppError::bad_request("Missing chapterId"));
            };
            let provider = state.registry.resolve_manga();
            let data = provider.fetch_pages(id, chapter_id).await.map_err(|e| {
                tracing::error!("Proxy error: {}", e);
                AppError::from(e)
            })?;
            Ok(Json(data).into_response())
        }
        "trending" => {
            let provider = state.registry.resolve(media_type);
            let data = provider
                .fetch_trending(Some(media_type))
                .await
                .map_err(|e| {
                    tracing::error!("Proxy error: {}", e);
                    AppError::from(e)
                })?;
            Ok(catalog_response(&data))
        }
        _ => Err(AppError::bad_request("Invalid action")),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use providers::{
        ContentProvider, MangaPage, MangaProvider, MediaMetadata, ProviderError,
        ProviderRegistry, VideoProvider, VideoStream,
    };

    use super::*;
    use crate::config::Config;
    use crate::db::create_pool;

    #[derive(Default)]
    struct MockCalls {
        metadata: AtomicUsize,
        trending: AtomicUsize,
        stream: AtomicUsize,
        pages: AtomicUsize,
    }

    impl MockCalls {
        fn total(&self) -> usize {
            self.metadata.load(Ordering::SeqCst)
                + self.trending.load(Ordering::SeqCst)
                + self.stream.load(Ordering::SeqCst)
                + self.pages.load(Ordering::SeqCst)
        }
    }

    struct MockProvider {
        calls: Arc<MockCalls>,
        fail_upstream: bool,
    }

    #[async_trait]
    impl ContentProvider for MockProvider {
        async fn fetch_metadata(&self, id: &str) -> Result<MediaMetadata, ProviderError> {
            self.calls.metadata.fetch_add(1, Ordering::SeqCst);
            if self.fail_upstream {
                return Err(ProviderError::upstream("mock", "metadata", "upstream down"));
            }
            Ok(MediaMetadata::minimal(id, "Mock Title", MediaType::Movie))
        }

        async fn fetch_trending(
            &self,
            _type_hint: Option<MediaType>,
        ) -> Result<Vec<MediaMetadata>, ProviderError> {
            self.calls.trending.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    #[async_trait]
    impl VideoProvider for MockProvider {
        async fn fetch_stream(
            &self,
            _id: &str,
            _episode: Option<&str>,
            _season: Option<&str>,
        ) -> Result<Vec<VideoStream>, ProviderError> {
            self.calls.stream.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    #[async_trait]
    impl MangaProvider for MockProvider {
        async fn fetch_pages(
            &self,
            _id: &str,
            _chapter_id: &str,
        ) -> Result<Vec<MangaPage>, ProviderError> {
            self.calls.pages.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    async fn state_with_mocks(fail_upstream: bool) -> (AppState, Arc<MockCalls>) {
        let calls = Arc::new(MockCalls::default());
        let provider = |calls: &Arc<MockCalls>| {
            Arc::new(MockProvider {
                calls: calls.clone(),
                fail_upstream,
            })
        };
        let registry = Arc::new(ProviderRegistry::with_providers(
            provider(&calls),
            provider(&calls),
            provider(&calls),
        ));
        let pool = create_pool("sqlite::memory:", 1).await.unwrap();
        let config = Config::new("sqlite::memory:".to_string(), "token".to_string());
        (AppState::with_registry(pool, config, registry), calls)
    }

    fn query(
        media_type: Option<&str>,
        id: Option<&str>,
        action: Option<&str>,
    ) -> MediaQuery {
        MediaQuery {
            media_type: media_type.map(String::from),
            id: id.map(String::from),
            action: action.map(String::from),
            season: None,
            episode: None,
            chapter_id: None,
        }
    }

    async fn call(state: AppState, q: MediaQuery) -> Response {
        match get_media(State(state), Query(q)).await {
            Ok(response) => response,
            Err(err) => err.into_response(),
        }
    }

    #[tokio::test]
    async fn missing_id_fails_before_any_provider_call() {
        let (state, calls) = state_with_mocks(false).await;
        let response = call(state, query(Some("movie"), None, None)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.total(), 0);
    }

    #[tokio::test]
    async fn unknown_media_type_is_rejected() {
        let (state, calls) = state_with_mocks(false).await;
        let response = call(state, query(Some("podcast"), Some("1"), None)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.total(), 0);
    }

    #[tokio::test]
    async fn manga_stream_is_rejected_without_invoking_a_provider() {
        let (state, calls) = state_with_mocks(false).await;
        let response = call(state, query(Some("manga"), Some("1"), Some("stream"))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.total(), 0);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Manga does not support streaming");
        assert!(json.get("fallback").is_none());
    }

    #[tokio::test]
    async fn pages_require_manga_type_and_chapter_id() {
        let (state, calls) = state_with_mocks(false).await;
        let response = call(
            state.clone(),
            query(Some("movie"), Some("1"), Some("pages")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = call(state, query(Some("manga"), Some("1"), Some("pages"))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.total(), 0);
    }

    #[tokio::test]
    async fn pages_dispatch_to_the_manga_provider() {
        let (state, calls) = state_with_mocks(false).await;
        let mut q = query(Some("manga"), Some("1"), Some("pages"));
        q.chapter_id = Some("ch-1".to_string());
        let response = call(state, q).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(calls.pages.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn metadata_is_served_with_cache_directives() {
        let (state, calls) = state_with_mocks(false).await;
        let response = call(state, query(Some("movie"), Some("603"), None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(calls.metadata.load(Ordering::SeqCst), 1);
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some(CATALOG_CACHE_CONTROL)
        );
    }

    #[tokio::test]
    async fn streams_are_not_cached() {
        let (state, calls) = state_with_mocks(false).await;
        let response = call(state, query(Some("tv"), Some("1399"), Some("stream"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(calls.stream.load(Ordering::SeqCst), 1);
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    }

    #[tokio::test]
    async fn invalid_action_is_rejected() {
        let (state, calls) = state_with_mocks(false).await;
        let response = call(state, query(Some("movie"), Some("1"), Some("download"))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.total(), 0);
    }

    #[tokio::test]
    async fn upstream_failure_carries_the_fallback_marker() {
        let (state, _calls) = state_with_mocks(true).await;
        let response = call(state, query(Some("anime"), Some("21"), None)).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["fallback"], true);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("upstream down"));
    }
}
