//! Provider dispatch.
//!
//! Stateless mapping from a media-type tag to the provider serving it.
//! The registry is constructed once and passed explicitly; there is no
//! global singleton.

use std::sync::Arc;

use consumet::ConsumetClient;
use mangadex::MangadexClient;
use tmdb::TmdbClient;

use crate::adapters::{ConsumetProvider, MangaDexProvider, VidsrcProvider};
use crate::models::{MediaMetadata, MediaType};
use crate::{ContentProvider, MangaProvider, ProviderError, VideoProvider};

/// A provider narrowed to its capability set. Closed variant: a new
/// media type cannot land here without declaring which extended
/// capability it carries.
#[derive(Clone)]
pub enum ResolvedProvider {
    Video(Arc<dyn VideoProvider>),
    Manga(Arc<dyn MangaProvider>),
}

impl ResolvedProvider {
    pub async fn fetch_metadata(&self, id: &str) -> Result<MediaMetadata, ProviderError> {
        match self {
            ResolvedProvider::Video(p) => p.fetch_metadata(id).await,
            ResolvedProvider::Manga(p) => p.fetch_metadata(id).await,
        }
    }

    pub async fn fetch_trending(
        &self,
        type_hint: Option<MediaType>,
    ) -> Result<Vec<MediaMetadata>, ProviderError> {
        match self {
            ResolvedProvider::Video(p) => p.fetch_trending(type_hint).await,
            ResolvedProvider::Manga(p) => p.fetch_trending(type_hint).await,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResolvedProvider::Video(p) => p.name(),
            ResolvedProvider::Manga(p) => p.name(),
        }
    }
}

/// Maps media types to provider singletons. Movie and TV share one
/// video provider; anime and manga each have their own.
pub struct ProviderRegistry {
    movies: Arc<dyn VideoProvider>,
    anime: Arc<dyn VideoProvider>,
    manga: Arc<dyn MangaProvider>,
}

impl ProviderRegistry {
    /// Build the production registry from the upstream clients.
    pub fn new(
        tmdb: Arc<TmdbClient>,
        consumet: Arc<ConsumetClient>,
        mangadex: Arc<MangadexClient>,
    ) -> Self {
        Self::with_providers(
            Arc::new(VidsrcProvider::new(tmdb)),
            Arc::new(ConsumetProvider::new(consumet)),
            Arc::new(MangaDexProvider::new(mangadex)),
        )
    }

    /// Inject arbitrary providers. Test seam and the place a future
    /// variant would be wired in.
    pub fn with_providers(
        movies: Arc<dyn VideoProvider>,
        anime: Arc<dyn VideoProvider>,
        manga: Arc<dyn MangaProvider>,
    ) -> Self {
        Self {
            movies,
            anime,
            manga,
        }
    }

    /// Resolve the provider serving a media type. Total over
    /// [`MediaType`]: unsupported tags are already rejected when the
    /// tag is parsed.
    pub fn resolve(&self, media_type: MediaType) -> ResolvedProvider {
        match media_type {
            MediaType::Movie | MediaType::Tv => ResolvedProvider::Video(self.movies.clone()),
            MediaType::Anime => ResolvedProvider::Video(self.anime.clone()),
            MediaType::Manga => ResolvedProvider::Manga(self.manga.clone()),
        }
    }

    /// Narrow to a stream-capable provider, failing safely for media
    /// types that cannot stream.
    pub fn resolve_video(
        &self,
        media_type: MediaType,
    ) -> Result<Arc<dyn VideoProvider>, ProviderError> {
        match media_type {
            MediaType::Movie | MediaType::Tv => Ok(self.movies.clone()),
            MediaType::Anime => Ok(self.anime.clone()),
            MediaType::Manga => Err(ProviderError::UnsupportedCapability {
                media_type,
                capability: "video streaming",
            }),
        }
    }

    /// The manga provider. Infallible: manga has exactly one provider.
    pub fn resolve_manga(&self) -> Arc<dyn MangaProvider> {
        self.manga.clone()
    }
}
