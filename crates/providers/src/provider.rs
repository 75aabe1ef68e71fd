//! Content provider trait definitions

use async_trait::async_trait;

use crate::models::{MangaPage, MediaMetadata, MediaType, VideoStream};
use crate::ProviderError;

/// Base contract every provider implements.
///
/// Providers adapt one upstream API's shape into the normalized media
/// model. Upstream failures surface as
/// [`ProviderError::Upstream`] carrying the provider and operation
/// names.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Fetch normalized metadata for one title.
    async fn fetch_metadata(&self, id: &str) -> Result<MediaMetadata, ProviderError>;

    /// Fetch the upstream trending list. The hint selects between
    /// sub-catalogs where the upstream has more than one (movie vs tv).
    async fn fetch_trending(
        &self,
        type_hint: Option<MediaType>,
    ) -> Result<Vec<MediaMetadata>, ProviderError>;

    /// Provider name for logging and error tagging.
    fn name(&self) -> &'static str;
}

/// Extended capability: stream resolution for video titles.
#[async_trait]
pub trait VideoProvider: ContentProvider {
    /// Resolve playable streams for a title, optionally scoped to an
    /// episode (and season for multi-season upstreams).
    async fn fetch_stream(
        &self,
        id: &str,
        episode: Option<&str>,
        season: Option<&str>,
    ) -> Result<Vec<VideoStream>, ProviderError>;
}

/// Extended capability: page listing for manga chapters.
#[async_trait]
pub trait MangaProvider: ContentProvider {
    /// Fetch the ordered page sequence of one chapter.
    async fn fetch_pages(
        &self,
        id: &str,
        chapter_id: &str,
    ) -> Result<Vec<MangaPage>, ProviderError>;
}
