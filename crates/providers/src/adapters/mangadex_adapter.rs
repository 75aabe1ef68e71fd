//! Manga provider backed by the MangaDex catalog.

use std::sync::Arc;

use async_trait::async_trait;
use mangadex::{models::pick_localized, Manga, MangadexClient};

use crate::models::{Chapter, MangaPage, MediaMetadata, MediaType};
use crate::{ContentProvider, MangaProvider, ProviderError};

const UPLOADS_BASE: &str = "https://uploads.mangadex.org";
const IMAGE_PROXY_BASE: &str = "https://images.weserv.nl/";

/// Upstream pagination beyond this cap is not followed.
const CHAPTER_FEED_LIMIT: u32 = 100;
const TRENDING_LIMIT: u32 = 20;
const DEFAULT_LANGUAGE: &str = "en";

/// Fixed rating for manga entries; MangaDex has no comparable score.
const MANGA_RATING: f64 = 8.0;

/// Rewrite an upstream image url through the proxy so the client's
/// remote-image allowlist stays a single host regardless of which CDN
/// node the upstream picked.
fn proxy_image_url(url: &str) -> String {
    let encoded = urlencoding::encode(url);
    format!("{}?url={}&default={}", IMAGE_PROXY_BASE, encoded, encoded)
}

pub struct MangaDexProvider {
    client: Arc<MangadexClient>,
    language: String,
}

impl MangaDexProvider {
    pub fn new(client: Arc<MangadexClient>) -> Self {
        Self::with_language(client, DEFAULT_LANGUAGE)
    }

    /// Restrict the chapter feed to one translated language.
    pub fn with_language(client: Arc<MangadexClient>, language: impl Into<String>) -> Self {
        Self {
            client,
            language: language.into(),
        }
    }

    fn cover_url(manga: &Manga, suffix: &str) -> Option<String> {
        manga.cover_file_name().map(|file| {
            proxy_image_url(&format!(
                "{}/covers/{}/{}{}",
                UPLOADS_BASE, manga.id, file, suffix
            ))
        })
    }
}

fn display_title(manga: &Manga) -> String {
    pick_localized(&manga.attributes.title).unwrap_or_else(|| "Untitled".to_string())
}

#[async_trait]
impl ContentProvider for MangaDexProvider {
    /// Attributes and the chapter feed are fetched concurrently and
    /// joined fail-fast: either failure fails the whole request, no
    /// partial manga object is ever returned.
    async fn fetch_metadata(&self, id: &str) -> Result<MediaMetadata, ProviderError> {
        let (manga, feed) = tokio::try_join!(
            self.client.get_manga(id),
            self.client
                .get_chapter_feed(id, &self.language, CHAPTER_FEED_LIMIT),
        )
        .map_err(|e| ProviderError::upstream(self.name(), "metadata", e))?;

        let manga = manga.data;
        let mut chapters: Vec<Chapter> = feed
            .data
            .into_iter()
            .map(|entry| Chapter {
                id: entry.id,
                number: entry.attributes.chapter.unwrap_or_default(),
                title: entry.attributes.title,
                volume: entry.attributes.volume,
            })
            .collect();
        chapters.sort_by(|a, b| Chapter::compare_numbers(&a.number, &b.number));

        Ok(MediaMetadata {
            id: id.to_string(),
            title: display_title(&manga),
            description: manga.attributes.description.get("en").cloned(),
            poster_path: Self::cover_url(&manga, ""),
            backdrop_path: None,
            rating: None,
            release_date: None,
            genres: None,
            media_type: MediaType::Manga,
            episodes: None,
            chapters: Some(chapters),
        })
    }

    async fn fetch_trending(
        &self,
        _type_hint: Option<MediaType>,
    ) -> Result<Vec<MediaMetadata>, ProviderError> {
        let list = self
            .client
            .list_trending(TRENDING_LIMIT)
            .await
            .map_err(|e| ProviderError::upstream(self.name(), "trending", e))?;

        Ok(list
            .data
            .into_iter()
            .map(|manga| MediaMetadata {
                id: manga.id.clone(),
                title: display_title(&manga),
                description: None,
                poster_path: Self::cover_url(&manga, ".256.jpg"),
                backdrop_path: None,
                rating: Some(MANGA_RATING),
                release_date: manga.attributes.year.map(|y| y.to_string()),
                genres: None,
                media_type: MediaType::Manga,
                episodes: None,
                chapters: None,
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "mangadex"
    }
}

#[async_trait]
impl MangaProvider for MangaDexProvider {
    async fn fetch_pages(
        &self,
        _id: &str,
        chapter_id: &str,
    ) -> Result<Vec<MangaPage>, ProviderError> {
        let server = self
            .client
            .get_at_home_server(chapter_id)
            .await
            .map_err(|e| ProviderError::upstream(self.name(), "pages", e))?;

        let base_url = server.base_url;
        let hash = server.chapter.hash;
        Ok(server
            .chapter
            .data
            .into_iter()
            .enumerate()
            .map(|(index, file)| MangaPage {
                url: proxy_image_url(&format!("{}/data/{}/{}", base_url, hash, file)),
                page_number: index as u32 + 1,
            })
            .collect())
    }
}
