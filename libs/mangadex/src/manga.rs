use crate::{
    models::{AtHomeServer, ChapterFeed, MangaList, MangaResponse},
    MangadexClient,
};

impl MangadexClient {
    /// Get a manga with its cover_art relationship resolved.
    ///
    /// GET /manga/{id}?includes[]=cover_art
    pub async fn get_manga(&self, id: &str) -> crate::Result<MangaResponse> {
        let url = self.url(&format!("/manga/{}", id));
        let response = self
            .client()
            .get(&url)
            .query(&[("includes[]", "cover_art")])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get the chapter feed for a manga, restricted to one translated
    /// language and capped at `limit` entries. Pagination beyond the
    /// cap is not followed.
    ///
    /// GET /manga/{id}/feed
    pub async fn get_chapter_feed(
        &self,
        id: &str,
        language: &str,
        limit: u32,
    ) -> crate::Result<ChapterFeed> {
        let url = self.url(&format!("/manga/{}/feed", id));
        let limit = limit.to_string();
        let response = self
            .client()
            .get(&url)
            .query(&[
                ("translatedLanguage[]", language),
                ("order[chapter]", "asc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Resolve the at-home CDN node and page listing for a chapter.
    ///
    /// GET /at-home/server/{chapter_id}
    pub async fn get_at_home_server(&self, chapter_id: &str) -> crate::Result<AtHomeServer> {
        let url = self.url(&format!("/at-home/server/{}", chapter_id));
        let response = self.client().get(&url).send().await?;
        self.handle_response(response).await
    }

    /// List manga ordered by follower count, safe content only.
    ///
    /// GET /manga
    pub async fn list_trending(&self, limit: u32) -> crate::Result<MangaList> {
        let url = self.url("/manga");
        let limit = limit.to_string();
        let response = self
            .client()
            .get(&url)
            .query(&[
                ("limit", limit.as_str()),
                ("includes[]", "cover_art"),
                ("order[followedCount]", "desc"),
                ("contentRating[]", "safe"),
            ])
            .send()
            .await?;
        self.handle_response(response).await
    }
}
