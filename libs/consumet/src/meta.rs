use crate::{
    models::{AnimeInfo, TrendingResponse, WatchResponse},
    ConsumetClient,
};

impl ConsumetClient {
    /// Get anime metadata through the AniList meta provider.
    ///
    /// GET /meta/anilist/info/{id}
    pub async fn get_anime_info(&self, id: &str) -> crate::Result<AnimeInfo> {
        let url = self.url(&format!("/meta/anilist/info/{}", id));
        let response = self.client().get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Resolve playable sources for an episode. The watch endpoint
    /// orchestrates the upstream extraction.
    ///
    /// GET /meta/anilist/watch/{episode_id}
    pub async fn get_watch(&self, episode_id: &str) -> crate::Result<WatchResponse> {
        let url = self.url(&format!("/meta/anilist/watch/{}", episode_id));
        let response = self.client().get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Get the AniList trending list.
    ///
    /// GET /meta/anilist/trending
    pub async fn get_trending(&self) -> crate::Result<TrendingResponse> {
        let url = self.url("/meta/anilist/trending");
        let response = self.client().get(&url).send().await?;
        self.handle_response(response).await
    }
}
