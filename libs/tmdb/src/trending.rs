use crate::{
    models::{PaginatedResponse, TrendingItem, TrendingKind},
    TmdbClient,
};

impl TmdbClient {
    /// Get the daily trending list for movies or TV shows.
    ///
    /// GET /trending/{movie|tv}/day
    pub async fn get_trending(
        &self,
        kind: TrendingKind,
    ) -> crate::Result<PaginatedResponse<TrendingItem>> {
        let url = self.url(&format!("/trending/{}/day", kind.as_path_segment()));
        let token = self.token();
        let response = self
            .client()
            .get(&url)
            .bearer_auth(&token)
            .query(&[("language", self.lang.as_str())])
            .send()
            .await?;
        self.handle_response(response).await
    }
}
