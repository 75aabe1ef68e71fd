use crate::{models::TvShowDetails, TmdbClient};

impl TmdbClient {
    /// Get the details of a TV show by its ID.
    ///
    /// GET /tv/{series_id}
    pub async fn get_tv_details(&self, series_id: &str) -> crate::Result<TvShowDetails> {
        let url = self.url(&format!("/tv/{}", series_id));
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
