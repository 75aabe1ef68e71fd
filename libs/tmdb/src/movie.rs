use crate::{models::MovieDetails, TmdbClient};

impl TmdbClient {
    /// Get movie details
    ///
    /// GET /movie/{movie_id}
    pub async fn get_movie_details(&self, movie_id: &str) -> crate::Result<MovieDetails> {
        let url = self.url(&format!("/movie/{}", movie_id));
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
