use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::Client;

use crate::error::TmdbError;

const BASE_URL: &str = "https://api.themoviedb.org/3";

/// Shared read-access token that can be rotated at runtime.
pub type AccessToken = Arc<RwLock<String>>;

pub struct TmdbClient {
    client: Client,
    token: AccessToken,
    base_url: String,
    pub(crate) lang: String,
}

impl TmdbClient {
    /// Create a TmdbClient with a reqwest Client and a v4 read-access token.
    pub fn new(client: Client, token: AccessToken) -> Self {
        Self::with_base_url(client, token, BASE_URL)
    }

    /// Create a TmdbClient against a non-default API root.
    pub fn with_base_url(client: Client, token: AccessToken, base_url: impl Into<String>) -> Self {
        Self {
            client,
            token,
            base_url: base_url.into(),
            lang: "vi-VN".to_string(),
        }
    }

    /// Get the current read-access token.
    pub(crate) fn token(&self) -> String {
        self.token.read().clone()
    }

    /// Get the HTTP client for making requests.
    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> crate::Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TmdbError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| TmdbError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}
