use reqwest::Client;

use crate::error::MangadexError;

const BASE_URL: &str = "https://api.mangadex.org";

pub struct MangadexClient {
    client: Client,
    base_url: String,
}

impl MangadexClient {
    /// Create a MangadexClient with a reqwest Client.
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    /// Create a MangadexClient against a non-default API root.
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
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
            return Err(MangadexError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| MangadexError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}
