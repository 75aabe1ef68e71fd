use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    /// TMDB v4 read-access token.
    pub tmdb_token: String,
    /// Override for a self-hosted Consumet deployment.
    pub consumet_base_url: Option<String>,
    /// Per-upstream request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn new(database_url: String, tmdb_token: String) -> Self {
        Self {
            database_url,
            max_connections: 5,
            tmdb_token,
            consumet_base_url: None,
            request_timeout_secs: 15,
        }
    }
}
