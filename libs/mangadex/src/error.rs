use thiserror::Error;

#[derive(Debug, Error)]
pub enum MangadexError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("MangaDex API error ({status_code}): {message}")]
    Api { status_code: u16, message: String },

    #[error("JSON decode error at {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}
