mod client;
mod error;
mod meta;
pub mod models;

pub use client::ConsumetClient;
pub use error::ConsumetError;
pub use models::{
    AnimeEpisode, AnimeInfo, AnimeTitle, StreamSource, SubtitleTrack, TrendingEntry,
    TrendingResponse, WatchResponse,
};

pub type Result<T> = std::result::Result<T, ConsumetError>;
