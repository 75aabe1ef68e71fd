mod client;
mod error;
mod manga;
pub mod models;

pub use client::MangadexClient;
pub use error::MangadexError;
pub use models::{
    AtHomeChapter, AtHomeServer, ChapterAttributes, ChapterEntry, ChapterFeed, Manga,
    MangaAttributes, MangaList, MangaResponse, Relationship,
};

pub type Result<T> = std::result::Result<T, MangadexError>;
