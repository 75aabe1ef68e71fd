mod client;
mod error;
mod movie;
mod trending;
mod tv;
pub mod models;

pub use client::{AccessToken, TmdbClient};
pub use error::TmdbError;
pub use models::{Genre, MovieDetails, PaginatedResponse, TrendingItem, TrendingKind, TvShowDetails};

pub type Result<T> = std::result::Result<T, TmdbError>;
