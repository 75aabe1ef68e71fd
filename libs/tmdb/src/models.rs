use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f64,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TvShowDetails {
    pub id: i64,
    pub name: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: f64,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Entry of the daily trending list. TMDB mixes movie and TV shapes
/// here, so title/name and the two date fields are all optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TrendingItem {
    pub id: i64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
}

impl TrendingItem {
    /// Display title regardless of whether the entry is a movie or a show.
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_default()
    }

    /// Release date for movies, first air date for shows.
    pub fn date(&self) -> Option<String> {
        self.release_date
            .clone()
            .or_else(|| self.first_air_date.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PaginatedResponse<T> {
    pub page: i64,
    pub results: Vec<T>,
    pub total_pages: i64,
    pub total_results: i64,
}

/// Which trending list to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendingKind {
    Movie,
    Tv,
}

impl TrendingKind {
    pub(crate) fn as_path_segment(self) -> &'static str {
        match self {
            TrendingKind::Movie => "movie",
            TrendingKind::Tv => "tv",
        }
    }
}
