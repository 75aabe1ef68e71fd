use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// AniList carries up to three title renditions per entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AnimeTitle {
    pub english: Option<String>,
    pub romaji: Option<String>,
    pub native: Option<String>,
}

impl AnimeTitle {
    /// Preferred display title: english, then romaji, then native.
    pub fn preferred(&self) -> String {
        self.english
            .clone()
            .or_else(|| self.romaji.clone())
            .or_else(|| self.native.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AnimeEpisode {
    pub id: String,
    pub number: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Response of /meta/anilist/info/{id}. Ratings are on AniList's
/// 0-100 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AnimeInfo {
    pub id: String,
    pub title: AnimeTitle,
    pub description: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub release_date: Option<serde_json::Value>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub episodes: Option<Vec<AnimeEpisode>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct StreamSource {
    pub url: String,
    pub quality: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SubtitleTrack {
    pub url: String,
    pub lang: String,
}

/// Response of /meta/anilist/watch/{episode_id}.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct WatchResponse {
    pub sources: Vec<StreamSource>,
    pub subtitles: Option<Vec<SubtitleTrack>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TrendingEntry {
    pub id: String,
    pub title: AnimeTitle,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub release_date: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TrendingResponse {
    pub results: Vec<TrendingEntry>,
}

/// AniList reports releaseDate sometimes as a year number and sometimes
/// as a string; flatten either into a string.
pub fn release_date_string(value: &Option<serde_json::Value>) -> Option<String> {
    match value {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}
