//! Normalized media model shared by every provider.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::ProviderError;

/// Media-type tag. Closed set; anything else is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
    Anime,
    Manga,
}

impl MediaType {
    /// Video types carry episodes and streams; manga carries chapters
    /// and pages.
    pub fn is_video(self) -> bool {
        !matches!(self, MediaType::Manga)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
            MediaType::Anime => "anime",
            MediaType::Manga => "manga",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            "anime" => Ok(MediaType::Anime),
            "manga" => Ok(MediaType::Manga),
            other => Err(ProviderError::UnsupportedMediaType(other.to_string())),
        }
    }
}

/// Episode of a video title. `number` is the ordering key, unique
/// within the title.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    pub number: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<String>,
}

/// Chapter of a manga. Upstream chapter numbering is not always
/// integral ("10.5"), so `number` stays a string and ordering goes
/// through [`Chapter::compare_numbers`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
}

impl Chapter {
    /// Numeric-aware comparison of chapter number strings: "10.5"
    /// sorts after "2". Non-numeric numbers fall back to lexical
    /// order, after any numeric ones.
    pub fn compare_numbers(a: &str, b: &str) -> Ordering {
        match (a.parse::<f64>(), b.parse::<f64>()) {
            (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        }
    }
}

/// Subtitle track attached to a video stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Subtitle {
    pub url: String,
    pub lang: String,
    pub label: String,
}

/// Quality tag for streams that are embeddable documents rather than
/// direct media resources. Such urls must be sandboxed by the client.
pub const QUALITY_IFRAME: &str = "iframe";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VideoStream {
    pub url: String,
    /// Rendition label ("auto", "1080p", ...) or [`QUALITY_IFRAME`].
    pub quality: String,
    /// Header overrides required by the upstream CDN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<Vec<Subtitle>>,
}

/// One page of a manga chapter. Pages form a contiguous 1-based
/// sequence with no gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MangaPage {
    pub url: String,
    pub page_number: u32,
}

/// Normalized metadata every provider produces. `media_type`
/// determines which of `episodes`/`chapters` may be populated; the
/// other must stay empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    /// Normalized to a 0-10 scale regardless of the upstream scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episodes: Option<Vec<Episode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapters: Option<Vec<Chapter>>,
}

impl MediaMetadata {
    /// Minimal metadata with only the required fields set.
    pub fn minimal(id: impl Into<String>, title: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            poster_path: None,
            backdrop_path: None,
            rating: None,
            release_date: None,
            genres: None,
            media_type,
            episodes: None,
            chapters: None,
        }
    }
}
