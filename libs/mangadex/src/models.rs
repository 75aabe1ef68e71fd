use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// MangaDex localizes most text fields as a language-code map.
pub type LocalizedString = BTreeMap<String, String>;

/// Pick a display string out of a localized map: en, then ja, then
/// whatever is listed first.
pub fn pick_localized(map: &LocalizedString) -> Option<String> {
    map.get("en")
        .or_else(|| map.get("ja"))
        .cloned()
        .or_else(|| map.values().next().cloned())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MangaAttributes {
    #[serde(default)]
    pub title: LocalizedString,
    #[serde(default)]
    pub description: LocalizedString,
    pub year: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RelationshipAttributes {
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Relationship {
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: Option<RelationshipAttributes>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Manga {
    pub id: String,
    pub attributes: MangaAttributes,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Manga {
    /// File name of the cover_art relationship, when the include was
    /// requested and the upstream returned one.
    pub fn cover_file_name(&self) -> Option<String> {
        self.relationships
            .iter()
            .find(|r| r.kind == "cover_art")
            .and_then(|r| r.attributes.as_ref())
            .and_then(|a| a.file_name.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MangaResponse {
    pub data: Manga,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MangaList {
    pub data: Vec<Manga>,
}

/// Chapter numbering is not always integral ("10.5" is common), so the
/// upstream reports it as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ChapterAttributes {
    pub chapter: Option<String>,
    pub title: Option<String>,
    pub volume: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ChapterEntry {
    pub id: String,
    pub attributes: ChapterAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ChapterFeed {
    pub data: Vec<ChapterEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AtHomeChapter {
    pub hash: String,
    pub data: Vec<String>,
}

/// Response of /at-home/server/{chapter_id}: the CDN node plus the
/// page file listing for the chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AtHomeServer {
    pub base_url: String,
    pub chapter: AtHomeChapter,
}
