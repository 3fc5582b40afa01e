//! Remote track model (catalog search results)

use serde::{Deserialize, Serialize};

use crate::utils::dates::format_release_date;

/// Top-level body returned by the catalog search endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub result_count: i64,
    pub results: Vec<RemoteTrack>,
}

/// A track returned by the catalog. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTrack {
    #[serde(rename = "trackName", default)]
    pub song_name: Option<String>,
    #[serde(rename = "artistName", default)]
    pub artist_name: Option<String>,
    #[serde(rename = "collectionName", default)]
    pub album_name: Option<String>,
    #[serde(rename = "previewUrl", default)]
    pub preview_url: Option<String>,
    #[serde(rename = "artworkUrl100", default)]
    pub image_url: Option<String>,
    /// Raw ISO-8601 release timestamp
    #[serde(rename = "releaseDate", default)]
    pub release_date: Option<String>,
    /// Set only by the music store's reconcile step
    #[serde(skip)]
    pub is_saved: bool,
}

impl RemoteTrack {
    /// Release date as "YYYY-MM-DD", empty when missing or unparseable
    pub fn release_date_display(&self) -> String {
        format_release_date(self.release_date.as_deref())
    }

    /// Identity used to cross-reference saved records
    pub fn identity(&self) -> (Option<&str>, Option<&str>) {
        (self.song_name.as_deref(), self.artist_name.as_deref())
    }
}
