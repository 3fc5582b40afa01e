//! Saved record model

use chrono::{DateTime, Utc};

use super::RemoteTrack;
use crate::utils::dates::format_saved_date;

/// A favorited track with the user's note.
///
/// `saved_at` is the identity key for update and delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedRecord {
    /// Database ID
    pub id: i64,
    pub song_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_name: Option<String>,
    pub image_url: Option<String>,
    pub preview_url: Option<String>,
    /// Release date already formatted for display
    pub release_date: Option<String>,
    /// User-supplied note
    pub note: Option<String>,
    /// Timestamp when saved
    pub saved_at: DateTime<Utc>,
}

impl SavedRecord {
    /// Build a record for a track being saved right now
    pub fn from_track(track: &RemoteTrack, note: Option<&str>, saved_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            song_name: track.song_name.clone(),
            artist_name: track.artist_name.clone(),
            album_name: track.album_name.clone(),
            image_url: track.image_url.clone(),
            preview_url: track.preview_url.clone(),
            release_date: Some(track.release_date_display()),
            note: note.map(str::to_string),
            saved_at,
        }
    }

    /// True when this record refers to the same (song, artist) pair
    pub fn matches(&self, track: &RemoteTrack) -> bool {
        (self.song_name.as_deref(), self.artist_name.as_deref()) == track.identity()
    }

    /// Save date as a local "YYYY-MM-DD"
    pub fn saved_date_display(&self) -> String {
        format_saved_date(self.saved_at)
    }
}
