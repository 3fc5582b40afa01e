//! Saved music table operations
//!
//! Public operations never fail: errors are logged and turned into an empty
//! result or a no-op, and the call resolves once the write was attempted.

use anyhow::Result;
use chrono::Utc;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::{debug, error};

use crate::db::DbEngine;
use crate::models::{RemoteTrack, SavedRecord};
use crate::utils::dates::{from_nanos, to_nanos};

/// Database row for saved_music table
#[derive(Debug, FromRow)]
struct SavedRow {
    id: i64,
    song_name: Option<String>,
    artist_name: Option<String>,
    album_name: Option<String>,
    image_url: Option<String>,
    preview_url: Option<String>,
    release_date: Option<String>,
    note: Option<String>,
    saved_at: i64,
}

impl SavedRow {
    fn into_record(self) -> SavedRecord {
        SavedRecord {
            id: self.id,
            song_name: self.song_name,
            artist_name: self.artist_name,
            album_name: self.album_name,
            image_url: self.image_url,
            preview_url: self.preview_url,
            release_date: self.release_date,
            note: self.note,
            saved_at: from_nanos(self.saved_at),
        }
    }
}

/// Saved music table operations
#[derive(Clone)]
pub struct SavedTable {
    db: Arc<DbEngine>,
}

impl SavedTable {
    pub fn new(db: Arc<DbEngine>) -> Self {
        Self { db }
    }

    /// All saved records, oldest first. Empty on failure.
    pub async fn all(&self) -> Vec<SavedRecord> {
        match self.try_all().await {
            Ok(records) => records,
            Err(e) => {
                error!("Failed to read saved music: {:#}", e);
                Vec::new()
            }
        }
    }

    /// Persist `track` with an optional note, stamped with the current time
    pub async fn insert(&self, track: &RemoteTrack, note: Option<&str>) {
        let record = SavedRecord::from_track(track, note, Utc::now());
        match self.try_insert(&record).await {
            Ok(0) => debug!("Insert left saved_music unchanged"),
            Ok(_) => debug!(
                "Saved {:?} by {:?}",
                record.song_name.as_deref().unwrap_or_default(),
                record.artist_name.as_deref().unwrap_or_default()
            ),
            Err(e) => error!("Failed to save music: {:#}", e),
        }
    }

    /// Delete the first record whose `saved_at` equals `record.saved_at`
    pub async fn delete(&self, record: &SavedRecord) {
        match self.try_delete(record).await {
            Ok(0) => debug!("No saved music at {} to delete", record.saved_at),
            Ok(_) => debug!("Deleted saved music at {}", record.saved_at),
            Err(e) => error!("Failed to delete saved music: {:#}", e),
        }
    }

    /// Copy `record`'s fields onto the stored row with the same `saved_at`
    pub async fn update(&self, record: &SavedRecord) {
        match self.try_update(record).await {
            Ok(0) => debug!("No saved music at {} to update", record.saved_at),
            Ok(_) => debug!("Updated saved music at {}", record.saved_at),
            Err(e) => error!("Failed to update saved music: {:#}", e),
        }
    }

    /// Look up a record by its save timestamp
    pub async fn get_by_saved_at(&self, saved_at: chrono::DateTime<Utc>) -> Option<SavedRecord> {
        let row: Result<Option<SavedRow>, _> = sqlx::query_as(
            "SELECT * FROM saved_music WHERE saved_at = ? ORDER BY id LIMIT 1",
        )
        .bind(to_nanos(saved_at))
        .fetch_optional(self.db.pool())
        .await;

        match row {
            Ok(row) => row.map(SavedRow::into_record),
            Err(e) => {
                error!("Failed to look up saved music: {}", e);
                None
            }
        }
    }

    async fn try_all(&self) -> Result<Vec<SavedRecord>> {
        let rows: Vec<SavedRow> =
            sqlx::query_as("SELECT * FROM saved_music ORDER BY saved_at ASC, id ASC")
                .fetch_all(self.db.pool())
                .await?;

        Ok(rows.into_iter().map(SavedRow::into_record).collect())
    }

    async fn try_insert(&self, record: &SavedRecord) -> Result<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO saved_music
                (song_name, artist_name, album_name, image_url, preview_url, release_date, note, saved_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.song_name)
        .bind(&record.artist_name)
        .bind(&record.album_name)
        .bind(&record.image_url)
        .bind(&record.preview_url)
        .bind(&record.release_date)
        .bind(&record.note)
        .bind(to_nanos(record.saved_at))
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected())
    }

    async fn try_delete(&self, record: &SavedRecord) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM saved_music
             WHERE id = (SELECT id FROM saved_music WHERE saved_at = ? ORDER BY id LIMIT 1)
            "#,
        )
        .bind(to_nanos(record.saved_at))
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected())
    }

    async fn try_update(&self, record: &SavedRecord) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE saved_music
               SET song_name = ?,
                   artist_name = ?,
                   album_name = ?,
                   image_url = ?,
                   preview_url = ?,
                   release_date = ?,
                   note = ?
             WHERE id = (SELECT id FROM saved_music WHERE saved_at = ? ORDER BY id LIMIT 1)
            "#,
        )
        .bind(&record.song_name)
        .bind(&record.artist_name)
        .bind(&record.album_name)
        .bind(&record.image_url)
        .bind(&record.preview_url)
        .bind(&record.release_date)
        .bind(&record.note)
        .bind(to_nanos(record.saved_at))
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn table() -> SavedTable {
        SavedTable::new(Arc::new(DbEngine::in_memory().await.unwrap()))
    }

    fn track(song: &str, artist: &str) -> RemoteTrack {
        RemoteTrack {
            song_name: Some(song.to_string()),
            artist_name: Some(artist.to_string()),
            album_name: Some("Album".to_string()),
            preview_url: Some("https://audio.example/p.m4a".to_string()),
            image_url: Some("https://img.example/a.jpg".to_string()),
            release_date: Some("2001-02-03T00:00:00Z".to_string()),
            is_saved: false,
        }
    }

    #[tokio::test]
    async fn test_insert_then_all_round_trips_note() {
        let table = table().await;
        let source = track("So What", "Miles Davis");

        let before = Utc::now();
        table.insert(&source, Some("hello")).await;
        let after = Utc::now();

        let records = table.all().await;
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.note.as_deref(), Some("hello"));
        assert!(record.matches(&source));
        assert_eq!(record.release_date.as_deref(), Some("2001-02-03"));
        assert_eq!(record.preview_url, source.preview_url);
        assert!(record.saved_at >= before && record.saved_at <= after);
    }

    #[tokio::test]
    async fn test_insert_without_note() {
        let table = table().await;
        table.insert(&track("a", "b"), None).await;

        let records = table.all().await;
        assert_eq!(records[0].note, None);
    }

    #[tokio::test]
    async fn test_all_is_ordered_by_saved_at() {
        let table = table().await;
        table.insert(&track("first", "x"), None).await;
        table.insert(&track("second", "x"), None).await;
        table.insert(&track("third", "x"), None).await;

        let names: Vec<_> = table
            .all()
            .await
            .into_iter()
            .map(|r| r.song_name.unwrap_or_default())
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_delete_removes_only_that_record() {
        let table = table().await;
        table.insert(&track("keep", "x"), None).await;
        table.insert(&track("drop", "x"), None).await;

        let records = table.all().await;
        let target = records[1].clone();
        table.delete(&target).await;

        let remaining = table.all().await;
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|r| r.saved_at != target.saved_at));
        assert!(table.get_by_saved_at(target.saved_at).await.is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_record_is_noop() {
        let table = table().await;
        table.insert(&track("keep", "x"), None).await;

        let mut ghost = table.all().await[0].clone();
        ghost.saved_at = ghost.saved_at + chrono::Duration::seconds(1);
        table.delete(&ghost).await;

        assert_eq!(table.all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_with_duplicate_timestamps_removes_first_only() {
        let table = table().await;
        let record = SavedRecord::from_track(&track("dup", "x"), None, Utc::now());
        table.try_insert(&record).await.unwrap();
        table.try_insert(&record).await.unwrap();

        table.delete(&record).await;

        let remaining = table.all().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].saved_at, record.saved_at);
    }

    // the update path writes the caller's fields into the stored row
    #[tokio::test]
    async fn test_update_persists_new_note() {
        let table = table().await;
        table.insert(&track("So What", "Miles Davis"), Some("old")).await;

        let mut record = table.all().await.remove(0);
        record.note = Some("new".to_string());
        table.update(&record).await;

        let stored = table.get_by_saved_at(record.saved_at).await.unwrap();
        assert_eq!(stored.note.as_deref(), Some("new"));
        assert_eq!(stored.id, record.id);
        assert_eq!(stored.saved_at, record.saved_at);
    }

    #[tokio::test]
    async fn test_update_unknown_record_is_noop() {
        let table = table().await;
        table.insert(&track("a", "b"), Some("note")).await;

        let mut ghost = table.all().await.remove(0);
        ghost.saved_at = ghost.saved_at - chrono::Duration::seconds(5);
        ghost.note = Some("changed".to_string());
        table.update(&ghost).await;

        assert_eq!(table.all().await[0].note.as_deref(), Some("note"));
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        let db = Arc::new(DbEngine::in_memory().await.unwrap());
        let table = SavedTable::new(db.clone());
        db.close().await;

        assert!(table.all().await.is_empty());
        table.insert(&track("a", "b"), None).await;
        assert!(table.get_by_saved_at(Utc::now()).await.is_none());

        let record = SavedRecord::from_track(&track("a", "b"), Some("note"), Utc::now());
        table.delete(&record).await;
        table.update(&record).await;
        assert!(table.all().await.is_empty());
    }
}
