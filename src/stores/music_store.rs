//! Music store - search results and saved records, kept in step
//!
//! Holds the latest catalog results and a read-through copy of the saved
//! table, and marks each result as saved or not by (song, artist).

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::db::tables::SavedTable;
use crate::models::{RemoteTrack, SavedRecord};
use crate::plugins::Catalog;

/// In-memory store for catalog results and saved music
pub struct MusicStore {
    catalog: Arc<dyn Catalog>,
    saved: SavedTable,
    /// Latest catalog results
    remote_results: RwLock<Vec<RemoteTrack>>,
    /// Copy of the saved table, rebuilt after every mutation
    saved_cache: RwLock<Vec<SavedRecord>>,
    /// Ticket of the most recently started search
    search_seq: AtomicU64,
}

impl MusicStore {
    /// Build the store and load the saved records once
    pub async fn load(catalog: Arc<dyn Catalog>, saved: SavedTable) -> Self {
        let store = Self {
            catalog,
            saved,
            remote_results: RwLock::new(Vec::new()),
            saved_cache: RwLock::new(Vec::new()),
            search_seq: AtomicU64::new(0),
        };

        store.refresh_saved().await;
        info!("Loaded {} saved tracks", store.saved_cache.read().len());
        store
    }

    /// Snapshot of the current catalog results
    pub fn remote_results(&self) -> Vec<RemoteTrack> {
        self.remote_results.read().clone()
    }

    /// Snapshot of the saved records, oldest first
    pub fn saved_records(&self) -> Vec<SavedRecord> {
        self.saved_cache.read().clone()
    }

    /// Search the catalog for `term` and reconcile the results.
    ///
    /// A failed search keeps the previous results. If another search starts
    /// before this one answers, this answer is dropped.
    pub async fn search(&self, term: &str) {
        let term = normalize_term(term);
        let ticket = self.search_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let outcome = self.catalog.search(&term).await;

        {
            // ticket check and write happen under the same guard
            let mut results = self.remote_results.write();
            if self.search_seq.load(Ordering::SeqCst) != ticket {
                debug!("Discarding stale results for '{}' (ticket {})", term, ticket);
                return;
            }

            match outcome {
                Ok(tracks) => {
                    debug!("Search '{}' returned {} tracks", term, tracks.len());
                    *results = tracks;
                }
                Err(e) => warn!("Search '{}' failed: {}", term, e),
            }
        }

        self.reconcile();
    }

    /// Initial search run when the results screen first loads
    pub async fn search_default(&self, default_term: &str) {
        self.search(default_term).await;
    }

    /// Set `is_saved` on every result from the saved cache
    pub fn reconcile(&self) {
        let saved = self.saved_cache.read();
        let mut results = self.remote_results.write();

        for track in results.iter_mut() {
            let is_saved = saved.iter().any(|record| record.matches(track));
            track.is_saved = is_saved;
        }
    }

    /// Explicitly flip the saved flag on results matching `track`.
    ///
    /// `save` and `delete_track` do not reconcile; callers use this to
    /// update the row they acted on.
    pub fn set_saved_flag(&self, track: &RemoteTrack, saved: bool) {
        let mut results = self.remote_results.write();
        for result in results.iter_mut().filter(|r| r.identity() == track.identity()) {
            result.is_saved = saved;
        }
    }

    /// Save `track` with an optional note, then refresh the saved cache
    pub async fn save(&self, track: &RemoteTrack, note: Option<&str>) {
        self.saved.insert(track, note).await;
        self.refresh_saved().await;
    }

    /// Delete the saved record matching `track` by (song, artist)
    pub async fn delete_track(&self, track: &RemoteTrack) {
        let target = self
            .saved_cache
            .read()
            .iter()
            .find(|record| record.matches(track))
            .cloned();

        match target {
            Some(record) => self.delete_record(&record).await,
            None => debug!(
                "No saved record for {:?} by {:?}",
                track.song_name, track.artist_name
            ),
        }
    }

    /// Delete a saved record, then refresh the saved cache
    pub async fn delete_record(&self, record: &SavedRecord) {
        self.saved.delete(record).await;
        self.refresh_saved().await;
    }

    /// Write an edited record back, then refresh the saved cache
    pub async fn update(&self, record: &SavedRecord) {
        self.saved.update(record).await;
        self.refresh_saved().await;
    }

    async fn refresh_saved(&self) {
        let records = self.saved.all().await;
        *self.saved_cache.write() = records;
    }
}

/// Search terms are sent trimmed and lowercased
fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}
