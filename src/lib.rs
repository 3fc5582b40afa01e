//! musicsaver - search a music catalog and keep favorites with notes
//!
//! [`App`] wires the pieces together: [`CatalogClient`] talks to the
//! catalog, [`SavedTable`] persists favorites in SQLite, and [`MusicStore`]
//! keeps search results marked with whether each one is already saved.

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod plugins;
pub mod stores;
pub mod utils;

pub use app::App;
pub use config::{Paths, Settings};
pub use db::{DbEngine, SavedTable};
pub use models::{RemoteTrack, SavedRecord};
pub use plugins::{Catalog, CatalogClient, NetworkError};
pub use stores::MusicStore;
