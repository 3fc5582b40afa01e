//! Data models for musicsaver

mod remote_track;
mod saved;

pub use remote_track::{CatalogResponse, RemoteTrack};
pub use saved::SavedRecord;
