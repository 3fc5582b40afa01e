//! In-memory stores

mod music_store;

pub use music_store::MusicStore;
