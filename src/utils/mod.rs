//! Utility modules for musicsaver

pub mod dates;
