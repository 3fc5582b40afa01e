//! Configuration module for musicsaver
//!
//! This module contains the settings structure and path management.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::Settings;
