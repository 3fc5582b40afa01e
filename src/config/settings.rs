//! User settings for musicsaver
//!
//! This module handles the settings stored in settings.json.

use anyhow::{anyhow, Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Paths;

/// Settings file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Search endpoint of the music catalog
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,

    /// Value of the `media` query parameter
    #[serde(default = "default_catalog_media")]
    pub catalog_media: String,

    /// Term searched when the results screen first loads
    #[serde(default = "default_search_term")]
    pub default_search_term: String,

    /// Optional client-wide HTTP timeout in seconds; unset keeps reqwest's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Verbose logging; passed to `init_logging` by `App::start`
    #[serde(default)]
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_url: default_catalog_url(),
            catalog_media: default_catalog_media(),
            default_search_term: default_search_term(),
            request_timeout_secs: None,
            debug: false,
        }
    }
}

impl Settings {
    /// Load settings from file, writing the defaults on first run
    pub fn load(paths: &Paths) -> Result<Self> {
        let settings_path = paths.settings_path();

        let settings = if settings_path.exists() {
            let content =
                std::fs::read_to_string(&settings_path).context("Failed to read settings file")?;
            serde_json::from_str(&content).context("Failed to parse settings file")?
        } else {
            let settings = Self::default();
            settings.save(paths)?;
            settings
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to file
    pub fn save(&self, paths: &Paths) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(paths.settings_path(), content).context("Failed to write settings file")?;

        Ok(())
    }

    /// Reject catalog URLs the client could never reach
    pub fn validate(&self) -> Result<()> {
        let url = self.catalog_url()?;
        match url.scheme() {
            "https" | "http" => Ok(()),
            other => Err(anyhow!(
                "catalogUrl must be http(s), got scheme '{}'",
                other
            )),
        }
    }

    /// Parsed catalog endpoint
    pub fn catalog_url(&self) -> Result<Url> {
        Url::parse(&self.catalog_url)
            .with_context(|| format!("Invalid catalogUrl '{}'", self.catalog_url))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

// Default value functions for serde

fn default_catalog_url() -> String {
    "https://itunes.apple.com/search".to_string()
}

fn default_catalog_media() -> String {
    "music".to_string()
}

fn default_search_term() -> String {
    "jazz".to_string()
}
