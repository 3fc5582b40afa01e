//! Application wiring
//!
//! Builds every service once and hands out shared handles.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{Paths, Settings};
use crate::db::{DbEngine, SavedTable};
use crate::logging::init_logging;
use crate::plugins::{Catalog, CatalogClient};
use crate::stores::MusicStore;

pub struct App {
    pub paths: Paths,
    pub settings: Settings,
    pub db: Arc<DbEngine>,
    pub music: Arc<MusicStore>,
}

impl App {
    /// Resolve paths, load settings, install logging at the configured
    /// level, open the database and load saved music
    pub async fn start(config_dir: Option<PathBuf>) -> Result<Self> {
        let paths = Paths::new(config_dir)?;
        let settings = Settings::load(&paths)?;

        if let Err(e) = init_logging(settings.debug) {
            debug!("Keeping existing logger: {}", e);
        }
        info!("Config directory: {:?}", paths.config_dir());

        let catalog: Arc<dyn Catalog> = Arc::new(CatalogClient::new(&settings)?);

        Self::with_catalog(paths, settings, catalog).await
    }

    /// Same as [`App::start`] but with a caller-supplied catalog
    pub async fn with_catalog(
        paths: Paths,
        settings: Settings,
        catalog: Arc<dyn Catalog>,
    ) -> Result<Self> {
        let db = Arc::new(DbEngine::open(&paths.db_path()).await?);
        let music = Arc::new(MusicStore::load(catalog, SavedTable::new(db.clone())).await);

        Ok(Self {
            paths,
            settings,
            db,
            music,
        })
    }

    /// Run the configured default search
    pub async fn search_default(&self) {
        self.music
            .search_default(&self.settings.default_search_term)
            .await;
    }

    pub async fn shutdown(&self) {
        self.db.close().await;
    }
}
