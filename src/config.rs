//! Configuration for MovieDB
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Environment variable naming the backing file
pub const DATA_PATH_ENV: &str = "DATA_PATH";

/// Main configuration for a MovieDB instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// The JSON file holding the whole collection.
    /// Saves go through a sibling temp file:
    ///   {dir}/
    ///     ├── movies.json       (collection)
    ///     └── movies.json.tmp   (only present mid-save)
    pub data_path: PathBuf,

    /// Sync strategy: whether to fsync before the rename
    pub sync_strategy: SyncStrategy,

    /// Create the backing file (and parent dirs) on open if it is missing
    pub create_if_missing: bool,

    // -------------------------------------------------------------------------
    // Mutation Configuration
    // -------------------------------------------------------------------------
    /// Reject creates that reuse an existing id
    pub enforce_unique_ids: bool,

    // -------------------------------------------------------------------------
    // Query Configuration
    // -------------------------------------------------------------------------
    /// Inclusive lower bound used by `Engine::top_rated`
    pub top_rating_threshold: f64,

    /// Inclusive upper bound used by `Engine::low_rated`
    pub low_rating_threshold: f64,
}

/// Save sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync the temp file before renaming it over the collection (safest)
    EveryWrite,

    /// Rename without fsync; leaves flushing to the OS
    OsBuffered,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./data/movies.json"),
            sync_strategy: SyncStrategy::EveryWrite,
            create_if_missing: false,
            enforce_unique_ids: true,
            top_rating_threshold: 9.0,
            low_rating_threshold: 6.0,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Defaults, with `DATA_PATH` overriding the data path when set
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Some(path) = std::env::var_os(DATA_PATH_ENV).filter(|p| !p.is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        config
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing file path
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_path = path.into();
        self
    }

    /// Set the save sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Create an empty collection on open if none exists
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.config.create_if_missing = create;
        self
    }

    /// Enable or disable id uniqueness checks on create/update
    pub fn enforce_unique_ids(mut self, enforce: bool) -> Self {
        self.config.enforce_unique_ids = enforce;
        self
    }

    /// Set the minimum rating for the top-rated shortcut
    pub fn top_rating_threshold(mut self, rating: f64) -> Self {
        self.config.top_rating_threshold = rating;
        self
    }

    /// Set the maximum rating for the low-rated shortcut
    pub fn low_rating_threshold(mut self, rating: f64) -> Self {
        self.config.low_rating_threshold = rating;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
