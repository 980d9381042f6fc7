//! Engine Module
//!
//! The catalogue engine that coordinates storage, queries, metrics, and
//! mutations.
//!
//! ## Responsibilities
//! - Load the collection fresh for every operation (no cache)
//! - Answer queries and metrics over the loaded snapshot
//! - Serialize load → modify → save for every mutation
//! - Route `Command`s from outer surfaces

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::command::{Command, Response};
use crate::config::Config;
use crate::error::{MovieError, Result};
use crate::metrics::{self, MovieMetrics};
use crate::model::{Collection, MoviePatch, MovieRecord};
use crate::query;
use crate::storage::{self, JsonFileStore};

/// The main catalogue engine
///
/// ## Concurrency Model: Single-Writer / Multiple-Reader (SWMR)
///
/// - **Writes** (create/update/delete): Serialized per collection file
///   - `write_lock` is shared by every `Engine` on the same path in this
///     process; an advisory lock on `{file}.lock` covers other processes
///   - Both are held across the whole load → modify → save, so two writers
///     can never both start from the same snapshot
///
/// - **Reads** (queries/metrics): No lock
///   - Saves replace the file by rename, so a reader sees either the old or
///     the new collection, never a partial one
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Backing JSON file
    store: JsonFileStore,

    /// Serializes write operations (create/update/delete) across handles
    write_lock: Arc<Mutex<()>>,
}

impl Engine {
    /// Open an engine with the given config
    ///
    /// With `create_if_missing`, an empty collection file is created;
    /// otherwise a missing file surfaces as `StorageRead` on first access.
    pub fn open(config: Config) -> Result<Self> {
        if !config.top_rating_threshold.is_finite() || !config.low_rating_threshold.is_finite() {
            return Err(MovieError::Config(
                "rating thresholds must be finite numbers".to_string(),
            ));
        }

        let store = JsonFileStore::new(&config.data_path, config.sync_strategy)?;

        if config.create_if_missing {
            store.initialize()?;
        }

        let write_lock = storage::writer_mutex(store.path());

        Ok(Self {
            config,
            store,
            write_lock,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data file
    pub fn open_path(path: &Path) -> Result<Self> {
        let mut config = Config::default();
        config.data_path = path.to_path_buf();
        Self::open(config)
    }

    /// Execute a command
    ///
    /// Malformed numeric arguments on any range or threshold query yield an
    /// empty list rather than an error.
    pub fn execute(&self, command: Command) -> Result<Response> {
        tracing::trace!(kind = ?command.command_type(), ?command, "execute");

        match command {
            Command::All => self.all().map(Response::Movies),
            Command::Get { id } => self.find_by_id(&id).map(Response::Movie),
            Command::ByYear { year } => {
                Self::lenient(query::parse_year(&year), |y| self.movies_by_year(y))
            }
            Command::ByYearRange { from, to } => {
                let bounds = query::parse_year(&from)
                    .and_then(|from| query::parse_year(&to).map(|to| (from, to)));
                Self::lenient(bounds, |(from, to)| self.movies_by_year_range(from, to))
            }
            Command::ByMinDuration { minutes } => Self::lenient(query::parse_minutes(&minutes), |m| {
                self.movies_by_min_duration(m)
            }),
            Command::ByTitleAndYear { title, year } => Self::lenient(query::parse_year(&year), |y| {
                self.movies_by_title_and_year(&title, y)
            }),
            Command::ByMinRating { rating } => Self::lenient(query::parse_rating(&rating), |r| {
                self.movies_by_min_rating(r)
            }),
            Command::ByMaxRating { rating } => Self::lenient(query::parse_rating(&rating), |r| {
                self.movies_by_max_rating(r)
            }),
            Command::TopRated => self.top_rated().map(Response::Movies),
            Command::LowRated => self.low_rated().map(Response::Movies),
            Command::Metrics => self.metrics().map(|m| Response::Metrics(Box::new(m))),
            Command::Create { movie } => {
                let movie: MovieRecord = serde_json::from_value(movie)?;
                self.create(movie).map(|m| Response::Movie(Some(m)))
            }
            Command::Update { id, patch } => {
                let patch: MoviePatch = serde_json::from_value(patch)?;
                self.update(&id, patch).map(|m| Response::Movie(Some(m)))
            }
            Command::Delete { id } => self
                .delete(&id)
                .map(|removed| Response::Deleted { removed }),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Every record in collection order
    pub fn all(&self) -> Result<Collection> {
        self.store.load()
    }

    /// First record with exactly this id
    pub fn find_by_id(&self, id: &str) -> Result<Option<MovieRecord>> {
        let movies = self.store.load()?;
        Ok(query::find_by_id(&movies, id).cloned())
    }

    pub fn movies_by_year(&self, year: i32) -> Result<Vec<MovieRecord>> {
        Ok(query::filter_by_year(&self.store.load()?, year))
    }

    pub fn movies_by_year_range(&self, from: i32, to: i32) -> Result<Vec<MovieRecord>> {
        Ok(query::filter_by_year_range(&self.store.load()?, from, to))
    }

    pub fn movies_by_min_duration(&self, min_minutes: u32) -> Result<Vec<MovieRecord>> {
        Ok(query::filter_by_min_duration(&self.store.load()?, min_minutes))
    }

    pub fn movies_by_title_and_year(&self, title: &str, year: i32) -> Result<Vec<MovieRecord>> {
        Ok(query::filter_by_title_and_year(&self.store.load()?, title, year))
    }

    pub fn movies_by_min_rating(&self, rating: f64) -> Result<Vec<MovieRecord>> {
        Ok(query::filter_by_min_rating(&self.store.load()?, rating))
    }

    pub fn movies_by_max_rating(&self, rating: f64) -> Result<Vec<MovieRecord>> {
        Ok(query::filter_by_max_rating(&self.store.load()?, rating))
    }

    /// Records rated at or above `top_rating_threshold`
    pub fn top_rated(&self) -> Result<Vec<MovieRecord>> {
        self.movies_by_min_rating(self.config.top_rating_threshold)
    }

    /// Records rated at or below `low_rating_threshold`
    pub fn low_rated(&self) -> Result<Vec<MovieRecord>> {
        self.movies_by_max_rating(self.config.low_rating_threshold)
    }

    pub fn metrics(&self) -> Result<MovieMetrics> {
        Ok(metrics::compute(&self.store.load()?))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append a record and persist
    ///
    /// Steps:
    /// 1. Acquire write locks
    /// 2. Load collection
    /// 3. Reject a reused id (when uniqueness is enforced)
    /// 4. Append and save
    pub fn create(&self, movie: MovieRecord) -> Result<MovieRecord> {
        let _write_guard = self.write_lock.lock();
        let _file_lock = self.store.lock()?;

        let mut movies = self.store.load()?;

        if self.config.enforce_unique_ids && query::position_of(&movies, &movie.id).is_some() {
            return Err(MovieError::DuplicateId(movie.id));
        }

        movies.push(movie.clone());
        self.store.save(&movies)?;

        tracing::debug!(id = %movie.id, total = movies.len(), "created movie");
        Ok(movie)
    }

    /// Merge `patch` onto the first record with this id and persist
    ///
    /// An empty patch leaves content unchanged but still saves.
    pub fn update(&self, id: &str, patch: MoviePatch) -> Result<MovieRecord> {
        let _write_guard = self.write_lock.lock();
        let _file_lock = self.store.lock()?;

        let mut movies = self.store.load()?;

        let index = query::position_of(&movies, id)
            .ok_or_else(|| MovieError::NotFound(id.to_string()))?;

        if self.config.enforce_unique_ids {
            if let Some(new_id) = patch.id.as_deref().filter(|new_id| *new_id != id) {
                if query::position_of(&movies, new_id).is_some() {
                    return Err(MovieError::DuplicateId(new_id.to_string()));
                }
            }
        }

        if patch.is_empty() {
            tracing::trace!(id = %id, "empty patch, saving unchanged record");
        }

        movies[index].apply(patch);
        self.store.save(&movies)?;

        let updated = movies.swap_remove(index);
        tracing::debug!(id = %id, "updated movie");
        Ok(updated)
    }

    /// Remove every record with this id and persist
    ///
    /// Returns how many records were removed (at least one).
    pub fn delete(&self, id: &str) -> Result<usize> {
        let _write_guard = self.write_lock.lock();
        let _file_lock = self.store.lock()?;

        let mut movies = self.store.load()?;
        let before = movies.len();

        movies.retain(|m| m.id != id);
        let removed = before - movies.len();

        if removed == 0 {
            return Err(MovieError::NotFound(id.to_string()));
        }

        self.store.save(&movies)?;

        tracing::debug!(id = %id, removed, total = movies.len(), "deleted movie");
        Ok(removed)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the backing file path
    pub fn data_path(&self) -> &Path {
        self.store.path()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Run a list query on a parsed argument, turning a malformed argument
    /// into an empty list
    fn lenient<T, F>(parsed: Result<T>, run: F) -> Result<Response>
    where
        F: FnOnce(T) -> Result<Vec<MovieRecord>>,
    {
        match parsed {
            Ok(arg) => run(arg).map(Response::Movies),
            Err(MovieError::Validation(reason)) => {
                tracing::debug!(%reason, "malformed query argument, returning no movies");
                Ok(Response::Movies(Vec::new()))
            }
            Err(e) => Err(e),
        }
    }
}
