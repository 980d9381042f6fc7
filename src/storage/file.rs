//! JSON file store
//!
//! Whole-file load and atomic whole-file save.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::lock::FileLock;
use crate::config::SyncStrategy;
use crate::error::{MovieError, Result};
use crate::model::{Collection, MovieRecord};

/// Owns the backing file of one collection
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// The collection file
    path: PathBuf,

    /// Directory holding the collection; temp files are created here so the
    /// final rename never crosses filesystems
    dir: PathBuf,

    sync_strategy: SyncStrategy,
}

impl JsonFileStore {
    /// Create a store for `path`; does not touch the filesystem
    pub fn new(path: impl Into<PathBuf>, sync_strategy: SyncStrategy) -> Result<Self> {
        let path = path.into();
        if path.file_name().is_none() {
            return Err(MovieError::Config(format!(
                "data path has no file name: {}",
                path.display()
            )));
        }

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            path,
            dir,
            sync_strategy,
        })
    }

    /// Load the full collection
    ///
    /// Missing file, I/O failure, and malformed JSON are all `StorageRead`.
    pub fn load(&self) -> Result<Collection> {
        let bytes = fs::read(&self.path).map_err(|e| MovieError::read(&self.path, e))?;
        let movies: Collection =
            serde_json::from_slice(&bytes).map_err(|e| MovieError::read(&self.path, e))?;

        tracing::debug!(
            path = %self.path.display(),
            count = movies.len(),
            "loaded collection"
        );
        Ok(movies)
    }

    /// Replace the full collection
    ///
    /// Each save writes a uniquely named temp file, so concurrent savers never
    /// share one. On error the previous file content is left in place and the
    /// temp file is removed.
    pub fn save(&self, movies: &[MovieRecord]) -> Result<()> {
        let bytes = serde_json::to_vec(movies).map_err(|e| MovieError::write(&self.path, e))?;

        let tmp = self
            .write_tmp(&bytes)
            .map_err(|e| MovieError::write(&self.path, e))?;

        tmp.persist(&self.path)
            .map_err(|e| MovieError::write(&self.path, e.error))?;

        tracing::debug!(
            path = %self.path.display(),
            count = movies.len(),
            bytes = bytes.len(),
            "saved collection"
        );
        Ok(())
    }

    /// Create an empty collection (and parent dirs) if the file is missing
    ///
    /// Returns `true` when a new file was written.
    pub fn initialize(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        fs::create_dir_all(&self.dir).map_err(|e| MovieError::write(&self.path, e))?;

        self.save(&[])?;
        tracing::info!(path = %self.path.display(), "initialized empty collection");
        Ok(true)
    }

    /// Block until this process holds the cross-process writer lock
    ///
    /// The lock lives in a sibling `{file}.lock` and is released when the
    /// returned guard drops.
    pub(crate) fn lock(&self) -> Result<FileLock> {
        FileLock::acquire(&self.path)
    }

    /// Get the collection file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn write_tmp(&self, bytes: &[u8]) -> std::io::Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        if self.sync_strategy == SyncStrategy::EveryWrite {
            tmp.as_file().sync_all()?;
        }
        Ok(tmp)
    }
}
