//! Writer locks
//!
//! Two layers, both keyed on the collection file:
//! - an in-process mutex shared by every handle on the same path
//! - an advisory exclusive lock on `{file}.lock` for other processes

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::error::{MovieError, Result};

// =============================================================================
// Global Writer Registry
// =============================================================================
//
// Every handle on the same canonical path gets the same mutex, so writers in
// one process queue up instead of racing through load → modify → save.
// Weak references let entries go once every handle on a path is dropped.

static WRITERS: Lazy<Mutex<HashMap<PathBuf, Weak<Mutex<()>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// The mutex shared by all writers of `path` in this process
pub(crate) fn writer_mutex(path: &Path) -> Arc<Mutex<()>> {
    let key = registry_key(path);
    let mut writers = WRITERS.lock();

    if let Some(mutex) = writers.get(&key).and_then(Weak::upgrade) {
        return mutex;
    }

    writers.retain(|_, weak| weak.strong_count() > 0);

    let mutex = Arc::new(Mutex::new(()));
    writers.insert(key, Arc::downgrade(&mutex));
    mutex
}

/// Canonical parent directory joined with the file name
///
/// Falls back to the path as given while the directory does not exist yet.
fn registry_key(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

// =============================================================================
// Cross-Process Lock
// =============================================================================

/// Exclusive advisory lock on the sibling `{file}.lock`, released on drop
#[derive(Debug)]
pub(crate) struct FileLock {
    file: File,
}

impl FileLock {
    const SUFFIX: &'static str = ".lock";

    /// Block until no other process holds the lock for `path`
    pub(crate) fn acquire(path: &Path) -> Result<Self> {
        let lock_path = Self::lock_path(path);

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .map_err(|e| MovieError::read(path, format!("failed to open lock file: {}", e)))?;

        fs2::FileExt::lock_exclusive(&file)
            .map_err(|e| MovieError::read(path, format!("failed to lock collection: {}", e)))?;

        Ok(Self { file })
    }

    pub(crate) fn lock_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().map(OsString::from).unwrap_or_default();
        name.push(Self::SUFFIX);
        path.with_file_name(name)
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}
