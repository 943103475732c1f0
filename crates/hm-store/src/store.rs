//! Histogram store adapters.
//!
//! The combination engine reads and writes containers only through
//! [`HistogramStore`], so its merge logic runs unchanged against files on disk
//! ([`JsonStore`]) or against in-memory trees ([`MemoryStore`]).

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use hm_core::{Error, Result};

use crate::file::Container;

/// Open/persist access to histogram containers addressed by path.
pub trait HistogramStore: Send + Sync {
    /// Load the container at `path`.
    fn open(&self, path: &Path) -> Result<Container>;

    /// Persist `container` at `path`, replacing any previous content.
    fn save(&self, path: &Path, container: &Container) -> Result<()>;

    /// Create the directory `path` and its parents. Existing directories are fine.
    fn ensure_dir(&self, path: &Path) -> Result<()>;
}

/// Containers stored as JSON files on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStore;

impl HistogramStore for JsonStore {
    fn open(&self, path: &Path) -> Result<Container> {
        Container::open(path)
    }

    fn save(&self, path: &Path, container: &Container) -> Result<()> {
        container.save(path)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|source| Error::IoAt { path: path.to_path_buf(), source })
    }
}

/// Containers kept in memory, keyed by path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    containers: Mutex<BTreeMap<PathBuf, Container>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `container` at `path`.
    pub fn insert(&self, path: impl Into<PathBuf>, mut container: Container) {
        let path = path.into();
        container.set_path(path.clone());
        lock(&self.containers).insert(path, container);
    }

    /// Copy of the container at `path`, if any.
    pub fn get(&self, path: &Path) -> Option<Container> {
        lock(&self.containers).get(path).cloned()
    }

    /// Paths of all stored containers.
    pub fn paths(&self) -> Vec<PathBuf> {
        lock(&self.containers).keys().cloned().collect()
    }

    /// Directories created through [`HistogramStore::ensure_dir`].
    pub fn dirs(&self) -> Vec<PathBuf> {
        lock(&self.dirs).iter().cloned().collect()
    }
}

impl HistogramStore for MemoryStore {
    fn open(&self, path: &Path) -> Result<Container> {
        self.get(path).ok_or_else(|| Error::IoAt {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such container"),
        })
    }

    fn save(&self, path: &Path, container: &Container) -> Result<()> {
        self.insert(path, container.clone());
        Ok(())
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        let mut dirs = lock(&self.dirs);
        for p in path.ancestors().filter(|p| !p.as_os_str().is_empty()) {
            dirs.insert(p.to_path_buf());
        }
        Ok(())
    }
}
