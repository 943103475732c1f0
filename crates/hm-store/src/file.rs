//! Container file: a self-describing JSON histogram tree and its top-level interface.

use std::fs;
use std::path::{Path, PathBuf};

use hm_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::directory::{Directory, Entry};
use crate::histogram::Histogram;
use crate::key::KeyInfo;

/// Value of the `format` field of every container file.
pub const CONTAINER_FORMAT: &str = "histmerge-container";
/// Current container layout version.
pub const CONTAINER_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope {
    format: String,
    version: u32,
    root: Directory,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    format: &'static str,
    version: u32,
    root: &'a Directory,
}

/// A histogram container held fully in memory.
///
/// Everything read out of a container is returned owned, so values outlive the
/// container they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    /// Path for diagnostics.
    path: PathBuf,
    root: Directory,
}

impl Container {
    /// Empty container that will be identified by `path` in diagnostics.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), root: Directory::default() }
    }

    /// Read a container file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data =
            fs::read(path).map_err(|source| Error::IoAt { path: path.to_path_buf(), source })?;
        Self::from_bytes(&data, path.to_path_buf())
    }

    /// Parse container bytes.
    pub fn from_bytes(data: &[u8], path: PathBuf) -> Result<Self> {
        let env: Envelope = serde_json::from_slice(data)?;
        if env.format != CONTAINER_FORMAT {
            return Err(Error::Validation(format!(
                "{}: not a histogram container (format '{}')",
                path.display(),
                env.format
            )));
        }
        if env.version > CONTAINER_VERSION {
            return Err(Error::Validation(format!(
                "{}: unsupported container version {}",
                path.display(),
                env.version
            )));
        }
        let container = Self { path, root: env.root };
        for (_, h) in container.histograms() {
            h.validate()?;
        }
        Ok(container)
    }

    /// Serialize to container bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let env = EnvelopeRef { format: CONTAINER_FORMAT, version: CONTAINER_VERSION, root: &self.root };
        Ok(serde_json::to_vec(&env)?)
    }

    /// Write the container to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        fs::write(path, bytes).map_err(|source| Error::IoAt { path: path.to_path_buf(), source })
    }

    /// Path used in diagnostics.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-label the container (e.g. after copying it to a new location).
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    /// Top-level directory.
    pub fn root(&self) -> &Directory {
        &self.root
    }

    fn missing(&self, path: &str) -> Error {
        Error::MissingObject { container: self.path.clone(), path: path.to_string() }
    }

    /// List the keys of the directory at `dir`.
    pub fn list_keys(&self, dir: &str) -> Result<Vec<KeyInfo>> {
        let d = self.root.find_dir(dir).ok_or_else(|| self.missing(dir))?;
        Ok(d.entries().map(|(name, entry)| KeyInfo::from_entry(name, entry)).collect())
    }

    /// Names of the direct children of the directory at `dir`, in key order.
    pub fn list_children(&self, dir: &str) -> Result<Vec<String>> {
        let d = self.root.find_dir(dir).ok_or_else(|| self.missing(dir))?;
        Ok(d.entries().map(|(name, _)| name.to_string()).collect())
    }

    /// Whether a directory exists at `path`.
    pub fn has_directory(&self, path: &str) -> bool {
        self.root.find_dir(path).is_some()
    }

    /// Read the histogram at `path` (an owned copy).
    pub fn get_histogram(&self, path: &str) -> Result<Histogram> {
        match self.root.find(path) {
            Some(Entry::Histogram(h)) => Ok(h.clone()),
            Some(Entry::Directory(_)) => Err(Error::Validation(format!(
                "{} in {} is a directory, not a histogram",
                path,
                self.path.display()
            ))),
            None => Err(self.missing(path)),
        }
    }

    /// Create the directory at `path` and any missing parents. Existing directories are fine.
    pub fn mkdir(&mut self, path: &str) -> Result<()> {
        match self.root.mkdir_p(path) {
            Some(_) => Ok(()),
            None => Err(Error::Validation(format!(
                "cannot create directory {} in {}: a histogram is in the way",
                path,
                self.path.display()
            ))),
        }
    }

    /// Write `histogram` under `key` in the existing directory `dir`.
    ///
    /// The key is independent of `histogram.name`; an existing key is replaced.
    pub fn put_histogram(&mut self, dir: &str, key: &str, histogram: Histogram) -> Result<()> {
        if key.is_empty() || key.contains('/') {
            return Err(Error::Validation(format!("invalid object key '{key}'")));
        }
        let missing = self.missing(dir);
        let d = self.root.find_dir_mut(dir).ok_or(missing)?;
        d.insert_histogram(key, histogram);
        Ok(())
    }

    /// Every histogram with its full path, in key order.
    pub fn histograms(&self) -> Vec<(String, &Histogram)> {
        let mut out = Vec::new();
        self.root.walk_histograms("", &mut out);
        out
    }
}
