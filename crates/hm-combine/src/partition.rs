//! Partition loading: operator folders below a base directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use hm_core::{Error, OperatorKey, Result};

use crate::naming::{channel_from_prefix, container_path};

/// Container path per model.
pub type ModelFiles = BTreeMap<String, PathBuf>;

/// One input partition (EWK-like or QCD-like): operator key -> model -> container.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    label: String,
    entries: BTreeMap<OperatorKey, ModelFiles>,
}

impl Partition {
    /// Empty partition with the given channel label.
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), entries: BTreeMap::new() }
    }

    /// Partition built from in-memory entries.
    pub fn from_entries(
        label: impl Into<String>,
        entries: impl IntoIterator<Item = (OperatorKey, ModelFiles)>,
    ) -> Self {
        Self { label: label.into(), entries: entries.into_iter().collect() }
    }

    /// Channel label, used as the process-label prefix inside its containers.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of operator keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the partition has no operator keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `op` is present.
    pub fn contains(&self, op: &OperatorKey) -> bool {
        self.entries.contains_key(op)
    }

    /// Operator keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &OperatorKey> {
        self.entries.keys()
    }

    /// Lexicographically smallest key.
    pub fn first_key(&self) -> Option<&OperatorKey> {
        self.entries.keys().next()
    }

    /// Add or replace an operator entry.
    pub fn insert(&mut self, op: OperatorKey, files: ModelFiles) {
        self.entries.insert(op, files);
    }

    /// Container of `op` for `model`.
    pub fn file(&self, op: &OperatorKey, model: &str) -> Result<&Path> {
        self.entries
            .get(op)
            .and_then(|files| files.get(model))
            .map(PathBuf::as_path)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "partition '{}' has no container for operator '{op}', model '{model}'",
                    self.label
                ))
            })
    }
}

/// Scan `base` for `<prefix>_<op>` folders and resolve one container per model.
///
/// Every operator must provide every model; the first missing container aborts
/// the load with [`Error::MissingInput`].
pub fn load_partition(base: &Path, prefix: &str, models: &[String]) -> Result<Partition> {
    if models.is_empty() {
        return Err(Error::Validation("at least one model is required".into()));
    }

    let io_err = |source| Error::IoAt { path: base.to_path_buf(), source };
    let mut dirs: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(base).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => dirs.push((name, path)),
            Err(name) => tracing::debug!(?name, "skipping non UTF-8 folder"),
        }
    }
    dirs.sort();

    let folder_prefix = format!("{prefix}_");
    let mut partition = Partition::new(channel_from_prefix(prefix));
    for (name, path) in dirs {
        let Some(op) = name.strip_prefix(&folder_prefix) else {
            tracing::debug!(folder = %name, prefix, "folder does not match prefix, skipping");
            continue;
        };
        if op.is_empty() {
            tracing::warn!(folder = %name, "folder has no operator suffix, skipping");
            continue;
        }

        let mut files = ModelFiles::new();
        for model in models {
            let file = container_path(&path, model);
            if !file.is_file() {
                return Err(Error::MissingInput { path: file });
            }
            files.insert(model.clone(), file);
        }
        partition.insert(OperatorKey::from(op), files);
    }

    tracing::info!(
        base = %base.display(),
        label = partition.label(),
        operators = partition.len(),
        "partition loaded"
    );
    Ok(partition)
}

/// Order two partitions as (majority, minority).
///
/// The partition with strictly more operator keys is the majority; on a tie the
/// first-declared partition is.
pub fn split_majority(first: Partition, second: Partition) -> (Partition, Partition) {
    if second.len() > first.len() { (second, first) } else { (first, second) }
}
