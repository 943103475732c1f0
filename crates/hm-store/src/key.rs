//! Key listing entries: what `Container::list_keys` reports for a directory.

use serde::Serialize;

use crate::directory::Entry;

/// Class name reported for nested directories.
pub const DIRECTORY_CLASS: &str = "TDirectory";
/// Class name reported for 1D histograms.
pub const HISTOGRAM_CLASS: &str = "TH1D";

/// Public info about a key (for `list_keys()`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyInfo {
    /// Object name.
    pub name: String,
    /// Object class name (`TH1D` or `TDirectory`).
    pub class_name: &'static str,
}

impl KeyInfo {
    /// Describe a directory entry.
    pub fn from_entry(name: &str, entry: &Entry) -> Self {
        let class_name = match entry {
            Entry::Directory(_) => DIRECTORY_CLASS,
            Entry::Histogram(_) => HISTOGRAM_CLASS,
        };
        Self { name: name.to_string(), class_name }
    }

    /// Whether the key refers to a nested directory.
    pub fn is_directory(&self) -> bool {
        self.class_name == DIRECTORY_CLASS
    }
}
