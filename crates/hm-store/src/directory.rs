//! Directory tree and slash-separated path navigation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::histogram::Histogram;

/// One named object inside a directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    /// Nested directory.
    Directory(Directory),
    /// Histogram object.
    Histogram(Histogram),
}

/// A directory: named entries ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    #[serde(default)]
    entries: BTreeMap<String, Entry>,
}

/// Split `a/b/c/` into `["a", "b", "c"]`. The empty path is the directory itself.
pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

impl Directory {
    /// Entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Direct entry lookup.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the directory has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Descend into the directory at `path`.
    pub fn find_dir(&self, path: &str) -> Option<&Directory> {
        let mut cur = self;
        for seg in segments(path) {
            match cur.entries.get(seg) {
                Some(Entry::Directory(d)) => cur = d,
                _ => return None,
            }
        }
        Some(cur)
    }

    /// Find the entry at `path` (`None` for the empty path).
    pub fn find(&self, path: &str) -> Option<&Entry> {
        let (parent, name) = match path.trim_end_matches('/').rsplit_once('/') {
            Some((p, n)) => (p, n),
            None => ("", path.trim_end_matches('/')),
        };
        self.find_dir(parent)?.entries.get(name)
    }

    /// Mutable access to the directory at `path`, creating missing levels.
    ///
    /// Returns `None` if a histogram occupies one of the path segments.
    pub fn mkdir_p(&mut self, path: &str) -> Option<&mut Directory> {
        let mut cur = self;
        for seg in segments(path) {
            let entry = cur
                .entries
                .entry(seg.to_string())
                .or_insert_with(|| Entry::Directory(Directory::default()));
            match entry {
                Entry::Directory(d) => cur = d,
                Entry::Histogram(_) => return None,
            }
        }
        Some(cur)
    }

    /// Mutable access to an existing directory at `path`.
    pub fn find_dir_mut(&mut self, path: &str) -> Option<&mut Directory> {
        let mut cur = self;
        for seg in segments(path) {
            match cur.entries.get_mut(seg) {
                Some(Entry::Directory(d)) => cur = d,
                _ => return None,
            }
        }
        Some(cur)
    }

    /// Insert or replace a histogram under `name`.
    pub fn insert_histogram(&mut self, name: &str, histogram: Histogram) {
        self.entries.insert(name.to_string(), Entry::Histogram(histogram));
    }

    /// Visit every histogram below this directory with its full path.
    pub fn walk_histograms<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a Histogram)>) {
        for (name, entry) in &self.entries {
            let path = if prefix.is_empty() { name.clone() } else { format!("{prefix}/{name}") };
            match entry {
                Entry::Directory(d) => d.walk_histograms(&path, out),
                Entry::Histogram(h) => out.push((path, h)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist(name: &str) -> Histogram {
        Histogram::uniform(name, 2, 0.0, 1.0, vec![1.0, 2.0]).unwrap()
    }

    #[test]
    fn mkdir_p_is_idempotent() {
        let mut root = Directory::default();
        root.mkdir_p("a/b").unwrap();
        root.mkdir_p("a/b/").unwrap();
        assert_eq!(root.len(), 1);
        assert!(root.find_dir("a/b").is_some());
    }

    #[test]
    fn mkdir_p_refuses_to_descend_through_histogram() {
        let mut root = Directory::default();
        root.mkdir_p("a").unwrap().insert_histogram("h", hist("h"));
        assert!(root.mkdir_p("a/h/c").is_none());
    }

    #[test]
    fn find_resolves_nested_histogram() {
        let mut root = Directory::default();
        root.mkdir_p("p/var").unwrap().insert_histogram("histo_sm", hist("histo_sm"));
        assert!(matches!(root.find("p/var/histo_sm"), Some(Entry::Histogram(_))));
        assert!(matches!(root.find("p/var"), Some(Entry::Directory(_))));
        assert!(root.find("p/other").is_none());
    }

    #[test]
    fn walk_lists_full_paths() {
        let mut root = Directory::default();
        root.mkdir_p("p/v1").unwrap().insert_histogram("h1", hist("h1"));
        root.mkdir_p("p/v2").unwrap().insert_histogram("h2", hist("h2"));
        let mut out = Vec::new();
        root.walk_histograms("", &mut out);
        let paths: Vec<&str> = out.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["p/v1/h1", "p/v2/h2"]);
    }
}
