//! Common data types for histmerge

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between the tokens of a composite (2D grid point) operator key.
pub const KEY_SEPARATOR: char = '_';

/// Identifier of a point in the EFT operator grid, e.g. `cW` or `cHl1_cW`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorKey(String);

impl OperatorKey {
    /// Wrap a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Raw key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the key names a 2D grid point (`A_B`).
    pub fn is_composite(&self) -> bool {
        self.0.contains(KEY_SEPARATOR)
    }

    /// Token-reversed form of a composite key (`A_B` -> `B_A`).
    ///
    /// Returns `None` for simple keys and for keys equal to their own reverse.
    pub fn reversed(&self) -> Option<OperatorKey> {
        if !self.is_composite() {
            return None;
        }
        let tokens: Vec<&str> = self.0.split(KEY_SEPARATOR).rev().collect();
        let rev = tokens.join(&KEY_SEPARATOR.to_string());
        (rev != self.0).then(|| OperatorKey(rev))
    }
}

impl fmt::Display for OperatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OperatorKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for OperatorKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for OperatorKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How a majority operator is combined with the minority partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergePolicy {
    /// The same key exists in the minority partition.
    Exact,
    /// Only the token-reversed composite key exists in the minority partition.
    Permuted {
        /// Key under which the minority stores this grid point.
        minority_key: OperatorKey,
    },
    /// No counterpart: the fallback SM shape is appended as a background.
    NoMatch,
    /// The fallback is appended for every operator regardless of overlap.
    Forced,
}

impl MergePolicy {
    /// Whether minority histograms are summed into the majority ones.
    pub fn is_matched(&self) -> bool {
        matches!(self, MergePolicy::Exact | MergePolicy::Permuted { .. })
    }

    /// Minority key supplying data for `op`, if any.
    pub fn minority_key<'a>(&'a self, op: &'a OperatorKey) -> Option<&'a OperatorKey> {
        match self {
            MergePolicy::Exact => Some(op),
            MergePolicy::Permuted { minority_key } => Some(minority_key),
            MergePolicy::NoMatch | MergePolicy::Forced => None,
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergePolicy::Exact => f.write_str("exact"),
            MergePolicy::Permuted { minority_key } => write!(f, "permuted({minority_key})"),
            MergePolicy::NoMatch => f.write_str("no-match"),
            MergePolicy::Forced => f.write_str("forced"),
        }
    }
}
