//! # hm-core
//!
//! Shared vocabulary for histmerge: the error taxonomy, operator keys, the
//! merge-policy decision type and the artifact generator seam.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::{ArtifactGenerator, ArtifactKind, ArtifactRequest};
pub use types::{MergePolicy, OperatorKey};

/// Crate version, reported by `histmerge version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
