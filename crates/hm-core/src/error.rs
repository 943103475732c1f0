//! Error types for histmerge

use std::path::PathBuf;

use thiserror::Error;

/// histmerge error type
///
/// Every variant is fatal for a combination run: nothing is retried or skipped.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error on a known path
    #[error("I/O error on {}: {source}", .path.display())]
    IoAt {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A required per-model histogram container is absent at load time.
    #[error("Missing histograms for {}", .path.display())]
    MissingInput {
        /// Expected container path.
        path: PathBuf,
    },

    /// Minority variables or components are not a subset of the majority's.
    #[error("Found different {what} for {} and {}, check your inputs", .majority.display(), .minority.display())]
    StructuralMismatch {
        /// Which level mismatched, e.g. `variables` or `components of 'mjj'`.
        what: String,
        /// Majority container.
        majority: PathBuf,
        /// Minority container.
        minority: PathBuf,
    },

    /// The majority tree lacks variables the fallback reference provides.
    #[error(
        "Found different variables for {} and the fallback SM (missing: {}), check your inputs",
        .majority.display(),
        .missing.join(", ")
    )]
    FallbackMismatch {
        /// Majority container.
        majority: PathBuf,
        /// Fallback variables absent from the majority tree.
        missing: Vec<String>,
    },

    /// A named group or histogram is not present in a container.
    #[error("{path} not found in {}", .container.display())]
    MissingObject {
        /// Container being read.
        container: PathBuf,
        /// Object path inside the container.
        path: String,
    },

    /// Bin-wise addition of histograms with different binning.
    #[error("Cannot add histograms with different binning: {0}")]
    BinningMismatch(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
