//! # hm-combine
//!
//! Combination of EWK and QCD EFT histogram partitions.
//!
//! Pipeline:
//! - [`partition`]: scan `<prefix>_<op>/<model>/rootFile/histos.json` folders;
//! - [`fallback`]: take the SM shapes of one minority operator;
//! - [`reconcile`]: sum matched operators (exact or permuted 2D keys), append the
//!   SM fallback to unmatched ones;
//! - [`writer`]: persist each combined tree and run artifact generators;
//! - [`report`]: which operators were summed and which were not.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]

pub mod artifacts;
pub mod combine;
pub mod fallback;
pub mod naming;
pub mod partition;
pub mod reconcile;
pub mod report;
pub mod writer;

pub use artifacts::{DescriptorGenerator, DummyConfig};
pub use combine::{CombineSettings, DEFAULT_MODELS, DEFAULT_OUT_FOLDER, parse_models, run_combination};
pub use fallback::{FallbackTable, extract_fallback};
pub use partition::{ModelFiles, Partition, load_partition, split_majority};
pub use reconcile::{MergedEntry, Reconciler, decide_policy};
pub use report::CombinationReport;
pub use writer::OutputWriter;
