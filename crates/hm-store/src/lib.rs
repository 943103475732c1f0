//! # hm-store
//!
//! Histogram containers for histmerge.
//!
//! A container is a tree of directories holding named 1D histograms, persisted
//! as a self-describing JSON file. Process labels, variables and components map
//! onto nested directories: `process/variable/component`.
//!
//! ## Example
//!
//! ```no_run
//! use hm_store::Container;
//!
//! let f = Container::open("histos.json").unwrap();
//! for key in f.list_keys("").unwrap() {
//!     println!("{} ({})", key.name, key.class_name);
//! }
//! let h = f.get_histogram("SSWW_cW/mjj/histo_sm").unwrap();
//! println!("bins: {}, entries: {}", h.n_bins, h.entries);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod directory;
pub mod file;
pub mod histogram;
pub mod key;
pub mod store;

pub use directory::{Directory, Entry};
pub use file::{CONTAINER_FORMAT, CONTAINER_VERSION, Container};
pub use histogram::Histogram;
pub use key::KeyInfo;
pub use store::{HistogramStore, JsonStore, MemoryStore};
