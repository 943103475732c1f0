//! Output writer: persists combined trees and triggers artifact generation.

use std::path::{Path, PathBuf};

use hm_core::{ArtifactGenerator, ArtifactRequest, Result};
use hm_store::HistogramStore;

use crate::artifacts::DummyConfig;
use crate::naming::{CONTAINER_DIR, CONTAINER_FILE};
use crate::reconcile::MergedEntry;

/// Writes each [`MergedEntry`] to
/// `<out folder>/<folder prefix>_<label>/<model>/rootFile/histos.json`.
pub struct OutputWriter<'a, S: HistogramStore + ?Sized> {
    store: &'a S,
    out_folder: &'a Path,
    folder_prefix: &'a str,
    toggles: &'a DummyConfig,
    generators: &'a [Box<dyn ArtifactGenerator>],
}

impl<'a, S: HistogramStore + ?Sized> OutputWriter<'a, S> {
    /// Writer rooted at `out_folder`. No artifacts are generated until
    /// [`with_artifacts`](Self::with_artifacts) is called.
    pub fn new(store: &'a S, out_folder: &'a Path, folder_prefix: &'a str) -> Self {
        static NO_TOGGLES: DummyConfig = DummyConfig::EMPTY;
        Self { store, out_folder, folder_prefix, toggles: &NO_TOGGLES, generators: &[] }
    }

    /// Invoke `generators` for every kind enabled in `toggles` after each write.
    pub fn with_artifacts(
        mut self,
        toggles: &'a DummyConfig,
        generators: &'a [Box<dyn ArtifactGenerator>],
    ) -> Self {
        self.toggles = toggles;
        self.generators = generators;
        self
    }

    /// Directory of one (operator, model) output.
    pub fn output_dir(&self, entry: &MergedEntry) -> PathBuf {
        self.out_folder
            .join(format!("{}_{}", self.folder_prefix, entry.label))
            .join(&entry.model)
    }

    /// Persist `entry` and run the enabled generators. Returns the container path.
    pub fn write(&self, entry: &MergedEntry) -> Result<PathBuf> {
        let out_dir = self.output_dir(entry);
        let file_dir = out_dir.join(CONTAINER_DIR);
        self.store.ensure_dir(&file_dir)?;

        let path = file_dir.join(CONTAINER_FILE);
        self.store.save(&path, &entry.container)?;
        tracing::info!(
            op = %entry.op,
            model = entry.model.as_str(),
            components = ?entry.components,
            path = %path.display(),
            "combined container written"
        );

        for kind in self.toggles.enabled_kinds() {
            let request = ArtifactRequest {
                sample: &entry.label,
                components: &entry.components,
                variables: &entry.variables,
                model: &entry.model,
                out_path: &out_dir,
                settings: self.toggles.settings(kind),
            };
            for generator in self.generators {
                tracing::debug!(generator = generator.name(), %kind, "generating artifact");
                generator.generate(kind, &request)?;
            }
        }
        Ok(path)
    }
}
