//! Run driver: load both partitions, extract the fallback, combine and write
//! every operator across all models.

use std::path::PathBuf;

use hm_core::{ArtifactGenerator, Error, OperatorKey, Result};
use hm_store::HistogramStore;
use rayon::prelude::*;

use crate::artifacts::DummyConfig;
use crate::fallback::extract_fallback;
use crate::naming::DEFAULT_FOLDER_PREFIX;
use crate::partition::{load_partition, split_majority};
use crate::reconcile::Reconciler;
use crate::report::CombinationReport;
use crate::writer::OutputWriter;

/// Default model list.
pub const DEFAULT_MODELS: &str = "EFT,EFTNeg,EFTNeg-alt";
/// Default output folder.
pub const DEFAULT_OUT_FOLDER: &str = "Combined_EWK_QCD";

/// Everything a combination run needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct CombineSettings {
    /// Base folder of the EWK partition.
    pub ewk_base: PathBuf,
    /// Base folder of the QCD partition.
    pub qcd_base: PathBuf,
    /// Folder prefix of EWK operators, ending with the channel (`to_Latinos_SSWW`).
    pub ewk_prefix: String,
    /// Folder prefix of QCD operators.
    pub qcd_prefix: String,
    /// Name of the combined process.
    pub out_process: String,
    /// Models every operator provides.
    pub models: Vec<String>,
    /// Output root.
    pub out_folder: PathBuf,
    /// Prefix of output operator folders.
    pub folder_prefix: String,
    /// Append the minority SM shape as background for every operator.
    pub qcd_as_bkg: bool,
    /// Worker threads (0 = auto, 1 = sequential).
    pub threads: usize,
}

impl CombineSettings {
    /// Settings with default prefixes, models and output folder.
    pub fn new(
        ewk_base: impl Into<PathBuf>,
        qcd_base: impl Into<PathBuf>,
        out_process: impl Into<String>,
    ) -> Self {
        Self {
            ewk_base: ewk_base.into(),
            qcd_base: qcd_base.into(),
            ewk_prefix: DEFAULT_FOLDER_PREFIX.to_string(),
            qcd_prefix: DEFAULT_FOLDER_PREFIX.to_string(),
            out_process: out_process.into(),
            models: parse_models(DEFAULT_MODELS),
            out_folder: PathBuf::from(DEFAULT_OUT_FOLDER),
            folder_prefix: DEFAULT_FOLDER_PREFIX.to_string(),
            qcd_as_bkg: false,
            threads: 1,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.out_process.is_empty() {
            return Err(Error::Validation("output process name must not be empty".into()));
        }
        if self.models.is_empty() {
            return Err(Error::Validation("at least one model is required".into()));
        }
        Ok(())
    }
}

/// Split a comma-separated model list, dropping blanks.
pub fn parse_models(list: &str) -> Vec<String> {
    list.split(',').map(str::trim).filter(|m| !m.is_empty()).map(String::from).collect()
}

/// Run a full combination and return the summary report.
///
/// Stops at the first error. Units already written stay on disk; nothing is
/// written for the failing unit.
pub fn run_combination<S: HistogramStore + ?Sized>(
    store: &S,
    settings: &CombineSettings,
    toggles: &DummyConfig,
    generators: &[Box<dyn ArtifactGenerator>],
) -> Result<CombinationReport> {
    settings.validate()?;

    let ewk = load_partition(&settings.ewk_base, &settings.ewk_prefix, &settings.models)?;
    let qcd = load_partition(&settings.qcd_base, &settings.qcd_prefix, &settings.models)?;
    let (majority, minority) = split_majority(ewk, qcd);
    tracing::info!(
        majority = majority.label(),
        majority_ops = majority.len(),
        minority = minority.label(),
        minority_ops = minority.len(),
        "partitions ranked"
    );

    let fallback = extract_fallback(store, &minority, &settings.models)?;
    store.ensure_dir(&settings.out_folder)?;

    let engine = Reconciler::new(store, &majority, &minority, &fallback, &settings.out_process)
        .force_no_match(settings.qcd_as_bkg);
    let writer = OutputWriter::new(store, &settings.out_folder, &settings.folder_prefix)
        .with_artifacts(toggles, generators);

    // An operator is the unit of work: all of its models combine before any is written.
    let ops: Vec<&OperatorKey> = majority.keys().collect();

    let process = |report: &mut CombinationReport, op: &OperatorKey| -> Result<()> {
        for merged in engine.reconcile_operator(op, &settings.models, report)? {
            writer.write(&merged)?;
        }
        Ok(())
    };

    let report = if settings.threads == 1 {
        let mut report = CombinationReport::new();
        for op in &ops {
            process(&mut report, op)?;
        }
        report
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(settings.threads)
            .build()
            .map_err(|e| Error::Validation(format!("failed to build thread pool: {e}")))?;
        pool.install(|| {
            ops.par_iter()
                .try_fold(CombinationReport::new, |mut report, op| {
                    process(&mut report, op).map(|()| report)
                })
                .try_reduce(CombinationReport::new, |mut a, b| a.merge(b).map(|()| a))
        })?
    };

    tracing::info!(added = report.added().len(), sole = report.sole().len(), "combination complete");
    Ok(report)
}
