//! Reconciliation of majority operators with the minority partition.
//!
//! Each majority operator is resolved to a [`MergePolicy`]:
//!
//! - `Exact`: the minority stores the same key, histograms are summed;
//! - `Permuted`: the minority stores the token-reversed 2D key (`B_A` for `A_B`),
//!   histograms are summed and the output keeps the majority key;
//! - `NoMatch` / `Forced`: majority histograms are copied and the fallback SM
//!   shape is appended as an extra background component.

use hm_core::{Error, MergePolicy, OperatorKey, Result};
use hm_store::{Container, HistogramStore};

use crate::fallback::FallbackTable;
use crate::naming::{fallback_component, process_label, strip_component_prefix};
use crate::partition::Partition;
use crate::report::CombinationReport;

/// Combined tree for one (operator, model) pair, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedEntry {
    /// Majority operator key (also used for the output label).
    pub op: OperatorKey,
    /// Model name.
    pub model: String,
    /// Policy the operator was combined with.
    pub policy: MergePolicy,
    /// Output process label, `<output process>_<op>`.
    pub label: String,
    /// Combined histogram tree.
    pub container: Container,
    /// Final component names without the `histo_` prefix.
    pub components: Vec<String>,
    /// Variables of the combined tree.
    pub variables: Vec<String>,
}

/// Resolve how `op` is combined with `minority`.
///
/// A composite key equal to its own reverse can only match exactly.
pub fn decide_policy(op: &OperatorKey, minority: &Partition, force_no_match: bool) -> MergePolicy {
    if force_no_match {
        return MergePolicy::Forced;
    }
    if minority.contains(op) {
        return MergePolicy::Exact;
    }
    match op.reversed() {
        Some(rev) if minority.contains(&rev) => MergePolicy::Permuted { minority_key: rev },
        _ => MergePolicy::NoMatch,
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|c| c == name) {
        list.push(name.to_string());
    }
}

fn not_in<'a>(needles: &'a [String], haystack: &[String]) -> Vec<&'a str> {
    needles.iter().filter(|n| !haystack.contains(n)).map(String::as_str).collect()
}

/// Combines majority operators with the minority partition, one (operator, model)
/// at a time. Reads go through the store; nothing is written.
pub struct Reconciler<'a, S: HistogramStore + ?Sized> {
    store: &'a S,
    majority: &'a Partition,
    minority: &'a Partition,
    fallback: &'a FallbackTable,
    out_process: &'a str,
    force_no_match: bool,
}

impl<'a, S: HistogramStore + ?Sized> Reconciler<'a, S> {
    /// Engine over the given partitions and fallback table.
    pub fn new(
        store: &'a S,
        majority: &'a Partition,
        minority: &'a Partition,
        fallback: &'a FallbackTable,
        out_process: &'a str,
    ) -> Self {
        Self { store, majority, minority, fallback, out_process, force_no_match: false }
    }

    /// Append the fallback shape for every operator, ignoring any overlap.
    pub fn force_no_match(mut self, on: bool) -> Self {
        self.force_no_match = on;
        self
    }

    /// Policy for `op`.
    pub fn policy(&self, op: &OperatorKey) -> MergePolicy {
        decide_policy(op, self.minority, self.force_no_match)
    }

    /// Combine `op` for every model, then record the outcome in `report`.
    ///
    /// Either every model combines or nothing is returned and nothing is recorded,
    /// so a failure in a later model cannot leave partial output for `op`.
    pub fn reconcile_operator(
        &self,
        op: &OperatorKey,
        models: &[String],
        report: &mut CombinationReport,
    ) -> Result<Vec<MergedEntry>> {
        let merged = models.iter().map(|model| self.reconcile(op, model)).collect::<Result<Vec<_>>>()?;
        report.record(op, &self.policy(op))?;
        Ok(merged)
    }

    /// Combine one majority operator for one model.
    pub fn reconcile(&self, op: &OperatorKey, model: &str) -> Result<MergedEntry> {
        let maj_path = self.majority.file(op, model)?;
        let maj = self.store.open(maj_path)?;
        let maj_label = process_label(self.majority.label(), op);
        let vars_maj = maj.list_children(&maj_label)?;

        let policy = self.policy(op);
        tracing::info!(op = %op, model, %policy, "combining operator");

        let label = process_label(self.out_process, op);
        let mut out = Container::new(format!("{label}/{model}"));
        out.mkdir(&label)?;

        let components = match policy.minority_key(op) {
            Some(min_key) => {
                self.sum_matched(&maj, &maj_label, &vars_maj, min_key, model, &label, &mut out)?
            }
            None => self.append_fallback(&maj, &maj_label, &vars_maj, model, &label, &mut out)?,
        };

        Ok(MergedEntry {
            op: op.clone(),
            model: model.to_string(),
            policy,
            label,
            container: out,
            components,
            variables: vars_maj,
        })
    }

    fn sum_matched(
        &self,
        maj: &Container,
        maj_label: &str,
        vars_maj: &[String],
        min_key: &OperatorKey,
        model: &str,
        label: &str,
        out: &mut Container,
    ) -> Result<Vec<String>> {
        let min_path = self.minority.file(min_key, model)?;
        let min = self.store.open(min_path)?;
        let min_label = process_label(self.minority.label(), min_key);
        let vars_min = min.list_children(&min_label)?;

        let mismatch = |what: String| Error::StructuralMismatch {
            what,
            majority: maj.path().to_path_buf(),
            minority: min_path.to_path_buf(),
        };

        let extra = not_in(&vars_min, vars_maj);
        if !extra.is_empty() {
            return Err(mismatch(format!("variables (unexpected: {})", extra.join(", "))));
        }

        let mut components = Vec::new();
        for var in vars_maj {
            let out_dir = format!("{label}/{var}");
            out.mkdir(&out_dir)?;

            let maj_dir = format!("{maj_label}/{var}");
            let comps_maj = maj.list_children(&maj_dir)?;

            let min_dir = format!("{min_label}/{var}");
            let comps_min = if vars_min.contains(var) {
                let comps_min = min.list_children(&min_dir)?;
                let extra = not_in(&comps_min, &comps_maj);
                if !extra.is_empty() {
                    return Err(mismatch(format!(
                        "components of '{var}' (unexpected: {})",
                        extra.join(", ")
                    )));
                }
                comps_min
            } else {
                tracing::debug!(op = %min_key, var = var.as_str(), "variable absent from minority, copying");
                Vec::new()
            };

            for comp in &comps_maj {
                let mut h = maj.get_histogram(&format!("{maj_dir}/{comp}"))?;
                if !comps_min.is_empty() && !comps_min.contains(comp) {
                    tracing::debug!(
                        op = %min_key,
                        var = var.as_str(),
                        comp = comp.as_str(),
                        "component absent from minority, copying"
                    );
                }
                if comps_min.contains(comp) {
                    let h_min = min.get_histogram(&format!("{min_dir}/{comp}"))?;
                    let before = h.integral();
                    h.add(&h_min)?;
                    tracing::debug!(
                        var = var.as_str(),
                        comp = comp.as_str(),
                        first = before,
                        second = h_min.integral(),
                        summed = h.integral(),
                        "components summed"
                    );
                }
                out.put_histogram(&out_dir, comp, h)?;
                push_unique(&mut components, strip_component_prefix(comp));
            }
        }
        Ok(components)
    }

    fn append_fallback(
        &self,
        maj: &Container,
        maj_label: &str,
        vars_maj: &[String],
        model: &str,
        label: &str,
        out: &mut Container,
    ) -> Result<Vec<String>> {
        let shapes = self.fallback.variables(model).ok_or_else(|| {
            Error::Validation(format!("no fallback SM shapes for model '{model}'"))
        })?;

        let missing: Vec<String> =
            shapes.keys().filter(|v| !vars_maj.contains(v)).cloned().collect();
        if !missing.is_empty() {
            return Err(Error::FallbackMismatch { majority: maj.path().to_path_buf(), missing });
        }

        let bkg_key = fallback_component(self.minority.label());
        let mut components = Vec::new();
        for var in vars_maj {
            let out_dir = format!("{label}/{var}");
            out.mkdir(&out_dir)?;

            let maj_dir = format!("{maj_label}/{var}");
            let comps_maj = maj.list_children(&maj_dir)?;
            if comps_maj.contains(&bkg_key) {
                return Err(Error::Validation(format!(
                    "{} already has a component named {bkg_key} under {maj_dir}",
                    maj.path().display()
                )));
            }
            for comp in &comps_maj {
                let h = maj.get_histogram(&format!("{maj_dir}/{comp}"))?;
                out.put_histogram(&out_dir, comp, h)?;
                push_unique(&mut components, strip_component_prefix(comp));
            }

            let mut sm = shapes.get(var).cloned().ok_or_else(|| {
                Error::Validation(format!(
                    "no fallback SM shape for variable '{var}' of {}",
                    maj.path().display()
                ))
            })?;
            sm.name = bkg_key.clone();
            out.put_histogram(&out_dir, &bkg_key, sm)?;
        }
        push_unique(&mut components, strip_component_prefix(&bkg_key));
        Ok(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::ModelFiles;
    use hm_store::{Histogram, MemoryStore};
    use std::path::PathBuf;

    const MODEL: &str = "EFT";

    fn hist(name: &str, content: Vec<f64>) -> Histogram {
        let n = content.len();
        Histogram::uniform(name, n, 0.0, n as f64, content).unwrap()
    }

    /// `vars`: variable -> [(component, contents)].
    fn container(label: &str, vars: &[(&str, &[(&str, [f64; 2])])]) -> Container {
        let mut c = Container::new("mem");
        c.mkdir(label).unwrap();
        for (var, comps) in vars {
            let dir = format!("{label}/{var}");
            c.mkdir(&dir).unwrap();
            for (comp, content) in *comps {
                c.put_histogram(&dir, comp, hist(comp, content.to_vec())).unwrap();
            }
        }
        c
    }

    fn partition(label: &str, side: &str, ops: &[&str]) -> Partition {
        Partition::from_entries(
            label,
            ops.iter().map(|op| {
                let files: ModelFiles =
                    [(MODEL.to_string(), PathBuf::from(format!("{side}/{op}/{MODEL}")))]
                        .into_iter()
                        .collect();
                (OperatorKey::from(*op), files)
            }),
        )
    }

    fn fallback(vars: &[&str]) -> FallbackTable {
        let mut t = FallbackTable::default();
        for v in vars {
            t.insert(MODEL, v, hist("histo_sm", vec![100.0, 200.0]));
        }
        t
    }

    #[test]
    fn policy_decision_covers_all_outcomes() {
        let minority = partition("QCD", "qcd", &["cW", "cW_cHW", "cHl1_cHl1"]);
        let key = |s: &str| OperatorKey::from(s);
        assert_eq!(decide_policy(&key("cW"), &minority, false), MergePolicy::Exact);
        assert_eq!(
            decide_policy(&key("cHW_cW"), &minority, false),
            MergePolicy::Permuted { minority_key: key("cW_cHW") }
        );
        assert_eq!(decide_policy(&key("cW_cHW"), &minority, false), MergePolicy::Exact);
        assert_eq!(decide_policy(&key("cHl1_cHl1"), &minority, false), MergePolicy::Exact);
        assert_eq!(decide_policy(&key("cHB"), &minority, false), MergePolicy::NoMatch);
        assert_eq!(decide_policy(&key("cW"), &minority, true), MergePolicy::Forced);
    }

    #[test]
    fn exact_match_sums_bin_wise() {
        let store = MemoryStore::new();
        store.insert(
            "ewk/cW/EFT",
            container("SSWW_cW", &[("mjj", &[("histo_sm", [1.0, 2.0]), ("histo_lin_cW", [0.5, 0.5])])]),
        );
        store.insert(
            "qcd/cW/EFT",
            container("QCD_cW", &[("mjj", &[("histo_sm", [10.0, 20.0]), ("histo_lin_cW", [1.0, 1.5])])]),
        );
        let (maj, min) = (partition("SSWW", "ewk", &["cW"]), partition("QCD", "qcd", &["cW"]));
        let fb = fallback(&["mjj"]);
        let engine = Reconciler::new(&store, &maj, &min, &fb, "SSWWQCD");

        let merged = engine.reconcile(&OperatorKey::from("cW"), MODEL).unwrap();
        assert_eq!(merged.policy, MergePolicy::Exact);
        assert_eq!(merged.label, "SSWWQCD_cW");
        assert_eq!(merged.components, vec!["lin_cW", "sm"]);
        let sm = merged.container.get_histogram("SSWWQCD_cW/mjj/histo_sm").unwrap();
        assert_eq!(sm.bin_content, vec![11.0, 22.0]);
        let lin = merged.container.get_histogram("SSWWQCD_cW/mjj/histo_lin_cW").unwrap();
        assert_eq!(lin.bin_content, vec![1.5, 2.0]);
    }

    #[test]
    fn summation_is_symmetric_in_partitions() {
        let store = MemoryStore::new();
        store.insert("ewk/cW/EFT", container("SSWW_cW", &[("mjj", &[("histo_sm", [0.1, 0.7])])]));
        store.insert("qcd/cW/EFT", container("QCD_cW", &[("mjj", &[("histo_sm", [0.2, 1.3])])]));
        let ewk = partition("SSWW", "ewk", &["cW"]);
        let qcd = partition("QCD", "qcd", &["cW"]);
        let fb = FallbackTable::default();
        let op = OperatorKey::from("cW");

        let ab = Reconciler::new(&store, &ewk, &qcd, &fb, "X").reconcile(&op, MODEL).unwrap();
        let ba = Reconciler::new(&store, &qcd, &ewk, &fb, "X").reconcile(&op, MODEL).unwrap();
        let h_ab = ab.container.get_histogram("X_cW/mjj/histo_sm").unwrap();
        let h_ba = ba.container.get_histogram("X_cW/mjj/histo_sm").unwrap();
        assert_eq!(h_ab.bin_content, h_ba.bin_content);
        assert_eq!(h_ab.uncertainties(), h_ba.uncertainties());
    }

    #[test]
    fn permuted_key_uses_majority_label() {
        let store = MemoryStore::new();
        store.insert("ewk/A_B/EFT", container("SSWW_A_B", &[("mjj", &[("histo_sm", [1.0, 1.0])])]));
        store.insert("qcd/B_A/EFT", container("QCD_B_A", &[("mjj", &[("histo_sm", [2.0, 3.0])])]));
        let (maj, min) = (partition("SSWW", "ewk", &["A_B"]), partition("QCD", "qcd", &["B_A"]));
        let fb = fallback(&["mjj"]);

        let merged = Reconciler::new(&store, &maj, &min, &fb, "OUT")
            .reconcile(&OperatorKey::from("A_B"), MODEL)
            .unwrap();
        assert_eq!(merged.policy, MergePolicy::Permuted { minority_key: OperatorKey::from("B_A") });
        assert_eq!(merged.label, "OUT_A_B");
        assert!(merged.container.has_directory("OUT_A_B/mjj"));
        assert!(!merged.container.has_directory("OUT_B_A"));
        let h = merged.container.get_histogram("OUT_A_B/mjj/histo_sm").unwrap();
        assert_eq!(h.bin_content, vec![3.0, 4.0]);
    }

    #[test]
    fn minority_variable_subset_is_summed_and_rest_copied() {
        let store = MemoryStore::new();
        store.insert(
            "ewk/cW/EFT",
            container(
                "SSWW_cW",
                &[("v1", &[("histo_sm", [1.0, 1.0])]), ("v2", &[("histo_sm", [5.0, 6.0])])],
            ),
        );
        store.insert("qcd/cW/EFT", container("QCD_cW", &[("v1", &[("histo_sm", [1.0, 2.0])])]));
        let (maj, min) = (partition("SSWW", "ewk", &["cW"]), partition("QCD", "qcd", &["cW"]));
        let fb = FallbackTable::default();

        let merged = Reconciler::new(&store, &maj, &min, &fb, "O")
            .reconcile(&OperatorKey::from("cW"), MODEL)
            .unwrap();
        assert_eq!(merged.variables, vec!["v1", "v2"]);
        assert_eq!(merged.container.get_histogram("O_cW/v1/histo_sm").unwrap().bin_content, vec![2.0, 3.0]);
        assert_eq!(merged.container.get_histogram("O_cW/v2/histo_sm").unwrap().bin_content, vec![5.0, 6.0]);
    }

    #[test]
    fn component_absent_from_minority_is_copied_unsummed() {
        let store = MemoryStore::new();
        store.insert(
            "ewk/cW/EFT",
            container("SSWW_cW", &[("v1", &[("histo_sm", [1.0, 1.0]), ("histo_quad_cW", [4.0, 5.0])])]),
        );
        store.insert("qcd/cW/EFT", container("QCD_cW", &[("v1", &[("histo_sm", [2.0, 2.0])])]));
        let (maj, min) = (partition("SSWW", "ewk", &["cW"]), partition("QCD", "qcd", &["cW"]));
        let fb = FallbackTable::default();

        let merged = Reconciler::new(&store, &maj, &min, &fb, "O")
            .reconcile(&OperatorKey::from("cW"), MODEL)
            .unwrap();
        let c = &merged.container;
        assert_eq!(c.get_histogram("O_cW/v1/histo_sm").unwrap().bin_content, vec![3.0, 3.0]);
        assert_eq!(c.get_histogram("O_cW/v1/histo_quad_cW").unwrap().bin_content, vec![4.0, 5.0]);
        assert_eq!(merged.components, vec!["quad_cW", "sm"]);
    }

    #[test]
    fn foreign_minority_variable_is_structural_mismatch() {
        let store = MemoryStore::new();
        store.insert(
            "ewk/cW/EFT",
            container("SSWW_cW", &[("v1", &[("histo_sm", [1.0, 1.0])]), ("v2", &[("histo_sm", [1.0, 1.0])])]),
        );
        store.insert(
            "qcd/cW/EFT",
            container("QCD_cW", &[("v1", &[("histo_sm", [1.0, 1.0])]), ("v3", &[("histo_sm", [1.0, 1.0])])]),
        );
        let (maj, min) = (partition("SSWW", "ewk", &["cW"]), partition("QCD", "qcd", &["cW"]));
        let fb = FallbackTable::default();

        let err = Reconciler::new(&store, &maj, &min, &fb, "O")
            .reconcile(&OperatorKey::from("cW"), MODEL)
            .unwrap_err();
        match err {
            Error::StructuralMismatch { what, majority, minority } => {
                assert!(what.contains("v3"));
                assert_eq!(majority, PathBuf::from("ewk/cW/EFT"));
                assert_eq!(minority, PathBuf::from("qcd/cW/EFT"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn operator_is_recorded_only_when_every_model_combines() {
        let store = MemoryStore::new();
        store.insert("ewk/cW/EFT", container("SSWW_cW", &[("mjj", &[("histo_sm", [1.0, 2.0])])]));
        store.insert("qcd/cW/EFT", container("QCD_cW", &[("mjj", &[("histo_sm", [1.0, 1.0])])]));
        let (maj, min) = (partition("SSWW", "ewk", &["cW"]), partition("QCD", "qcd", &["cW"]));
        let fb = FallbackTable::default();
        let engine = Reconciler::new(&store, &maj, &min, &fb, "O");
        let op = OperatorKey::from("cW");

        let mut report = CombinationReport::new();
        let merged = engine.reconcile_operator(&op, &[MODEL.to_string()], &mut report).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(report.added(), &[op.clone()]);

        // The partition has no file for a second model: nothing may be recorded.
        let mut report = CombinationReport::new();
        let models = [MODEL.to_string(), "EFTNeg".to_string()];
        assert!(engine.reconcile_operator(&op, &models, &mut report).is_err());
        assert!(report.added().is_empty());
        assert!(report.sole().is_empty());
    }

    #[test]
    fn foreign_minority_component_is_structural_mismatch() {
        let store = MemoryStore::new();
        store.insert("ewk/cW/EFT", container("SSWW_cW", &[("v1", &[("histo_sm", [1.0, 1.0])])]));
        store.insert(
            "qcd/cW/EFT",
            container("QCD_cW", &[("v1", &[("histo_sm", [1.0, 1.0]), ("histo_quad_cW", [1.0, 1.0])])]),
        );
        let (maj, min) = (partition("SSWW", "ewk", &["cW"]), partition("QCD", "qcd", &["cW"]));
        let fb = FallbackTable::default();

        let err = Reconciler::new(&store, &maj, &min, &fb, "O")
            .reconcile(&OperatorKey::from("cW"), MODEL)
            .unwrap_err();
        assert!(matches!(err, Error::StructuralMismatch { ref what, .. } if what.contains("histo_quad_cW")));
    }

    #[test]
    fn no_match_copies_majority_and_appends_fallback() {
        let store = MemoryStore::new();
        store.insert(
            "ewk/cHB/EFT",
            container("SSWW_cHB", &[("mjj", &[("histo_sm", [1.0, 2.0]), ("histo_quad_cHB", [0.1, 0.2])])]),
        );
        let (maj, min) = (partition("SSWW", "ewk", &["cHB"]), partition("OSWW", "qcd", &["cW"]));
        let fb = fallback(&["mjj"]);

        let merged = Reconciler::new(&store, &maj, &min, &fb, "O")
            .reconcile(&OperatorKey::from("cHB"), MODEL)
            .unwrap();
        assert_eq!(merged.policy, MergePolicy::NoMatch);
        assert_eq!(merged.components, vec!["quad_cHB", "sm", "QCD_OSWW"]);
        let c = &merged.container;
        assert_eq!(
            c.list_children("O_cHB/mjj").unwrap(),
            vec!["histo_QCD_OSWW", "histo_quad_cHB", "histo_sm"]
        );
        assert_eq!(c.get_histogram("O_cHB/mjj/histo_sm").unwrap().bin_content, vec![1.0, 2.0]);
        let bkg = c.get_histogram("O_cHB/mjj/histo_QCD_OSWW").unwrap();
        assert_eq!(bkg.bin_content, vec![100.0, 200.0]);
        assert_eq!(bkg.name, "histo_QCD_OSWW");
    }

    #[test]
    fn forced_override_ignores_overlap() {
        let store = MemoryStore::new();
        store.insert("ewk/cW/EFT", container("SSWW_cW", &[("mjj", &[("histo_sm", [1.0, 2.0])])]));
        store.insert("qcd/cW/EFT", container("QCD_cW", &[("mjj", &[("histo_sm", [9.0, 9.0])])]));
        let (maj, min) = (partition("SSWW", "ewk", &["cW"]), partition("QCD", "qcd", &["cW"]));
        let fb = fallback(&["mjj"]);

        let merged = Reconciler::new(&store, &maj, &min, &fb, "O")
            .force_no_match(true)
            .reconcile(&OperatorKey::from("cW"), MODEL)
            .unwrap();
        assert_eq!(merged.policy, MergePolicy::Forced);
        assert_eq!(merged.container.get_histogram("O_cW/mjj/histo_sm").unwrap().bin_content, vec![1.0, 2.0]);
        assert!(merged.container.get_histogram("O_cW/mjj/histo_QCD_QCD").is_ok());
    }

    #[test]
    fn fallback_variable_missing_from_majority_fails() {
        let store = MemoryStore::new();
        store.insert("ewk/cHB/EFT", container("SSWW_cHB", &[("mjj", &[("histo_sm", [1.0, 2.0])])]));
        let (maj, min) = (partition("SSWW", "ewk", &["cHB"]), partition("QCD", "qcd", &["cW"]));
        let fb = fallback(&["mjj", "mll"]);

        let err = Reconciler::new(&store, &maj, &min, &fb, "O")
            .reconcile(&OperatorKey::from("cHB"), MODEL)
            .unwrap_err();
        match err {
            Error::FallbackMismatch { missing, .. } => assert_eq!(missing, vec!["mll"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn binning_mismatch_aborts_merge() {
        let store = MemoryStore::new();
        store.insert("ewk/cW/EFT", container("SSWW_cW", &[("mjj", &[("histo_sm", [1.0, 2.0])])]));
        let mut min = Container::new("mem");
        min.mkdir("QCD_cW/mjj").unwrap();
        min.put_histogram("QCD_cW/mjj", "histo_sm", hist("histo_sm", vec![1.0, 2.0, 3.0])).unwrap();
        store.insert("qcd/cW/EFT", min);
        let (maj, minp) = (partition("SSWW", "ewk", &["cW"]), partition("QCD", "qcd", &["cW"]));
        let fb = FallbackTable::default();

        let err = Reconciler::new(&store, &maj, &minp, &fb, "O")
            .reconcile(&OperatorKey::from("cW"), MODEL)
            .unwrap_err();
        assert!(matches!(err, Error::BinningMismatch(_)));
    }
}
