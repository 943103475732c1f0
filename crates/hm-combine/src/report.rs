//! Run summary: which operators were summed and which only got the fallback.

use std::fmt;

use hm_core::{Error, MergePolicy, OperatorKey, Result};
use serde::Serialize;

/// Operators combined during a run, in first-recorded order.
///
/// `added` holds operators summed with a minority counterpart, `sole` those that
/// only received the fallback SM background. A key is recorded at most once and
/// never in both lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombinationReport {
    added: Vec<OperatorKey>,
    sole: Vec<OperatorKey>,
}

impl CombinationReport {
    /// Empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for `op`. Repeated calls are no-ops.
    pub fn record(&mut self, op: &OperatorKey, policy: &MergePolicy) -> Result<()> {
        let (target, other, target_name) = if policy.is_matched() {
            (&mut self.added, &self.sole, "added")
        } else {
            (&mut self.sole, &self.added, "sole")
        };
        if other.contains(op) {
            return Err(Error::Validation(format!(
                "operator '{op}' cannot be recorded as {target_name}: already recorded with another policy"
            )));
        }
        if !target.contains(op) {
            target.push(op.clone());
        }
        Ok(())
    }

    /// Fold a report produced by another worker into this one.
    pub fn merge(&mut self, other: CombinationReport) -> Result<()> {
        for op in other.added {
            self.record(&op, &MergePolicy::Exact)?;
        }
        for op in other.sole {
            self.record(&op, &MergePolicy::NoMatch)?;
        }
        Ok(())
    }

    /// Operators whose contributions were summed.
    pub fn added(&self) -> &[OperatorKey] {
        &self.added
    }

    /// Operators that only received the fallback background.
    pub fn sole(&self) -> &[OperatorKey] {
        &self.sole
    }
}

fn join(keys: &[OperatorKey]) -> String {
    keys.iter().map(OperatorKey::as_str).collect::<Vec<_>>().join(", ")
}

impl fmt::Display for CombinationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The following ops are shared and contributions summed {}: [{}]",
            self.added.len(),
            join(&self.added)
        )?;
        write!(
            f,
            "The following ops are not shared. Contributions only from SM as bkg {}: [{}]",
            self.sole.len(),
            join(&self.sole)
        )
    }
}
