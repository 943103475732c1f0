//! Operator-independent SM reference shapes taken from the minority partition.

use std::collections::BTreeMap;

use hm_core::{Error, OperatorKey, Result};
use hm_store::{Histogram, HistogramStore};

use crate::naming::{NOMINAL_COMPONENT, process_label};
use crate::partition::Partition;

/// model -> variable -> SM histogram.
///
/// The SM shape does not depend on the operator, so one table serves every
/// unmatched majority operator. Histograms are owned copies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FallbackTable {
    source: Option<OperatorKey>,
    shapes: BTreeMap<String, BTreeMap<String, Histogram>>,
}

impl FallbackTable {
    /// Operator the shapes were taken from.
    pub fn source(&self) -> Option<&OperatorKey> {
        self.source.as_ref()
    }

    /// Variable -> histogram for `model`.
    pub fn variables(&self, model: &str) -> Option<&BTreeMap<String, Histogram>> {
        self.shapes.get(model)
    }

    /// Reference histogram for (`model`, `variable`).
    pub fn get(&self, model: &str, variable: &str) -> Option<&Histogram> {
        self.shapes.get(model)?.get(variable)
    }

    /// Insert a shape.
    pub fn insert(&mut self, model: &str, variable: &str, histogram: Histogram) {
        self.shapes.entry(model.to_string()).or_default().insert(variable.to_string(), histogram);
    }
}

/// Build the fallback table from the lexicographically smallest minority operator.
///
/// For every model the operator's container is opened, every variable under the
/// minority process label is enumerated and its `histo_sm` component copied out.
pub fn extract_fallback<S: HistogramStore + ?Sized>(
    store: &S,
    minority: &Partition,
    models: &[String],
) -> Result<FallbackTable> {
    let op = minority.first_key().ok_or_else(|| {
        Error::Validation(format!(
            "minority partition '{}' is empty, no SM reference available",
            minority.label()
        ))
    })?;
    let label = process_label(minority.label(), op);

    let mut table = FallbackTable { source: Some(op.clone()), shapes: BTreeMap::new() };
    for model in models {
        let container = store.open(minority.file(op, model)?)?;
        for var in container.list_children(&label)? {
            let h = container.get_histogram(&format!("{label}/{var}/{NOMINAL_COMPONENT}"))?;
            table.insert(model, &var, h);
        }
        tracing::debug!(
            op = %op,
            model = model.as_str(),
            variables = table.variables(model).map_or(0, BTreeMap::len),
            "fallback shapes extracted"
        );
    }
    Ok(table)
}
