//! 1D histogram object: bin contents, per-bin variances and in-place addition.

use hm_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Relative tolerance used when comparing bin edges of two histograms.
const EDGE_RTOL: f64 = 1e-9;

/// A 1D histogram stored in a combination container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Display name. Independent of the key the histogram is written under.
    pub name: String,
    /// Histogram title.
    #[serde(default)]
    pub title: String,
    /// Number of bins (excluding under/overflow).
    pub n_bins: usize,
    /// Lower edge of first bin.
    pub x_min: f64,
    /// Upper edge of last bin.
    pub x_max: f64,
    /// Bin edges (length = n_bins + 1).
    pub bin_edges: Vec<f64>,
    /// Bin contents (length = n_bins).
    pub bin_content: Vec<f64>,
    /// Sum of weights squared per bin, if stored. Absent means Poisson errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sumw2: Option<Vec<f64>>,
    /// Total number of entries.
    #[serde(default)]
    pub entries: f64,
}

impl Histogram {
    /// Histogram with explicit bin edges and contents.
    pub fn new(name: impl Into<String>, bin_edges: Vec<f64>, bin_content: Vec<f64>) -> Result<Self> {
        if bin_edges.len() < 2 {
            return Err(Error::Validation(format!(
                "histogram needs at least 2 bin edges, got {}",
                bin_edges.len()
            )));
        }
        let n_bins = bin_edges.len() - 1;
        let entries = bin_content.iter().sum();
        let h = Histogram {
            name: name.into(),
            title: String::new(),
            n_bins,
            x_min: bin_edges[0],
            x_max: bin_edges[n_bins],
            bin_edges,
            bin_content,
            sumw2: None,
            entries,
        };
        h.validate()?;
        Ok(h)
    }

    /// Histogram with `n_bins` uniform bins on `[x_min, x_max]`.
    pub fn uniform(
        name: impl Into<String>,
        n_bins: usize,
        x_min: f64,
        x_max: f64,
        bin_content: Vec<f64>,
    ) -> Result<Self> {
        if n_bins == 0 {
            return Err(Error::Validation("histogram needs at least one bin".into()));
        }
        let width = (x_max - x_min) / n_bins as f64;
        let bin_edges = (0..=n_bins).map(|i| x_min + i as f64 * width).collect();
        Self::new(name, bin_edges, bin_content)
    }

    /// Attach per-bin sum of squared weights.
    pub fn with_sumw2(mut self, sumw2: Vec<f64>) -> Result<Self> {
        self.sumw2 = Some(sumw2);
        self.validate()?;
        Ok(self)
    }

    /// Check internal consistency (lengths, monotonic edges, axis range).
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(Error::Validation(format!("histogram '{}': {msg}", self.name)));
        if self.bin_edges.len() != self.n_bins + 1 {
            return fail(format!("{} bin edges for {} bins", self.bin_edges.len(), self.n_bins));
        }
        if self.bin_content.len() != self.n_bins {
            return fail(format!("{} bin contents for {} bins", self.bin_content.len(), self.n_bins));
        }
        if let Some(sw2) = &self.sumw2
            && sw2.len() != self.n_bins
        {
            return fail(format!("{} sumw2 entries for {} bins", sw2.len(), self.n_bins));
        }
        if self.bin_edges.windows(2).any(|w| !(w[0] < w[1])) {
            return fail("bin edges are not strictly increasing".into());
        }
        if self.bin_edges[0] != self.x_min || self.bin_edges[self.n_bins] != self.x_max {
            return fail("axis range disagrees with bin edges".into());
        }
        Ok(())
    }

    /// Per-bin variance: `sumw2` if stored, bin content otherwise.
    pub fn variances(&self) -> Vec<f64> {
        match &self.sumw2 {
            Some(sw2) => sw2.clone(),
            None => self.bin_content.clone(),
        }
    }

    /// Per-bin statistical uncertainty.
    pub fn uncertainties(&self) -> Vec<f64> {
        self.variances().into_iter().map(|v| v.max(0.0).sqrt()).collect()
    }

    /// Sum of bin contents (excluding under/overflow).
    pub fn integral(&self) -> f64 {
        self.bin_content.iter().sum()
    }

    /// Whether `other` has the same binning as `self`.
    pub fn same_binning(&self, other: &Histogram) -> bool {
        self.n_bins == other.n_bins
            && self.bin_edges.iter().zip(&other.bin_edges).all(|(a, b)| {
                (a - b).abs() <= EDGE_RTOL * a.abs().max(b.abs()).max(1.0)
            })
    }

    /// Add `other` bin by bin into `self`.
    ///
    /// Contents and entries add; variances add, with a missing `sumw2` on either
    /// side taken as its bin content. `sumw2` is only materialized when one of the
    /// operands stores it, so the operation is commutative.
    pub fn add(&mut self, other: &Histogram) -> Result<()> {
        if !self.same_binning(other) {
            return Err(Error::BinningMismatch(format!(
                "'{}' has {} bins on [{}, {}], '{}' has {} bins on [{}, {}]",
                self.name,
                self.n_bins,
                self.x_min,
                self.x_max,
                other.name,
                other.n_bins,
                other.x_min,
                other.x_max
            )));
        }

        if self.sumw2.is_some() || other.sumw2.is_some() {
            let summed = self
                .variances()
                .iter()
                .zip(other.variances())
                .map(|(a, b)| a + b)
                .collect();
            self.sumw2 = Some(summed);
        }
        for (a, b) in self.bin_content.iter_mut().zip(&other.bin_content) {
            *a += b;
        }
        self.entries += other.entries;
        Ok(())
    }
}
