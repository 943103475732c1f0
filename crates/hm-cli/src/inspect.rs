use std::path::PathBuf;

use anyhow::{Context, Result};
use hm_store::{Container, HistogramStore, JsonStore};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct HistogramSummary {
    path: String,
    name: String,
    n_bins: usize,
    x_min: f64,
    x_max: f64,
    integral: f64,
    has_sumw2: bool,
}

fn summarize(container: &Container) -> Vec<HistogramSummary> {
    container
        .histograms()
        .into_iter()
        .map(|(path, h)| HistogramSummary {
            path,
            name: h.name.clone(),
            n_bins: h.n_bins,
            x_min: h.x_min,
            x_max: h.x_max,
            integral: h.integral(),
            has_sumw2: h.sumw2.is_some(),
        })
        .collect()
}

pub(crate) fn cmd_inspect(input: &PathBuf, output: Option<&PathBuf>) -> Result<()> {
    tracing::info!(path = %input.display(), "opening container");
    let container =
        JsonStore.open(input).with_context(|| format!("opening {}", input.display()))?;

    let output_json = serde_json::json!({
        "input": input.display().to_string(),
        "histograms": summarize(&container),
    });
    let text = serde_json::to_string_pretty(&output_json)?;
    if let Some(path) = output {
        std::fs::write(path, text)
            .with_context(|| format!("writing summary {}", path.display()))?;
    } else {
        println!("{text}");
    }
    Ok(())
}
