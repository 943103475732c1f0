//! Core traits for histmerge
//!
//! The combination engine never depends on concrete artifact generators:
//! it hands each written operator to an [`ArtifactGenerator`] and lets the
//! caller decide what gets produced.

use std::fmt;
use std::path::Path;

use crate::Result;

/// Kind of derived configuration artifact produced next to a combined container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    /// Sample structure (signal/background flags per component).
    Structure,
    /// Plot styling.
    Plot,
    /// Sample definitions.
    Samples,
    /// Top-level configuration.
    Configuration,
    /// Variable aliases.
    Aliases,
    /// Selection cuts.
    Cuts,
    /// Variable definitions.
    Variables,
    /// Nuisance parameters.
    Nuisances,
}

impl ArtifactKind {
    /// Every kind, in the order generators are invoked.
    pub const ALL: [ArtifactKind; 8] = [
        ArtifactKind::Structure,
        ArtifactKind::Plot,
        ArtifactKind::Samples,
        ArtifactKind::Configuration,
        ArtifactKind::Aliases,
        ArtifactKind::Cuts,
        ArtifactKind::Variables,
        ArtifactKind::Nuisances,
    ];

    /// Short name (`structure`, `plot`, ...).
    pub fn name(self) -> &'static str {
        match self {
            ArtifactKind::Structure => "structure",
            ArtifactKind::Plot => "plot",
            ArtifactKind::Samples => "samples",
            ArtifactKind::Configuration => "configuration",
            ArtifactKind::Aliases => "alias",
            ArtifactKind::Cuts => "cuts",
            ArtifactKind::Variables => "variables",
            ArtifactKind::Nuisances => "nuisances",
        }
    }

    /// Section of the dummy configuration holding this kind's toggle.
    pub fn section(self) -> String {
        format!("d_{}", self.name())
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a generator learns about one written (operator, model) output.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactRequest<'a> {
    /// Output label, `<output process>_<op>`.
    pub sample: &'a str,
    /// Final component names (without the `histo_` prefix).
    pub components: &'a [String],
    /// Variables present in the combined tree.
    pub variables: &'a [String],
    /// Model name.
    pub model: &'a str,
    /// Directory of this (operator, model) output.
    pub out_path: &'a Path,
    /// Free-form settings from this kind's configuration section.
    pub settings: &'a serde_json::Value,
}

/// Producer of derived configuration artifacts.
pub trait ArtifactGenerator: Send + Sync {
    /// Generator name, for diagnostics.
    fn name(&self) -> &str;

    /// Produce the artifact of `kind` for one combined output.
    fn generate(&self, kind: ArtifactKind, request: &ArtifactRequest<'_>) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingGenerator {
        seen: Mutex<Vec<(ArtifactKind, String)>>,
    }

    impl ArtifactGenerator for RecordingGenerator {
        fn name(&self) -> &str {
            "recording"
        }

        fn generate(&self, kind: ArtifactKind, request: &ArtifactRequest<'_>) -> Result<()> {
            self.seen.lock().unwrap().push((kind, request.sample.to_string()));
            Ok(())
        }
    }

    #[test]
    fn sections_follow_dummy_config_names() {
        assert_eq!(ArtifactKind::Structure.section(), "d_structure");
        assert_eq!(ArtifactKind::Aliases.section(), "d_alias");
        assert_eq!(ArtifactKind::ALL.len(), 8);
    }

    #[test]
    fn generator_receives_request() {
        let g = RecordingGenerator { seen: Mutex::new(Vec::new()) };
        let components = vec!["sm".to_string()];
        let variables = vec!["mjj".to_string()];
        let settings = serde_json::Value::Null;
        let req = ArtifactRequest {
            sample: "SSWW_cW",
            components: &components,
            variables: &variables,
            model: "EFT",
            out_path: Path::new("/tmp/out"),
            settings: &settings,
        };
        g.generate(ArtifactKind::Cuts, &req).unwrap();
        assert_eq!(g.seen.lock().unwrap().as_slice(), &[(ArtifactKind::Cuts, "SSWW_cW".to_string())]);
    }
}
