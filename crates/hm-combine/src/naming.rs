//! On-disk naming conventions shared by inputs and outputs.
//!
//! ```text
//! <base>/<prefix>_<op>/<model>/rootFile/histos.json
//!     <channel>_<op>/<variable>/histo_<component>
//! ```

use std::path::{Path, PathBuf};

use hm_core::OperatorKey;

/// Directory holding the container inside each model directory.
pub const CONTAINER_DIR: &str = "rootFile";
/// Container file name.
pub const CONTAINER_FILE: &str = "histos.json";
/// Prefix carried by every component key.
pub const COMPONENT_PREFIX: &str = "histo_";
/// Component holding the operator-independent SM shape.
pub const NOMINAL_COMPONENT: &str = "histo_sm";
/// Default folder prefix for inputs and outputs.
pub const DEFAULT_FOLDER_PREFIX: &str = "to_Latinos";

/// Container path for one model below an operator folder.
pub fn container_path(op_dir: &Path, model: &str) -> PathBuf {
    op_dir.join(model).join(CONTAINER_DIR).join(CONTAINER_FILE)
}

/// Channel name encoded as the last `_` token of a folder prefix
/// (`to_Latinos_SSWW` -> `SSWW`).
pub fn channel_from_prefix(prefix: &str) -> &str {
    prefix.rsplit('_').next().unwrap_or(prefix)
}

/// Top-level directory of an operator inside a container.
pub fn process_label(process: &str, op: &OperatorKey) -> String {
    format!("{process}_{op}")
}

/// Component key for the appended fallback shape. Never collides with the
/// combine-model components (`sm`, `lin_*`, `quad_*`, ...).
pub fn fallback_component(minority_label: &str) -> String {
    format!("{COMPONENT_PREFIX}QCD_{minority_label}")
}

/// Component name as listed for downstream generators (`histo_sm` -> `sm`).
pub fn strip_component_prefix(key: &str) -> &str {
    key.strip_prefix(COMPONENT_PREFIX).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_is_last_prefix_token() {
        assert_eq!(channel_from_prefix("to_Latinos_SSWW"), "SSWW");
        assert_eq!(channel_from_prefix("to_Latinos"), "Latinos");
        assert_eq!(channel_from_prefix("plain"), "plain");
    }

    #[test]
    fn container_path_layout() {
        let p = container_path(Path::new("/in/to_Latinos_cW"), "EFTNeg");
        assert_eq!(p, PathBuf::from("/in/to_Latinos_cW/EFTNeg/rootFile/histos.json"));
    }

    #[test]
    fn fallback_component_is_prefixed() {
        assert_eq!(fallback_component("OSWWQCD"), "histo_QCD_OSWWQCD");
        assert_eq!(strip_component_prefix("histo_QCD_OSWWQCD"), "QCD_OSWWQCD");
        assert_eq!(strip_component_prefix("weird"), "weird");
    }
}
