//! Derived-artifact toggles and the built-in descriptor generator.
//!
//! The dummy configuration is a YAML (or JSON) mapping with one `d_<kind>`
//! section per artifact kind:
//!
//! ```yaml
//! d_structure:
//!   makeDummy: true
//! d_plot:
//!   makeDummy: "False"
//!   color: 857
//! ```
//!
//! Sections not starting with `d_` are ignored.
//!
//! The INI layout of existing Latinos dummy configs is read as well:
//!
//! ```ini
//! [d_structure]
//! makeDummy = True
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use hm_core::{ArtifactGenerator, ArtifactKind, ArtifactRequest, Error, Result};
use serde::{Deserialize, Serialize};

const TOGGLE_KEY: &str = "makeDummy";

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Toggle {
    Flag(bool),
    Text(String),
}

impl Toggle {
    fn enabled(&self, section: &str) -> Result<bool> {
        match self {
            Toggle::Flag(b) => Ok(*b),
            Toggle::Text(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Toggle::Text(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            Toggle::Text(s) => Err(Error::Validation(format!(
                "{section}.{TOGGLE_KEY}: expected true/false, got '{s}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Section {
    enabled: bool,
    settings: serde_json::Value,
}

/// Toggle table: which artifact kinds are generated, plus their free-form settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DummyConfig {
    sections: BTreeMap<ArtifactKind, Section>,
}

impl DummyConfig {
    /// Configuration with every kind disabled.
    pub const EMPTY: DummyConfig = DummyConfig { sections: BTreeMap::new() };

    /// Read a dummy configuration.
    ///
    /// `.json` files are parsed as JSON and `.yaml`/`.yml` as YAML. Any other file is
    /// read as INI when it opens with a `[section]` header, as YAML otherwise.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).map_err(|source| Error::IoAt { path: path.to_path_buf(), source })?;
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_ascii_lowercase();
        let raw: BTreeMap<String, serde_json::Value> = match ext.as_str() {
            "json" => serde_json::from_slice(&bytes)?,
            "yaml" | "yml" => serde_yaml_ng::from_slice(&bytes)?,
            _ => {
                let text = String::from_utf8_lossy(&bytes);
                if looks_like_ini(&text) { parse_ini(&text)? } else { serde_yaml_ng::from_str(&text)? }
            }
        };
        Self::from_sections(raw)
    }

    /// Parse an INI document (`[d_<kind>]` sections of `key = value` lines).
    pub fn from_ini_str(text: &str) -> Result<Self> {
        Self::from_sections(parse_ini(text)?)
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Self::from_sections(serde_yaml_ng::from_str(text)?)
    }

    fn from_sections(raw: BTreeMap<String, serde_json::Value>) -> Result<Self> {
        let mut sections = BTreeMap::new();
        for kind in ArtifactKind::ALL {
            let name = kind.section();
            let Some(value) = raw.get(&name) else { continue };
            let mut settings = match value {
                serde_json::Value::Object(map) => map.clone(),
                serde_json::Value::Null => serde_json::Map::new(),
                other => {
                    return Err(Error::Validation(format!(
                        "section {name} must be a mapping, got {other}"
                    )));
                }
            };
            let enabled = match settings.remove(TOGGLE_KEY) {
                Some(v) => serde_json::from_value::<Toggle>(v)?.enabled(&name)?,
                None => false,
            };
            sections.insert(kind, Section { enabled, settings: serde_json::Value::Object(settings) });
        }
        Ok(Self { sections })
    }

    /// Whether artifacts of `kind` are generated.
    pub fn enabled(&self, kind: ArtifactKind) -> bool {
        self.sections.get(&kind).is_some_and(|s| s.enabled)
    }

    /// Enabled kinds, in invocation order.
    pub fn enabled_kinds(&self) -> Vec<ArtifactKind> {
        ArtifactKind::ALL.into_iter().filter(|k| self.enabled(*k)).collect()
    }

    /// Settings of `kind`'s section (without the toggle); `null` if the section is absent.
    pub fn settings(&self, kind: ArtifactKind) -> &serde_json::Value {
        static NULL: serde_json::Value = serde_json::Value::Null;
        self.sections.get(&kind).map_or(&NULL, |s| &s.settings)
    }
}

fn significant_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter(|(_, line)| {
        let t = line.trim();
        !t.is_empty() && !t.starts_with('#') && !t.starts_with(';')
    })
}

fn looks_like_ini(text: &str) -> bool {
    significant_lines(text).next().is_some_and(|(_, line)| {
        let t = line.trim();
        t.starts_with('[') && t.ends_with(']') && !t.contains(',')
    })
}

/// Sections of `key = value` (or `key: value`) lines. Keys are case-insensitive,
/// values stay strings, indented lines continue the previous value.
fn parse_ini(text: &str) -> Result<BTreeMap<String, serde_json::Value>> {
    let mut sections: BTreeMap<String, serde_json::Map<String, serde_json::Value>> = BTreeMap::new();
    let mut current: Option<String> = None;
    let mut last_key: Option<String> = None;

    for (idx, line) in significant_lines(text) {
        let lineno = idx + 1;
        let trimmed = line.trim();
        if let Some(name) = trimmed.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            let name = name.trim().to_string();
            if sections.insert(name.clone(), serde_json::Map::new()).is_some() {
                return Err(Error::Validation(format!("line {lineno}: duplicate section [{name}]")));
            }
            current = Some(name);
            last_key = None;
            continue;
        }
        let Some(name) = &current else {
            return Err(Error::Validation(format!("line {lineno}: entry outside of a section")));
        };
        let Some(section) = sections.get_mut(name) else {
            return Err(Error::Validation(format!("line {lineno}: entry outside of a section")));
        };
        if line.starts_with(char::is_whitespace)
            && let Some(key) = &last_key
            && let Some(serde_json::Value::String(value)) = section.get_mut(key)
        {
            value.push('\n');
            value.push_str(trimmed);
            continue;
        }
        let Some((key, value)) = trimmed.split_once(['=', ':']) else {
            return Err(Error::Validation(format!("line {lineno}: expected `key = value`, got '{trimmed}'")));
        };
        let key = key.trim();
        let key =
            if key.eq_ignore_ascii_case(TOGGLE_KEY) { TOGGLE_KEY.to_string() } else { key.to_lowercase() };
        section.insert(key.clone(), serde_json::Value::String(value.trim().to_string()));
        last_key = Some(key);
    }

    Ok(sections.into_iter().map(|(name, map)| (name, serde_json::Value::Object(map))).collect())
}

#[derive(Serialize)]
struct Descriptor<'a> {
    kind: &'static str,
    model: &'a str,
    samples: BTreeMap<&'a str, SampleDescriptor<'a>>,
    variables: &'a [String],
    settings: &'a serde_json::Value,
}

#[derive(Serialize)]
struct SampleDescriptor<'a> {
    components: &'a [String],
}

/// Writes one `<kind>.json` descriptor into each output directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorGenerator;

impl ArtifactGenerator for DescriptorGenerator {
    fn name(&self) -> &str {
        "descriptor"
    }

    fn generate(&self, kind: ArtifactKind, request: &ArtifactRequest<'_>) -> Result<()> {
        let descriptor = Descriptor {
            kind: kind.name(),
            model: request.model,
            samples: [(request.sample, SampleDescriptor { components: request.components })]
                .into_iter()
                .collect(),
            variables: request.variables,
            settings: request.settings,
        };
        let path = request.out_path.join(format!("{}.json", kind.name()));
        let bytes = serde_json::to_vec_pretty(&descriptor)?;
        fs::write(&path, bytes).map_err(|source| Error::IoAt { path, source })
    }
}
