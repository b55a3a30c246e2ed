pub mod types;
pub use types::*;

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Descriptor filenames, in discovery-precedence order.
pub const DESCRIPTOR_CANDIDATES: [&str; 3] = ["shell.toml", "shell.json", "shell.yaml"];

/// Declarative dev-shell descriptor with multi-format support (TOML, JSON, YAML).
///
/// The descriptor performs no resolution itself; it only declares where
/// supporting inputs come from, which policy overrides apply, and the exact
/// set of package identifiers to expose in the resulting shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ShellDescriptor {
    /// Free-text description of the environment.
    #[serde(default)]
    pub description: String,

    /// External dependency sources, keyed by logical name.
    #[serde(default)]
    pub inputs: BTreeMap<String, InputRef>,

    /// Policy overrides applied uniformly to the whole descriptor.
    #[serde(default, alias = "config")]
    pub policy: PolicyFlags,

    /// The shell environment to materialize.
    pub shell: ShellDef,

    /// Named tool groups for bulk installation.
    #[serde(default)]
    pub groups: BTreeMap<String, Vec<GroupEntry>>,
}

impl ShellDescriptor {
    /// Loads a descriptor from a specific path, detecting format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read descriptor file: {:?}", path))?;

        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match ext {
            "toml" => toml::from_str(&content).with_context(|| "Failed to parse TOML descriptor"),
            "json" => {
                serde_json::from_str(&content).with_context(|| "Failed to parse JSON descriptor")
            }
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).with_context(|| "Failed to parse YAML descriptor")
            }
            _ => anyhow::bail!("Unsupported descriptor format: {}", ext),
        }
    }

    /// Finds and loads a descriptor following the discovery precedence rules.
    pub fn find_and_load(start_dir: &Path) -> Result<(PathBuf, Self)> {
        for filename in DESCRIPTOR_CANDIDATES {
            let path = start_dir.join(filename);
            if path.exists() {
                return Self::load(&path).map(|d| (path, d));
            }
        }

        anyhow::bail!(
            "No shell descriptor (shell.toml) found in {:?}",
            start_dir
        )
    }

    /// Structural validation of the descriptor.
    pub fn validate(&self) -> ValidationResult {
        DescriptorValidator::validate(self)
    }
}
