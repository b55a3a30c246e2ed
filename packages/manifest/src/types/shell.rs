use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The shell environment to materialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ShellDef {
    /// Name of the environment (e.g., `ng-master-app`).
    pub name: String,

    /// Package identifiers to expose in the resulting shell.
    /// Duplicates collapse; order is irrelevant.
    #[serde(default)]
    pub packages: Vec<String>,
}

impl ShellDef {
    /// The requested package identifiers with duplicates collapsed.
    pub fn package_set(&self) -> BTreeSet<&str> {
        self.packages.iter().map(String::as_str).collect()
    }
}
