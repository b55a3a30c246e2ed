use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Policy overrides that relax default safety or licensing restrictions
/// during package resolution.
///
/// Flags apply uniformly to the whole descriptor; there is no per-package
/// override mechanism.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
pub struct PolicyFlags {
    /// Make unfree-licensed packages eligible for resolution.
    #[serde(default, alias = "allowUnfree")]
    pub allow_unfree: bool,

    /// Known-insecure package identifiers that may still resolve.
    /// Entries carry the upstream pinned-version suffix and are matched
    /// exactly (e.g., `segger-jlink-qt4-810`).
    #[serde(default, alias = "permittedInsecurePackages")]
    pub permitted_insecure_packages: BTreeSet<String>,

    /// Per-package license acceptance (`<package>.acceptLicense` style flags).
    #[serde(default, alias = "acceptLicenses")]
    pub accept_licenses: BTreeMap<String, bool>,
}

impl PolicyFlags {
    /// Whether the given insecure-package identifier is allowed to resolve.
    pub fn permits_insecure(&self, identifier: &str) -> bool {
        self.permitted_insecure_packages.contains(identifier)
    }

    /// Whether the license of the named package has been accepted.
    pub fn license_accepted(&self, package: &str) -> bool {
        self.accept_licenses.get(package).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults() {
        let flags: PolicyFlags = serde_json::from_str("{}").unwrap();
        assert!(!flags.allow_unfree);
        assert!(flags.permitted_insecure_packages.is_empty());
        assert!(!flags.license_accepted("segger-jlink"));
    }

    #[test]
    fn test_policy_camel_case_aliases() {
        let json = r#"{
            "allowUnfree": true,
            "permittedInsecurePackages": ["segger-jlink-qt4-810"]
        }"#;
        let flags: PolicyFlags = serde_json::from_str(json).unwrap();
        assert!(flags.allow_unfree);
        assert!(flags.permits_insecure("segger-jlink-qt4-810"));
        assert!(!flags.permits_insecure("openssl-1.1.1w"));
    }
}
