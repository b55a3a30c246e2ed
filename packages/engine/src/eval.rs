use crate::error::EvalError;
use crate::inputs::{resolve_inputs, PinnedInput};
use crate::platform::Platform;
use crate::registry::{PackageHandle, PackageMeta, PackageRegistry};
use serde::Serialize;
use shell_manifest::{GroupEntry, PolicyFlags, ShellDescriptor};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// The per-platform output artifact: a name plus a de-duplicated,
/// order-irrelevant set of resolved package handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentRecord {
    pub name: String,
    pub platform: Platform,
    pub packages: BTreeSet<PackageHandle>,
}

/// Result of evaluating a full descriptor: pinned inputs plus one
/// environment record per requested platform.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub inputs: BTreeMap<String, PinnedInput>,
    pub records: Vec<EnvironmentRecord>,
}

/// A flattened tool from a group: the package spec to install plus the
/// dependencies it is installed with.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ToolSpec {
    pub name: String,
    pub dependencies: Vec<String>,
}

fn check_policy(policy: &PolicyFlags) -> Result<(), EvalError> {
    if policy
        .permitted_insecure_packages
        .iter()
        .any(String::is_empty)
    {
        return Err(EvalError::InvalidPolicyValue {
            flag: "permitted_insecure_packages",
            reason: "identifiers must be non-empty strings".to_string(),
        });
    }

    if policy.accept_licenses.keys().any(String::is_empty) {
        return Err(EvalError::InvalidPolicyValue {
            flag: "accept_licenses",
            reason: "keys must name a package".to_string(),
        });
    }

    Ok(())
}

fn admit(name: &str, meta: &PackageMeta, policy: &PolicyFlags) -> Result<(), EvalError> {
    if meta.unfree && !policy.allow_unfree {
        return Err(EvalError::UnfreePackage {
            name: name.to_string(),
        });
    }

    if let Some(identifier) = &meta.insecure_id {
        if !policy.permits_insecure(identifier) {
            return Err(EvalError::InsecurePackage {
                name: name.to_string(),
                identifier: identifier.clone(),
            });
        }
    }

    if meta.license_gated && !policy.license_accepted(name) {
        return Err(EvalError::LicenseNotAccepted {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// Materializes one environment record for one platform.
///
/// Pure, single-pass transform: the policy travels with the call, the
/// registry is consulted read-only, and nothing is mutated. Evaluating the
/// same descriptor twice against the same snapshot yields identical records.
pub fn evaluate(
    descriptor: &ShellDescriptor,
    policy: &PolicyFlags,
    registry: &dyn PackageRegistry,
    platform: Platform,
) -> Result<EnvironmentRecord, EvalError> {
    check_policy(policy)?;

    let mut packages = BTreeSet::new();
    for name in descriptor.shell.package_set() {
        let handle = registry.resolve(name, platform)?;
        if let Some(meta) = registry.metadata(name) {
            admit(name, meta, policy)?;
        }
        packages.insert(handle);
    }

    debug!(
        environment = %descriptor.shell.name,
        platform = %platform,
        count = packages.len(),
        "materialized environment"
    );

    Ok(EnvironmentRecord {
        name: descriptor.shell.name.clone(),
        platform,
        packages,
    })
}

/// Explicit fan-out over an injectable platform list.
///
/// Each per-platform evaluation is independent; ordering between them
/// carries no meaning beyond the order of `platforms`.
pub fn evaluate_all(
    descriptor: &ShellDescriptor,
    policy: &PolicyFlags,
    registry: &dyn PackageRegistry,
    platforms: &[Platform],
) -> Result<Vec<EnvironmentRecord>, EvalError> {
    platforms
        .iter()
        .map(|platform| evaluate(descriptor, policy, registry, *platform))
        .collect()
}

/// Full pipeline: pin inputs, then materialize per platform.
///
/// Input resolution runs first so an unresolvable coordinate fails before
/// any environment record exists.
pub fn evaluate_descriptor(
    descriptor: &ShellDescriptor,
    registry: &dyn PackageRegistry,
    platforms: &[Platform],
) -> Result<Evaluation, EvalError> {
    let inputs = resolve_inputs(&descriptor.inputs)?;
    let records = evaluate_all(descriptor, &descriptor.policy, registry, platforms)?;

    Ok(Evaluation { inputs, records })
}

/// Flattens a named group through its includes into a de-duplicated tool set.
///
/// Each group is visited at most once, so repeated or cyclic includes
/// terminate without erroring. The `default` group falls back to the
/// descriptor's `shell.packages` when not declared explicitly.
pub fn expand_group(
    descriptor: &ShellDescriptor,
    group: &str,
) -> Result<BTreeSet<ToolSpec>, EvalError> {
    let mut tools = BTreeSet::new();
    let mut visited = BTreeSet::new();
    accumulate(descriptor, group, &mut tools, &mut visited)?;
    Ok(tools)
}

fn accumulate(
    descriptor: &ShellDescriptor,
    group: &str,
    tools: &mut BTreeSet<ToolSpec>,
    visited: &mut BTreeSet<String>,
) -> Result<(), EvalError> {
    if !visited.insert(group.to_string()) {
        return Ok(());
    }

    if let Some(entries) = descriptor.groups.get(group) {
        for entry in entries {
            match entry {
                GroupEntry::Spec(spec) => {
                    tools.insert(ToolSpec {
                        name: spec.clone(),
                        dependencies: Vec::new(),
                    });
                }
                GroupEntry::Package(package) => {
                    tools.insert(ToolSpec {
                        name: package.name.clone(),
                        dependencies: package.dependencies.clone(),
                    });
                }
                GroupEntry::Include(include) => {
                    accumulate(descriptor, &include.include, tools, visited)?;
                }
            }
        }
        return Ok(());
    }

    if group == "default" {
        for name in descriptor.shell.package_set() {
            tools.insert(ToolSpec {
                name: name.to_string(),
                dependencies: Vec::new(),
            });
        }
        return Ok(());
    }

    Err(EvalError::UnknownGroup {
        name: group.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SnapshotRegistry;

    fn descriptor(toml: &str) -> ShellDescriptor {
        toml::from_str(toml).unwrap()
    }

    fn reference() -> ShellDescriptor {
        descriptor(
            r#"
            description = "test"

            [inputs]
            nixpkgs = "github:NixOS/nixpkgs/nixos-unstable"

            [policy]
            allow_unfree = true
            permitted_insecure_packages = ["segger-jlink-qt4-810"]

            [shell]
            name = "ng-master-app"
            packages = ["basedpyright", "just", "python312", "ruff", "trivy", "uv"]
            "#,
        )
    }

    #[test]
    fn test_unknown_package_is_fatal() {
        let mut desc = reference();
        desc.shell.packages.push("basedpyleft".to_string());

        let err = evaluate(
            &desc,
            &desc.policy,
            &SnapshotRegistry::bundled(),
            Platform::X86_64Linux,
        )
        .unwrap_err();

        assert!(matches!(err, EvalError::UnknownPackage { .. }));
    }

    #[test]
    fn test_unfree_refused_without_flag() {
        let mut desc = reference();
        desc.policy.allow_unfree = false;
        desc.shell.packages = vec!["vscode".to_string()];

        let err = evaluate(
            &desc,
            &desc.policy,
            &SnapshotRegistry::bundled(),
            Platform::X86_64Linux,
        )
        .unwrap_err();

        assert!(matches!(err, EvalError::UnfreePackage { .. }));
    }

    #[test]
    fn test_insecure_refused_unless_permitted() {
        let mut desc = reference();
        desc.shell.packages = vec!["openssl_1_1".to_string()];

        let err = evaluate(
            &desc,
            &desc.policy,
            &SnapshotRegistry::bundled(),
            Platform::X86_64Linux,
        )
        .unwrap_err();

        assert!(matches!(err, EvalError::InsecurePackage { .. }));

        desc.policy
            .permitted_insecure_packages
            .insert("openssl-1.1.1w".to_string());
        assert!(evaluate(
            &desc,
            &desc.policy,
            &SnapshotRegistry::bundled(),
            Platform::X86_64Linux,
        )
        .is_ok());
    }

    #[test]
    fn test_license_gate() {
        let mut desc = reference();
        desc.shell.packages = vec!["segger-jlink".to_string()];

        let err = evaluate(
            &desc,
            &desc.policy,
            &SnapshotRegistry::bundled(),
            Platform::X86_64Linux,
        )
        .unwrap_err();
        assert!(matches!(err, EvalError::LicenseNotAccepted { .. }));

        desc.policy
            .accept_licenses
            .insert("segger-jlink".to_string(), true);
        assert!(evaluate(
            &desc,
            &desc.policy,
            &SnapshotRegistry::bundled(),
            Platform::X86_64Linux,
        )
        .is_ok());
    }

    #[test]
    fn test_invalid_policy_value() {
        let mut desc = reference();
        desc.policy
            .permitted_insecure_packages
            .insert(String::new());

        let err = evaluate(
            &desc,
            &desc.policy,
            &SnapshotRegistry::bundled(),
            Platform::X86_64Linux,
        )
        .unwrap_err();

        assert!(matches!(err, EvalError::InvalidPolicyValue { .. }));
    }

    #[test]
    fn test_expand_default_group_from_shell_packages() {
        let desc = reference();
        let tools = expand_group(&desc, "default").unwrap();
        assert_eq!(tools.len(), 6);
        assert!(tools.iter().all(|t| t.dependencies.is_empty()));
    }

    #[test]
    fn test_expand_group_with_includes() {
        let desc = descriptor(
            r#"
            [shell]
            name = "test"
            packages = ["uv"]

            [groups]
            debug = [
                "pyocd",
                { name = "gdbgui", dependencies = ["pyelftools<=0.25"] },
            ]
            full = [
                { include = "debug" },
                "pre-commit",
            ]
            "#,
        );

        let tools = expand_group(&desc, "full").unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["gdbgui", "pre-commit", "pyocd"]);
    }

    #[test]
    fn test_cyclic_includes_terminate() {
        let desc = descriptor(
            r#"
            [shell]
            name = "test"
            packages = ["uv"]

            [groups]
            a = [{ include = "b" }, "tool-a"]
            b = [{ include = "a" }, "tool-b"]
            "#,
        );

        let tools = expand_group(&desc, "a").unwrap();
        assert_eq!(tools.len(), 2);
    }

    #[test]
    fn test_unknown_group_is_an_error() {
        let err = expand_group(&reference(), "debug").unwrap_err();
        assert!(matches!(err, EvalError::UnknownGroup { .. }));
    }
}
