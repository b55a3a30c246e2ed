//! End-to-end checks of the reference `ng-master-app` descriptor against
//! the bundled registry snapshot.

use pretty_assertions::assert_eq;
use shell_engine::{evaluate_descriptor, EvalError, Platform, SnapshotRegistry};
use shell_manifest::ShellDescriptor;
use std::collections::BTreeSet;

const REFERENCE: &str = r#"
    description = "Reproducible development shell for the ng-master-app workspace."

    [inputs]
    nixpkgs = "github:NixOS/nixpkgs/nixos-unstable"
    flake-utils = "github:numtide/flake-utils"

    [policy]
    allow_unfree = true
    permitted_insecure_packages = ["segger-jlink-qt4-810"]

    [policy.accept_licenses]
    segger-jlink = true

    [shell]
    name = "ng-master-app"
    packages = ["basedpyright", "just", "python312", "ruff", "trivy", "uv"]
"#;

fn reference() -> ShellDescriptor {
    toml::from_str(REFERENCE).unwrap()
}

#[test]
fn one_record_per_platform_named_ng_master_app() {
    let evaluation =
        evaluate_descriptor(&reference(), &SnapshotRegistry::bundled(), &Platform::ALL).unwrap();

    assert_eq!(evaluation.records.len(), Platform::ALL.len());
    for record in &evaluation.records {
        assert_eq!(record.name, "ng-master-app");
    }
}

#[test]
fn package_set_is_identical_across_platforms() {
    let evaluation =
        evaluate_descriptor(&reference(), &SnapshotRegistry::bundled(), &Platform::ALL).unwrap();

    let expected: BTreeSet<&str> = ["basedpyright", "just", "python312", "ruff", "trivy", "uv"]
        .into_iter()
        .collect();

    for record in &evaluation.records {
        let names: BTreeSet<&str> = record.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, expected);
    }
}

#[test]
fn evaluation_is_idempotent() {
    let descriptor = reference();
    let registry = SnapshotRegistry::bundled();

    let first = evaluate_descriptor(&descriptor, &registry, &Platform::ALL).unwrap();
    let second = evaluate_descriptor(&descriptor, &registry, &Platform::ALL).unwrap();

    assert_eq!(
        serde_json::to_vec(&first.records).unwrap(),
        serde_json::to_vec(&second.records).unwrap()
    );
}

#[test]
fn allow_unfree_does_not_change_the_package_set() {
    let mut permissive = reference();
    permissive.policy.allow_unfree = true;
    let mut strict = reference();
    strict.policy.allow_unfree = false;

    let registry = SnapshotRegistry::bundled();
    let a = evaluate_descriptor(&permissive, &registry, &Platform::ALL).unwrap();
    let b = evaluate_descriptor(&strict, &registry, &Platform::ALL).unwrap();

    assert_eq!(a.records, b.records);
}

#[test]
fn only_the_permitted_insecure_identifier_escapes_refusal() {
    let registry = SnapshotRegistry::bundled();

    let mut with_permitted = reference();
    with_permitted
        .shell
        .packages
        .push("segger-jlink".to_string());
    let result = evaluate_descriptor(&with_permitted, &registry, &[Platform::X86_64Linux]);
    assert!(result.is_ok(), "permitted insecure package must resolve");

    let mut with_other = reference();
    with_other.shell.packages.push("openssl_1_1".to_string());
    let err = evaluate_descriptor(&with_other, &registry, &[Platform::X86_64Linux]).unwrap_err();
    assert!(matches!(err, EvalError::InsecurePackage { .. }));
}

#[test]
fn corrupted_input_fails_before_any_record_is_produced() {
    let mut descriptor = reference();
    descriptor.inputs.insert(
        "nixpkgs".to_string(),
        shell_manifest::InputRef::Simple("not-a-coordinate".to_string()),
    );

    let err =
        evaluate_descriptor(&descriptor, &SnapshotRegistry::bundled(), &Platform::ALL).unwrap_err();
    assert!(matches!(err, EvalError::UnresolvableInput { .. }));
}
