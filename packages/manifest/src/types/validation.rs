use crate::ShellDescriptor;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, JsonSchema, Serialize, Deserialize)]
pub enum ValidationLevel {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, JsonSchema, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub level: ValidationLevel,
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, JsonSchema, Serialize, Deserialize)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.push(ValidationLevel::Error, field, message);
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.push(ValidationLevel::Warning, field, message);
    }

    pub fn add_info(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.push(ValidationLevel::Info, field, message);
    }

    fn push(&mut self, level: ValidationLevel, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            level,
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.level == ValidationLevel::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.level == ValidationLevel::Warning)
    }
}

pub struct DescriptorValidator;

impl DescriptorValidator {
    pub fn validate(descriptor: &ShellDescriptor) -> ValidationResult {
        let mut result = ValidationResult::new();

        Self::validate_shell(descriptor, &mut result);
        Self::validate_inputs(descriptor, &mut result);
        Self::validate_policy(descriptor, &mut result);
        Self::validate_groups(descriptor, &mut result);

        result
    }

    fn validate_shell(descriptor: &ShellDescriptor, result: &mut ValidationResult) {
        if descriptor.shell.name.is_empty() {
            result.add_error("shell.name", "Environment name must not be empty");
        }

        if descriptor.shell.packages.is_empty() {
            result.add_error(
                "shell.packages",
                "At least one package identifier is required",
            );
        }

        if descriptor.description.is_empty() {
            result.add_warning(
                "description",
                "RECOMMENDED: Add a 'description' so consumers know what this shell is for",
            );
        }

        let mut seen = BTreeSet::new();
        for package in &descriptor.shell.packages {
            if !seen.insert(package.as_str()) {
                result.add_info(
                    "shell.packages",
                    format!("Duplicate package '{}' collapses to a single entry", package),
                );
            }
        }
    }

    fn validate_inputs(descriptor: &ShellDescriptor, result: &mut ValidationResult) {
        for (name, input) in &descriptor.inputs {
            if input.coordinate().is_empty() {
                result.add_error(
                    format!("inputs.{}", name),
                    "Input coordinate must not be empty",
                );
            }

            if let Some(target) = input.follows() {
                if !descriptor.inputs.contains_key(target) {
                    result.add_error(
                        format!("inputs.{}.follows", name),
                        format!("Input follows undeclared input '{}'", target),
                    );
                }
            }
        }
    }

    fn validate_policy(descriptor: &ShellDescriptor, result: &mut ValidationResult) {
        for identifier in &descriptor.policy.permitted_insecure_packages {
            if identifier.is_empty() {
                result.add_error(
                    "policy.permitted_insecure_packages",
                    "Insecure-package identifiers must not be empty",
                );
            }
        }

        for package in descriptor.policy.accept_licenses.keys() {
            if package.is_empty() {
                result.add_error(
                    "policy.accept_licenses",
                    "License acceptance keys must name a package",
                );
            }
        }
    }

    fn validate_groups(descriptor: &ShellDescriptor, result: &mut ValidationResult) {
        for (name, entries) in &descriptor.groups {
            if entries.is_empty() {
                result.add_warning(
                    format!("groups.{}", name),
                    format!("Tool group '{}' has no entries", name),
                );
            }

            for entry in entries {
                if let Some(target) = entry.included_group() {
                    if !descriptor.groups.contains_key(target) && target != "default" {
                        result.add_error(
                            format!("groups.{}", name),
                            format!(
                                "Group '{}' includes non-existent group '{}'",
                                name, target
                            ),
                        );
                    }
                }
            }
        }
    }
}
