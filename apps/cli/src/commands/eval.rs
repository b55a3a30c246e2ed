use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::core::error::CliError;
use shell_engine::{evaluate_descriptor, Platform, SnapshotRegistry};

#[derive(Parser, Debug)]
pub struct EvalCommand {
    /// Path to the shell descriptor (discovered in the current directory by default)
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,

    /// Platforms to evaluate (defaults to the full supported set)
    #[arg(long, short)]
    pub platform: Vec<Platform>,

    /// Emit the evaluation as JSON instead of human-readable output
    #[arg(long)]
    pub json: bool,
}

impl EvalCommand {
    pub fn execute(self) -> Result<()> {
        let (path, descriptor) = super::load_descriptor(self.manifest.as_deref())?;

        let validation = descriptor.validate();
        if validation.has_errors() {
            let summary: Vec<String> = validation
                .issues
                .iter()
                .map(|i| format!("{}: {}", i.field, i.message))
                .collect();
            return Err(CliError::Descriptor(summary.join("; ")).into());
        }

        let platforms = if self.platform.is_empty() {
            Platform::ALL.to_vec()
        } else {
            self.platform.clone()
        };

        let registry = SnapshotRegistry::bundled();
        let evaluation =
            evaluate_descriptor(&descriptor, &registry, &platforms).map_err(CliError::Eval)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&evaluation)?);
            return Ok(());
        }

        cliclack::intro(format!(
            "{} {}",
            console::style("devshell-architect").bold(),
            console::style(env!("CARGO_PKG_VERSION")).dim()
        ))?;

        cliclack::log::info(format!("Descriptor: {}", path.display()))?;

        for (name, pin) in &evaluation.inputs {
            cliclack::log::info(format!("Pinned {} -> {}", name, pin))?;
        }

        for record in &evaluation.records {
            let packages: Vec<String> = record
                .packages
                .iter()
                .map(|p| format!("{}@{}", p.name, p.version))
                .collect();
            cliclack::log::success(format!(
                "{} [{}]: {}",
                console::style(&record.name).bold(),
                record.platform,
                packages.join(", ")
            ))?;
        }

        cliclack::outro(format!(
            "{} environment record(s) materialized.",
            evaluation.records.len()
        ))?;

        Ok(())
    }
}
