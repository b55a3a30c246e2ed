use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::Command;

use crate::core::error::CliError;
use shell_engine::{evaluate_descriptor, Platform, SnapshotRegistry};

#[derive(Parser, Debug)]
pub struct ShellCommand {
    /// Path to the shell descriptor (discovered in the current directory by default)
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,
}

impl ShellCommand {
    pub fn execute(self) -> Result<()> {
        let (_, descriptor) = super::load_descriptor(self.manifest.as_deref())?;

        let platform = Platform::current()
            .context("Current platform is not in the supported platform set")?;

        let registry = SnapshotRegistry::bundled();
        let evaluation = evaluate_descriptor(&descriptor, &registry, &[platform])
            .map_err(CliError::Eval)?;
        let record = evaluation
            .records
            .first()
            .context("Evaluation produced no environment record")?;

        let packages: Vec<&str> = record.packages.iter().map(|p| p.name.as_str()).collect();

        println!(
            "{} Activating {} [{}] with {} package(s)...",
            console::style(">").green().bold(),
            console::style(&record.name).bold(),
            record.platform,
            packages.len()
        );

        let shell = std::env::var("SHELL").unwrap_or_else(|_| "sh".to_string());

        let mut child = Command::new(&shell)
            .env("DEVSHELL_NAME", &record.name)
            .env("DEVSHELL_PLATFORM", record.platform.as_str())
            .env("DEVSHELL_PACKAGES", packages.join(" "))
            .spawn()
            .context(format!("Failed to spawn shell: {}", shell))?;

        let status = child.wait()?;

        if status.success() {
            println!("\n{} Shell exited successfully.", console::style("ok:").green());
        } else {
            println!("\n{} Shell exited with error.", console::style("err:").red());
        }

        Ok(())
    }
}
