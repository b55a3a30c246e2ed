use anyhow::Result;
use clap::Parser;
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::core::error::CliError;
use crate::core::uv::UvDriver;
use shell_engine::{expand_group, ToolSpec};

#[derive(Parser, Debug)]
pub struct InstallCommand {
    /// Tool to install
    pub tool: String,

    /// Extra distributions installed alongside the tool
    pub dependencies: Vec<String>,

    /// Path to the project root
    #[arg(long, short)]
    pub project_root: Option<PathBuf>,
}

impl InstallCommand {
    pub fn execute(self) -> Result<()> {
        let driver = UvDriver::new(&super::project_root(self.project_root))?;
        install_one(&driver, &self.tool, &self.dependencies)
    }
}

#[derive(Parser, Debug)]
pub struct RemoveCommand {
    /// Tool to remove
    pub tool: String,

    /// Path to the project root
    #[arg(long, short)]
    pub project_root: Option<PathBuf>,
}

impl RemoveCommand {
    pub fn execute(self) -> Result<()> {
        let driver = UvDriver::new(&super::project_root(self.project_root))?;
        remove_one(&driver, &self.tool)
    }
}

#[derive(Parser, Debug)]
pub struct InstallGroupCommand {
    /// Groups to install
    #[arg(default_value = "default")]
    pub groups: Vec<String>,

    /// Path to the shell descriptor (discovered in the current directory by default)
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,

    /// Path to the project root
    #[arg(long, short)]
    pub project_root: Option<PathBuf>,
}

impl InstallGroupCommand {
    pub fn execute(self) -> Result<()> {
        let (_, descriptor) = super::load_descriptor(self.manifest.as_deref())?;
        let driver = UvDriver::new(&super::project_root(self.project_root))?;

        for tool in accumulate_tools(&descriptor, &self.groups)? {
            install_one(&driver, &tool.name, &tool.dependencies)?;
        }

        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct RemoveGroupCommand {
    /// Groups to remove
    pub groups: Vec<String>,

    /// Path to the shell descriptor (discovered in the current directory by default)
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,

    /// Path to the project root
    #[arg(long, short)]
    pub project_root: Option<PathBuf>,
}

impl RemoveGroupCommand {
    pub fn execute(self) -> Result<()> {
        let (_, descriptor) = super::load_descriptor(self.manifest.as_deref())?;
        let driver = UvDriver::new(&super::project_root(self.project_root))?;

        for tool in accumulate_tools(&descriptor, &self.groups)? {
            remove_one(&driver, &tool.name)?;
        }

        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct ListCommand {
    /// Path to the project root
    #[arg(long, short)]
    pub project_root: Option<PathBuf>,
}

impl ListCommand {
    pub fn execute(self) -> Result<()> {
        let driver = UvDriver::new(&super::project_root(self.project_root))?;

        for tool in driver.installed_tools()? {
            println!("{}", tool);
        }

        Ok(())
    }
}

/// Union of the flattened tool sets of every requested group, each group
/// expanded once.
fn accumulate_tools(
    descriptor: &shell_manifest::ShellDescriptor,
    groups: &[String],
) -> Result<BTreeSet<ToolSpec>> {
    let unique: BTreeSet<&String> = groups.iter().collect();

    let mut tools = BTreeSet::new();
    for group in unique {
        tools.extend(expand_group(descriptor, group).map_err(CliError::Eval)?);
    }

    Ok(tools)
}

fn install_one(driver: &UvDriver, tool: &str, dependencies: &[String]) -> Result<()> {
    if driver.installed_tools()?.iter().any(|t| t == tool) {
        eprintln!(
            "{} Tool {} already installed.",
            console::style("skip:").dim(),
            tool
        );
        return Ok(());
    }

    driver.install(tool, dependencies)?;
    println!("{} Installed {}.", console::style("ok:").green().bold(), tool);
    Ok(())
}

fn remove_one(driver: &UvDriver, tool: &str) -> Result<()> {
    if !driver.installed_tools()?.iter().any(|t| t == tool) {
        eprintln!(
            "{} Tool {} not installed.",
            console::style("skip:").dim(),
            tool
        );
        return Ok(());
    }

    driver.uninstall(tool)?;
    println!("{} Removed {}.", console::style("ok:").green().bold(), tool);
    Ok(())
}
