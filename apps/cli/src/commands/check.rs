use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::core::error::CliError;
use shell_manifest::ValidationLevel;

#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Path to the shell descriptor (discovered in the current directory by default)
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,
}

impl CheckCommand {
    pub fn execute(self) -> Result<()> {
        let (path, descriptor) = super::load_descriptor(self.manifest.as_deref())?;
        let validation = descriptor.validate();

        println!("Checking {}", console::style(path.display()).bold());

        for issue in &validation.issues {
            let label = match issue.level {
                ValidationLevel::Error => console::style("error").red().bold(),
                ValidationLevel::Warning => console::style("warning").yellow(),
                ValidationLevel::Info => console::style("info").dim(),
            };
            println!("  {} [{}] {}", label, issue.field, issue.message);
        }

        if validation.has_errors() {
            return Err(CliError::Descriptor(format!(
                "{} issue(s) must be fixed",
                validation
                    .issues
                    .iter()
                    .filter(|i| i.level == ValidationLevel::Error)
                    .count()
            ))
            .into());
        }

        println!(
            "{} Descriptor is valid ({} note(s)).",
            console::style("ok:").green().bold(),
            validation.issues.len()
        );

        Ok(())
    }
}
