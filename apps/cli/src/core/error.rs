use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Descriptor error: {0}")]
    Descriptor(String),

    #[error("Evaluation failed: {0}")]
    Eval(#[from] shell_engine::EvalError),

    #[error("No local virtual environment found at {0:?}")]
    MissingVenv(PathBuf),

    #[error("The 'uv' binary is not on PATH")]
    UvMissing,

    #[error("uv exited unsuccessfully: {0}")]
    UvFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Returns a themed, actionable suggestion for the error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CliError::Descriptor(_) => {
                Some("Check your shell.toml for syntax errors or missing fields.".to_string())
            }
            CliError::Eval(_) => {
                Some("Adjust shell.packages or the policy section and re-run.".to_string())
            }
            CliError::MissingVenv(_) => {
                Some("Create a project venv first (e.g. run `uv venv`).".to_string())
            }
            CliError::UvMissing => Some("Install uv or add it to PATH.".to_string()),
            _ => None,
        }
    }

    pub fn render(&self) {
        eprintln!("\n{} {}", console::style("Error:").red().bold(), self);
        if let Some(s) = self.suggestion() {
            eprintln!("{} {}", console::style("  help:").dim(), s);
        }
    }
}
