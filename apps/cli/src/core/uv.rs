use crate::core::error::CliError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Thin driver around `uv tool`, scoped to the project's virtual
/// environment so installed tools never leak into the user's global state.
pub struct UvDriver {
    data_home: PathBuf,
}

impl UvDriver {
    /// Binds the driver to the project venv, honoring `UV_PROJECT_ENVIRONMENT`.
    pub fn new(project_root: &Path) -> Result<Self, CliError> {
        let venv = std::env::var_os("UV_PROJECT_ENVIRONMENT")
            .map(PathBuf::from)
            .unwrap_or_else(|| project_root.join(".venv"));

        if !venv.is_dir() {
            return Err(CliError::MissingVenv(venv));
        }

        which::which("uv").map_err(|_| CliError::UvMissing)?;

        let data_home = venv.join("share");
        std::fs::create_dir_all(&data_home)?;

        Ok(Self { data_home })
    }

    fn run(&self, args: &[&str]) -> Result<String, CliError> {
        debug!(?args, "running uv");

        let output = Command::new("uv")
            .args(args)
            .env("XDG_DATA_HOME", &self.data_home)
            .output()?;

        if !output.status.success() {
            return Err(CliError::UvFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Names of tools already installed under this project scope.
    pub fn installed_tools(&self) -> Result<Vec<String>, CliError> {
        let stdout = self.run(&["tool", "list"])?;

        Ok(stdout
            .lines()
            .filter(|line| !line.is_empty() && !line.starts_with('-'))
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect())
    }

    pub fn install(&self, tool: &str, dependencies: &[String]) -> Result<(), CliError> {
        let mut args = vec!["tool", "install"];
        for dependency in dependencies {
            args.push("--with");
            args.push(dependency);
        }
        args.push(tool);

        self.run(&args)?;
        Ok(())
    }

    pub fn uninstall(&self, tool: &str) -> Result<(), CliError> {
        self.run(&["tool", "uninstall", tool])?;
        Ok(())
    }
}
