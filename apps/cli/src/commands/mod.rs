mod check;
mod eval;
mod shell;
mod tools;

pub use check::CheckCommand;
pub use eval::EvalCommand;
pub use shell::ShellCommand;
pub use tools::{
    InstallCommand, InstallGroupCommand, ListCommand, RemoveCommand, RemoveGroupCommand,
};

use anyhow::Result;
use shell_manifest::ShellDescriptor;
use std::path::{Path, PathBuf};

/// Loads the descriptor from an explicit path, or discovers it in the
/// current directory following the descriptor precedence rules.
pub(crate) fn load_descriptor(manifest: Option<&Path>) -> Result<(PathBuf, ShellDescriptor)> {
    match manifest {
        Some(path) => ShellDescriptor::load(path).map(|d| (path.to_path_buf(), d)),
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            ShellDescriptor::find_and_load(&cwd)
        }
    }
}

pub(crate) fn project_root(overridden: Option<PathBuf>) -> PathBuf {
    let root = overridden.unwrap_or_else(|| {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });
    std::fs::canonicalize(&root).unwrap_or(root)
}
