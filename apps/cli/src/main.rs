mod commands;
mod core;

use clap::{Parser, Subcommand};
use commands::{
    CheckCommand, EvalCommand, InstallCommand, InstallGroupCommand, ListCommand, RemoveCommand,
    RemoveGroupCommand, ShellCommand,
};
use crate::core::error::CliError;

#[derive(Parser)]
#[command(name = "devshell-architect")]
#[command(version)]
#[command(about = "Pin, check, and materialize reproducible development shells", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the descriptor into per-platform environment records
    Eval(EvalCommand),
    /// Validate the descriptor and report issues
    Check(CheckCommand),
    /// Spawn a shell with the evaluated environment context
    Shell(ShellCommand),
    /// Install a specific tool into the project scope
    Install(InstallCommand),
    /// Remove an installed tool
    Remove(RemoveCommand),
    /// Install every tool of the given groups
    InstallGroup(InstallGroupCommand),
    /// Remove every tool of the given groups
    RemoveGroup(RemoveGroupCommand),
    /// List tools installed in the project scope
    List(ListCommand),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval(cmd) => cmd.execute(),
        Commands::Check(cmd) => cmd.execute(),
        Commands::Shell(cmd) => cmd.execute(),
        Commands::Install(cmd) => cmd.execute(),
        Commands::Remove(cmd) => cmd.execute(),
        Commands::InstallGroup(cmd) => cmd.execute(),
        Commands::RemoveGroup(cmd) => cmd.execute(),
        Commands::List(cmd) => cmd.execute(),
    };

    if let Err(err) = result {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            cli_err.render();
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}
