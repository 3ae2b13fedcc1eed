//! # lockshift CLI
//!
//! Launcher and diagnostics for the Lockshift preload library.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lockshift_core::logging::{init_logging, LogLevel};

mod doctor;
mod run;

/// Lockshift - per-user redirection of device-lock paths
#[derive(Parser)]
#[command(name = "lockshift")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a command with lock-path redirection preloaded
    Run {
        /// Preload library path (overrides discovery)
        #[arg(long, env = "LOCKSHIFT_PRELOAD")]
        library: Option<PathBuf>,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        command: Vec<String>,
    },

    /// Check that the environment supports redirection
    Doctor,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    });

    match cli.command {
        Commands::Run { library, command } => run::cmd_run(library.as_deref(), &command),
        Commands::Doctor => doctor::cmd_doctor(),
    }
}
