use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::state::JavaState;

#[derive(Parser)]
#[command(name = "javactl")]
#[command(version)]
#[command(about = "Reconcile the Java runtime or SDK on this host to a declared state", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print the result (or failure) as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Settings file (default: $JAVACTL_CONFIG, then /etc/javactl/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install, replace, or remove Java to match the requested state
    #[command(disable_version_flag = true)]
    Apply(ApplyArgs),

    /// Show the active Java without changing anything
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Desired state
    #[arg(long, value_enum, default_value_t = JavaState::Jre)]
    pub state: JavaState,

    /// Minimum version, e.g. 7, 7u40-b43 or 1.7.0_40 (default: latest)
    #[arg(long)]
    pub version: Option<String>,

    /// Absolute path or URL (file or directory) to take install media from
    #[arg(long, value_name = "PATH|URL")]
    pub package_location: Option<String>,

    /// Show what would be done without making changes
    #[arg(long)]
    pub dry_run: bool,
}
