mod cli;
mod commands;
mod config;
mod discovery;
mod engine;
mod environment;
mod error;
mod installer;
mod paths;
mod state;
mod ui;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use error::ErrorKind;
use std::io;
use std::path::Path;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    pub json: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        json: cli.json,
    };

    if let Err(err) = run(&ctx, cli.command, cli.config.as_deref()) {
        report_failure(&ctx, &err);
        std::process::exit(1);
    }
}

fn run(ctx: &Context, command: Command, config: Option<&Path>) -> anyhow::Result<()> {
    match command {
        Command::Apply(args) => commands::apply::run(ctx, args, config),
        Command::Status => commands::status::run(ctx, config),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "javactl", &mut io::stdout());
            Ok(())
        }
    }
}

/// Failures outside the reconciliation (bad config, bad flags) count as
/// invalid input.
fn failure_kind(err: &anyhow::Error) -> ErrorKind {
    err.downcast_ref::<error::Error>()
        .map_or(ErrorKind::InvalidInput, error::Error::kind)
}

fn report_failure(ctx: &Context, err: &anyhow::Error) {
    let kind = failure_kind(err);
    let message = format!("{err:#}");

    if ctx.json {
        let failure = serde_json::json!({
            "failed": true,
            "error": message,
            "kind": kind,
        });
        println!("{failure}");
    } else {
        ui::error(&format!("{message} [{kind}]"));
    }
}
