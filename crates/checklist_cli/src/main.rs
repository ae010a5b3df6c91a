//! `checklist` command-line entry point.
//!
//! # Responsibility
//! - Parse global flags and dispatch to batch or interactive modes.
//! - Initialize file logging when a log directory is given.

mod format_cmd;
mod shell;

use checklist_core::{
    default_log_level, init_logging, FormatterDefaults, LogConfig, SystemClipboard,
};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "checklist", version, about = "Format {line, name} JSON into checklist documents")]
struct Cli {
    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert one input file (or stdin) to a checklist document.
    Format(format_cmd::FormatArgs),
    /// Interactive session: paste, process, edit and export step by step.
    Shell(shell::ShellArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(dir) = cli.log_dir.as_ref() {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        if let Err(err) = init_logging(&LogConfig::new(level, dir)) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let mut clipboard = SystemClipboard::new();
    match cli.command {
        Command::Format(args) => match format_cmd::run(&args, &mut clipboard) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        },
        Command::Shell(args) => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut shell = shell::Shell::new(
                args.into_session(FormatterDefaults::default()),
                &mut clipboard,
                stdin.lock(),
                stdout.lock(),
            );
            match shell.run() {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("error: {err}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
