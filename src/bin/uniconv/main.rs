//! Uniconv CLI tool for validating, repairing and converting Unicode text.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

mod convert;
mod inspect;
mod repair;
mod validate;

#[derive(Debug, Parser)]
#[command(name = "uniconv")]
#[command(about = "UTF-8 / UTF-16 / UTF-32 validation, repair and conversion", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate files for UTF-8 compliance
    Validate(validate::ValidateArgs),
    /// Replace invalid UTF-8 with U+FFFD
    Repair(repair::RepairArgs),
    /// Convert between UTF-8, UTF-16 and UTF-32
    Convert(convert::ConvertArgs),
    /// Print the length of UTF-8 text in bytes, UTF-16 units and scalars
    Length(inspect::LengthArgs),
    /// Map a UTF-16 offset to a UTF-8 byte offset
    Position(inspect::PositionArgs),
}

/// Exit codes shared by all commands.
pub mod exit_codes {
    /// Success (or: input is valid UTF-8).
    pub const SUCCESS: i32 = 0;
    /// Input is not valid UTF-8.
    pub const INVALID: i32 = 1;
    /// I/O error (file not found, permission denied, etc.).
    pub const IO_ERROR: i32 = 2;
}

/// Exit code for an error that escaped a command.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.chain().any(|cause| cause.is::<io::Error>()) {
        exit_codes::IO_ERROR
    } else {
        exit_codes::INVALID
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("failed to initialize logging")
}

/// Read a whole file, or stdin if no path is given.
pub(crate) fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut input = Vec::new();
            io::stdin()
                .read_to_end(&mut input)
                .context("failed to read from stdin")?;
            Ok(input)
        }
    }
}

/// Write bytes to a file, or stdout if no path is given.
pub(crate) fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes).context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")?;
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<i32> {
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Validate(args) => validate::run(args),
        Command::Repair(args) => repair::run(args),
        Command::Convert(args) => convert::run(args),
        Command::Length(args) => inspect::run_length(args),
        Command::Position(args) => inspect::run_position(args),
    }
}

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            exit_code_for(&err)
        }
    };

    std::process::exit(code);
}
