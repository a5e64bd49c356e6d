//! CLI handler for the `repair` command.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use uniconv::text::classify::classify;
use uniconv::text::utf8::fix_invalid_utf8;

use crate::{exit_codes, read_input, write_output};

/// Replace every invalid UTF-8 byte with U+FFFD.
#[derive(Debug, Parser)]
pub struct RepairArgs {
    /// Input file (reads from stdin if omitted)
    pub input: Option<PathBuf>,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit with status 1 if any byte had to be replaced
    #[arg(long)]
    pub check: bool,
}

pub fn run(args: RepairArgs) -> Result<i32> {
    let input = read_input(args.input.as_deref())?;
    let replaced = count_invalid(&input);
    if replaced == 0 {
        log::info!("input is already valid UTF-8");
    } else {
        log::warn!("replaced {} invalid byte(s) with U+FFFD", replaced);
    }

    let repaired = fix_invalid_utf8(&input);
    write_output(args.output.as_deref(), repaired.as_bytes())?;

    Ok(if args.check && replaced > 0 {
        exit_codes::INVALID
    } else {
        exit_codes::SUCCESS
    })
}

/// Number of bytes at which an invalid sequence starts.
fn count_invalid(input: &[u8]) -> usize {
    let mut count = 0;
    let mut pos = 0;
    while pos < input.len() {
        let class = classify(&input[pos..]);
        if class.valid {
            pos += class.width;
        } else {
            count += 1;
            pos += 1;
        }
    }
    count
}
