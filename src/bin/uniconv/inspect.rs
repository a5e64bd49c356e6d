//! CLI handlers for the `length` and `position` commands.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use uniconv::text::position::utf8_position_from_utf16_position;
use uniconv::text::utf16::utf16_length;
use uniconv::text::utf32::utf32_length;
use uniconv::text::utf8::is_valid_utf8;

use crate::{exit_codes, read_input};

/// Print the length of UTF-8 text in each encoding.
#[derive(Debug, Parser)]
pub struct LengthArgs {
    /// Input file (reads from stdin if omitted)
    pub input: Option<PathBuf>,
}

/// Map a UTF-16 code unit offset to a UTF-8 byte offset.
#[derive(Debug, Parser)]
pub struct PositionArgs {
    /// Offset in UTF-16 code units
    pub offset: usize,

    /// Input file (reads from stdin if omitted)
    pub input: Option<PathBuf>,
}

/// Lengths of one input in each encoding.
#[derive(Debug, PartialEq, Eq)]
struct Lengths {
    bytes: usize,
    utf16: usize,
    utf32: usize,
    valid: bool,
}

impl Lengths {
    fn of(input: &[u8]) -> Self {
        Self {
            bytes: input.len(),
            utf16: utf16_length(input),
            utf32: utf32_length(input),
            valid: is_valid_utf8(input),
        }
    }
}

pub fn run_length(args: LengthArgs) -> Result<i32> {
    let input = read_input(args.input.as_deref())?;
    let lengths = Lengths::of(&input);
    println!("bytes: {}", lengths.bytes);
    println!("utf16: {}", lengths.utf16);
    println!("utf32: {}", lengths.utf32);
    println!("valid: {}", lengths.valid);
    Ok(exit_codes::SUCCESS)
}

pub fn run_position(args: PositionArgs) -> Result<i32> {
    let input = read_input(args.input.as_deref())?;
    let total = utf16_length(&input);
    if args.offset > total {
        log::warn!(
            "offset {} is past the end ({} UTF-16 units), clamping",
            args.offset,
            total
        );
    }
    println!("{}", utf8_position_from_utf16_position(&input, args.offset));
    Ok(exit_codes::SUCCESS)
}
