//! CLI handler for the `convert` command.
//!
//! Input is decoded to UTF-8 first, then encoded to the target. UTF-16 and
//! UTF-32 files are written without a byte order mark.

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use uniconv::text::utf16::{utf16_from_utf8_vec, utf8_from_utf16_vec};
use uniconv::text::utf32::utf32_from_utf8_vec;
use uniconv::text::utf8::fix_invalid_utf8;

use crate::{exit_codes, read_input, write_output};

#[derive(Debug, Parser)]
pub struct ConvertArgs {
    /// Input file (reads from stdin if omitted)
    pub input: Option<PathBuf>,

    /// Encoding of the input
    #[arg(short, long, default_value = "utf8")]
    pub from: SourceEncoding,

    /// Encoding of the output
    #[arg(short, long)]
    pub to: TargetEncoding,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceEncoding {
    Utf8,
    Utf16le,
    Utf16be,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetEncoding {
    Utf8,
    Utf16le,
    Utf16be,
    Utf32le,
    Utf32be,
}

pub fn run(args: ConvertArgs) -> Result<i32> {
    let input = read_input(args.input.as_deref())?;
    let output = convert(&input, args.from, args.to)?;
    write_output(args.output.as_deref(), &output)?;
    Ok(exit_codes::SUCCESS)
}

fn convert(input: &[u8], from: SourceEncoding, to: TargetEncoding) -> Result<Vec<u8>> {
    let utf8 = match from {
        SourceEncoding::Utf8 => input.to_vec(),
        SourceEncoding::Utf16le => {
            utf8_from_utf16_vec(&units_from_bytes(input, u16::from_le_bytes)?)
        }
        SourceEncoding::Utf16be => {
            utf8_from_utf16_vec(&units_from_bytes(input, u16::from_be_bytes)?)
        }
    };
    log::debug!("decoded {} input bytes to {} UTF-8 bytes", input.len(), utf8.len());

    Ok(match to {
        TargetEncoding::Utf8 => fix_invalid_utf8(&utf8).into_bytes(),
        TargetEncoding::Utf16le => utf16_from_utf8_vec(&utf8)
            .iter()
            .flat_map(|unit| unit.to_le_bytes())
            .collect(),
        TargetEncoding::Utf16be => utf16_from_utf8_vec(&utf8)
            .iter()
            .flat_map(|unit| unit.to_be_bytes())
            .collect(),
        TargetEncoding::Utf32le => utf32_from_utf8_vec(&utf8)
            .iter()
            .flat_map(|value| value.to_le_bytes())
            .collect(),
        TargetEncoding::Utf32be => utf32_from_utf8_vec(&utf8)
            .iter()
            .flat_map(|value| value.to_be_bytes())
            .collect(),
    })
}

fn units_from_bytes(input: &[u8], from_bytes: fn([u8; 2]) -> u16) -> Result<Vec<u16>> {
    if input.len() % 2 != 0 {
        bail!(
            "UTF-16 input has an odd number of bytes ({}); it cannot be split into code units",
            input.len()
        );
    }
    Ok(input
        .chunks_exact(2)
        .map(|pair| from_bytes([pair[0], pair[1]]))
        .collect())
}
