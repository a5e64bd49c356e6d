//! CLI handler for the `validate` command.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use uniconv::text::utf32::utf32_length;
use uniconv::text::utf8::{self, format_byte, Utf8Error, Utf8ErrorKind};

use crate::exit_codes;

/// Widest slice of a line shown around an error.
const SNIPPET_WIDTH: usize = 80;

/// Validate text files for UTF-8 compliance.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Input files to validate (reads from stdin if none provided)
    #[arg(trailing_var_arg = true)]
    pub files: Vec<PathBuf>,

    /// Quiet mode: exit code only, no output
    #[arg(short, long)]
    pub quiet: bool,

    /// Force color output even when not a TTY
    #[arg(short = 'C', long = "color")]
    pub color: bool,

    /// Disable color output
    #[arg(short = 'M', long = "no-color")]
    pub no_color: bool,
}

/// ANSI color codes, or empty strings when color is off.
struct ColorScheme {
    error: &'static str,
    location: &'static str,
    gutter: &'static str,
    caret: &'static str,
    hint: &'static str,
    reset: &'static str,
}

impl ColorScheme {
    fn new(use_color: bool) -> Self {
        if use_color {
            Self {
                error: "\x1b[1;31m",
                location: "\x1b[1;34m",
                gutter: "\x1b[0;34m",
                caret: "\x1b[1;32m",
                hint: "\x1b[0;33m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                error: "",
                location: "",
                gutter: "",
                caret: "",
                hint: "",
                reset: "",
            }
        }
    }
}

/// Run the validate command.
pub fn run(args: ValidateArgs) -> Result<i32> {
    let use_color = if args.no_color {
        false
    } else if args.color {
        true
    } else {
        atty::is(atty::Stream::Stderr)
    };
    let scheme = ColorScheme::new(use_color);

    if args.files.is_empty() {
        let mut input = Vec::new();
        io::stdin()
            .read_to_end(&mut input)
            .context("failed to read from stdin")?;
        return Ok(validate_input(&input, "<stdin>", &args, &scheme));
    }

    let mut any_invalid = false;
    let mut any_io_error = false;

    for path in &args.files {
        match fs::read(path) {
            Ok(input) => {
                let name = path.to_string_lossy();
                if validate_input(&input, &name, &args, &scheme) == exit_codes::INVALID {
                    any_invalid = true;
                }
            }
            Err(e) => {
                any_io_error = true;
                if !args.quiet {
                    eprintln!(
                        "{}error{}: {}: {}",
                        scheme.error,
                        scheme.reset,
                        path.display(),
                        e
                    );
                }
            }
        }
    }

    Ok(if any_io_error {
        exit_codes::IO_ERROR
    } else if any_invalid {
        exit_codes::INVALID
    } else {
        exit_codes::SUCCESS
    })
}

fn validate_input(input: &[u8], name: &str, args: &ValidateArgs, scheme: &ColorScheme) -> i32 {
    match utf8::validate_utf8(input) {
        Ok(()) => {
            log::info!("{}: valid UTF-8 ({} bytes)", name, input.len());
            exit_codes::SUCCESS
        }
        Err(err) => {
            if !args.quiet {
                print_error(&err, input, name, scheme);
            }
            exit_codes::INVALID
        }
    }
}

/// Print a formatted error message with a context snippet.
fn print_error(err: &Utf8Error, input: &[u8], name: &str, scheme: &ColorScheme) {
    let byte_info = input
        .get(err.offset)
        .map(|&b| format!(" (byte {})", format_byte(b)))
        .unwrap_or_default();
    eprintln!("{}error{}: {}{}", scheme.error, scheme.reset, err.kind, byte_info);
    eprintln!(
        "  {}--> {}:{}:{}{}",
        scheme.location, name, err.line, err.column, scheme.reset
    );

    let snippet = error_snippet(input, err.offset);
    let width = err.line.to_string().len().max(3);
    let blank = " ".repeat(width + 2);

    eprintln!("{}{}|{}", blank, scheme.gutter, scheme.reset);
    eprintln!(
        " {}{:>width$}{} {}|{} {}",
        scheme.gutter,
        err.line,
        scheme.reset,
        scheme.gutter,
        scheme.reset,
        snippet.text,
        width = width
    );
    let hint = error_hint(&err.kind)
        .map(|h| format!(" {}{}{}", scheme.hint, h, scheme.reset))
        .unwrap_or_default();
    eprintln!(
        "{}{}|{} {}{}^{}{}",
        blank,
        scheme.gutter,
        scheme.reset,
        " ".repeat(snippet.caret_offset),
        scheme.caret,
        scheme.reset,
        hint
    );
    eprintln!();
}

fn error_hint(kind: &Utf8ErrorKind) -> Option<&'static str> {
    match kind {
        Utf8ErrorKind::InvalidLeadByte => Some("bytes 0x80-0xBF are continuation bytes"),
        Utf8ErrorKind::InvalidContinuationByte => Some("expected byte 0x80-0xBF"),
        Utf8ErrorKind::OverlongEncoding => Some("use shortest possible encoding"),
        Utf8ErrorKind::SurrogateCodepoint => Some("U+D800-U+DFFF are reserved for UTF-16"),
        Utf8ErrorKind::OutOfRangeCodepoint => Some("maximum is U+10FFFF"),
        Utf8ErrorKind::TruncatedSequence => None,
    }
}

/// The line around an error, repaired for display.
#[derive(Debug, PartialEq, Eq)]
struct Snippet {
    text: String,
    /// Number of characters of `text` before the offending byte.
    caret_offset: usize,
}

/// Extract the line containing `offset`, clipped to [`SNIPPET_WIDTH`] bytes
/// centred on the error.
fn error_snippet(input: &[u8], offset: usize) -> Snippet {
    let offset = offset.min(input.len());
    let line_start = input[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let line_end = input[offset..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(input.len(), |i| offset + i);

    let (start, prefix) = if offset - line_start > SNIPPET_WIDTH / 2 {
        (offset - SNIPPET_WIDTH / 2, "...")
    } else {
        (line_start, "")
    };
    let (end, suffix) = if line_end - start > SNIPPET_WIDTH {
        (start + SNIPPET_WIDTH, "...")
    } else {
        (line_end, "")
    };

    let line = input[start..end].strip_suffix(b"\r").unwrap_or(&input[start..end]);
    let text = format!("{}{}{}", prefix, utf8::fix_invalid_utf8(line), suffix);
    // One repaired character per invalid byte: utf32_length of the raw prefix
    // is the caret column.
    let caret_offset = prefix.len() + utf32_length(&input[start..offset]);

    Snippet { text, caret_offset }
}
