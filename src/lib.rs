//! # Uniconv
//!
//! Conversion between UTF-8, UTF-16 and UTF-32, UTF-8 validation and repair,
//! and UTF-16 to UTF-8 offset mapping.
//!
//! Every operation is a pure function over caller-owned slices. Scans never
//! read past the end of a slice, including when it ends in the middle of a
//! multi-byte sequence.
//!
//! ## Module Organization
//!
//! - [`table`] - 256-entry lead byte classification table
//! - [`text`] - classification, validation, repair, conversion, offsets
//! - [`error`] - errors for caller contract violations
//!
//! ## Quick Start
//!
//! ```
//! use uniconv::text::{utf16_from_utf8, utf16_length, utf8_position_from_utf16_position};
//!
//! let text = "x😀y".as_bytes();
//!
//! // Size the destination with the length calculator, then convert
//! let mut units = vec![0u16; utf16_length(text)];
//! assert_eq!(utf16_from_utf8(text, &mut units), Ok(4));
//!
//! // UTF-16 offset 3 ('y') is UTF-8 byte offset 5
//! assert_eq!(utf8_position_from_utf16_position(text, 3), 5);
//! ```
//!
//! ## Malformed input
//!
//! Invalid UTF-8 and unpaired UTF-16 surrogates are never errors. Each byte at
//! which an invalid UTF-8 sequence starts becomes U+FFFD and scanning resumes
//! at the next byte; each unpaired surrogate becomes U+FFFD. Errors
//! ([`ConversionError`]) only report a destination that is too small or a
//! value passed as a scalar that is not one.
//!
//! ## Features
//!
//! - `std` (default) - link the standard library; without it the crate is
//!   `no_std` and needs `alloc`
//! - `serde` - serialization/deserialization of the public value types
//! - `cli` - the `uniconv` command line tool

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

// =============================================================================
// Modules
// =============================================================================

/// UTF-8 lead byte lookup table.
pub mod table;

/// Text encoding conversion and validation.
pub mod text;

/// Errors for caller contract violations.
pub mod error;

// =============================================================================
// Public re-exports
// =============================================================================

pub use error::ConversionError;
pub use table::{bytes_of_lead, is_trail_byte};
pub use text::{
    classify, fix_invalid_utf8, is_valid_utf8, utf16_from_utf8, utf16_length, utf32_from_utf8,
    utf32_length, utf8_from_utf16, utf8_length, utf8_position_from_utf16_position,
    validate_utf8, Utf8Class, Utf8Error, Utf8ErrorKind,
};

// =============================================================================
// Constants
// =============================================================================

/// Maximum number of bytes in one UTF-8 sequence.
pub const UTF8_MAX_BYTES: usize = 4;

/// U+FFFD REPLACEMENT CHARACTER, substituted for undecodable input.
pub const REPLACEMENT_CHAR: u32 = 0xFFFD;
