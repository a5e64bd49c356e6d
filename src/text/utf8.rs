//! UTF-8 validation, repair, and single scalar encoding/decoding.
//!
//! ## UTF-8 Encoding Rules
//!
//! UTF-8 is a variable-width encoding that uses 1-4 bytes per scalar value:
//!
//! | Bytes | First byte    | Continuation bytes | Code point range     |
//! |-------|---------------|-------------------|----------------------|
//! | 1     | `0xxxxxxx`    | -                 | U+0000 - U+007F      |
//! | 2     | `110xxxxx`    | `10xxxxxx`        | U+0080 - U+07FF      |
//! | 3     | `1110xxxx`    | `10xxxxxx` × 2    | U+0800 - U+FFFF      |
//! | 4     | `11110xxx`    | `10xxxxxx` × 3    | U+10000 - U+10FFFF   |
//!
//! A sequence is rejected for any of:
//! 1. **Invalid lead bytes**: continuation bytes or `0xF8-0xFF` where a lead byte is expected
//! 2. **Invalid continuation bytes**: non-continuation bytes where a continuation is expected
//! 3. **Overlong encodings**: using more bytes than necessary
//! 4. **Surrogate code points**: U+D800-U+DFFF
//! 5. **Out of range**: code points above U+10FFFF
//! 6. **Truncated sequences**: multi-byte sequence cut off at end of input
//!
//! [`is_valid_utf8`] answers yes or no; [`validate_utf8`] additionally
//! reports where and why the first violation occurred.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{check_scalar, ConversionError};
use crate::text::classify::{classify, decode_sequence, scan_sequence};

/// UTF-8 encoding of U+FFFD REPLACEMENT CHARACTER.
pub const REPLACEMENT_UTF8: [u8; 3] = [0xEF, 0xBF, 0xBD];

/// Error information for UTF-8 validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[error("{kind} at byte {offset}, line {line}, column {column}")]
pub struct Utf8Error {
    /// The byte offset where the error occurred (0-indexed).
    pub offset: usize,
    /// The line number where the error occurred (1-indexed).
    pub line: usize,
    /// The column (byte position within the line, 1-indexed).
    pub column: usize,
    /// The kind of UTF-8 error.
    pub kind: Utf8ErrorKind,
}

/// The specific type of UTF-8 validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Utf8ErrorKind {
    /// A byte that cannot start a sequence appeared where a lead byte was
    /// expected: a continuation byte (0x80-0xBF) or 0xF8-0xFF.
    #[error("invalid UTF-8 lead byte")]
    InvalidLeadByte,

    /// A byte outside the range 0x80-0xBF appeared where a continuation byte was expected.
    #[error("invalid UTF-8 continuation byte")]
    InvalidContinuationByte,

    /// A character was encoded using more bytes than necessary.
    /// For example, encoding ASCII 'A' (U+0041) as `C1 81` instead of `41`.
    #[error("overlong UTF-8 encoding")]
    OverlongEncoding,

    /// A surrogate code point (U+D800-U+DFFF) was encoded.
    #[error("surrogate code point in UTF-8")]
    SurrogateCodepoint,

    /// A code point above U+10FFFF was encoded.
    #[error("code point above U+10FFFF")]
    OutOfRangeCodepoint,

    /// A multi-byte sequence was truncated at the end of input.
    #[error("truncated UTF-8 sequence")]
    TruncatedSequence,
}

/// Returns true if `input` is entirely well-formed UTF-8.
///
/// Single pass, no allocation. A trailing partial sequence makes the whole
/// input invalid.
///
/// # Examples
///
/// ```
/// use uniconv::text::utf8::is_valid_utf8;
///
/// assert!(is_valid_utf8(b""));
/// assert!(is_valid_utf8("Mixed: café 日本 🎉".as_bytes()));
/// assert!(!is_valid_utf8(&[0xC0, 0x80]));
/// assert!(!is_valid_utf8(&[b'a', 0xE2, 0x82]));
/// ```
pub fn is_valid_utf8(input: &[u8]) -> bool {
    let mut rest = input;
    while !rest.is_empty() {
        let class = classify(rest);
        if class.is_invalid() {
            return false;
        }
        rest = &rest[class.width..];
    }
    true
}

/// Validate that the input is valid UTF-8.
///
/// Returns `Ok(())` if the input is valid UTF-8, or an `Err(Utf8Error)` with
/// the exact byte offset, line number, and column position of the first
/// violation.
///
/// # Examples
///
/// ```
/// use uniconv::text::utf8::{validate_utf8, Utf8ErrorKind};
///
/// assert!(validate_utf8("日本語".as_bytes()).is_ok());
///
/// let err = validate_utf8(b"ok\nbad \x80").unwrap_err();
/// assert_eq!(err.kind, Utf8ErrorKind::InvalidLeadByte);
/// assert_eq!((err.offset, err.line, err.column), (7, 2, 5));
/// ```
pub fn validate_utf8(input: &[u8]) -> Result<(), Utf8Error> {
    let mut pos = 0;
    let mut line = 1;
    let mut line_start = 0;

    while pos < input.len() {
        match scan_sequence(&input[pos..]) {
            Ok(width) => {
                if input[pos] == b'\n' {
                    line += 1;
                    line_start = pos + 1;
                }
                pos += width;
            }
            Err(malformed) => {
                let offset = pos + malformed.at;
                return Err(Utf8Error {
                    offset,
                    line,
                    column: offset - line_start + 1,
                    kind: malformed.kind,
                });
            }
        }
    }

    Ok(())
}

/// Produce a valid UTF-8 string from possibly-invalid input.
///
/// Maximal valid runs are copied verbatim. Each byte at which an invalid
/// sequence starts is replaced by U+FFFD and scanning resumes at the very
/// next byte, so one corrupt byte never swallows the valid text after it.
///
/// # Examples
///
/// ```
/// use uniconv::text::utf8::fix_invalid_utf8;
///
/// assert_eq!(fix_invalid_utf8(b"abc"), "abc");
/// assert_eq!(fix_invalid_utf8(b"a\xFFb"), "a\u{FFFD}b");
///
/// // Truncated sequence: one replacement per byte
/// assert_eq!(fix_invalid_utf8(b"x\xE2\x82"), "x\u{FFFD}\u{FFFD}");
/// ```
pub fn fix_invalid_utf8(input: &[u8]) -> String {
    let mut out = Vec::with_capacity(input.len());
    let mut run_start = 0;
    let mut pos = 0;

    while pos < input.len() {
        let class = classify(&input[pos..]);
        if class.is_invalid() {
            log::trace!("replacing invalid byte 0x{:02X} at {}", input[pos], pos);
            out.extend_from_slice(&input[run_start..pos]);
            out.extend_from_slice(&REPLACEMENT_UTF8);
            pos += 1;
            run_start = pos;
        } else {
            pos += class.width;
        }
    }
    out.extend_from_slice(&input[run_start..]);

    String::from_utf8(out).unwrap_or_else(|err| {
        debug_assert!(false, "repaired text rejected by std: {}", err);
        String::from_utf8_lossy(err.as_bytes()).into_owned()
    })
}

/// Decode the scalar value at the start of `input`.
///
/// Returns `None` if the input is empty or does not start with a valid
/// sequence. On success, returns the scalar and the number of bytes consumed.
///
/// # Examples
///
/// ```
/// use uniconv::text::utf8::decode_utf8;
///
/// assert_eq!(decode_utf8(b"A"), Some((0x41, 1)));
/// assert_eq!(decode_utf8("日".as_bytes()), Some((0x65E5, 3)));
/// assert_eq!(decode_utf8(&[0xE6, 0x97]), None);
/// assert_eq!(decode_utf8(b""), None);
/// ```
pub fn decode_utf8(input: &[u8]) -> Option<(u32, usize)> {
    let class = classify(input);
    if class.is_invalid() {
        return None;
    }
    Some((decode_sequence(input, class.width), class.width))
}

/// Encode a single scalar value as UTF-8.
///
/// Returns the bytes and the number of them used, chosen by the
/// minimal-encoding rule. Surrogates and values above U+10FFFF are rejected.
///
/// # Examples
///
/// ```
/// use uniconv::text::utf8::utf8_from_utf32_character;
///
/// let (bytes, len) = utf8_from_utf32_character(0xE9).unwrap();
/// assert_eq!(&bytes[..len], "é".as_bytes());
///
/// let (bytes, len) = utf8_from_utf32_character(0x1F389).unwrap();
/// assert_eq!(&bytes[..len], "🎉".as_bytes());
///
/// assert!(utf8_from_utf32_character(0xD800).is_err());
/// assert!(utf8_from_utf32_character(0x110000).is_err());
/// ```
pub fn utf8_from_utf32_character(value: u32) -> Result<([u8; 4], usize), ConversionError> {
    check_scalar(value)?;
    Ok(encode_scalar(value))
}

/// Encode `cp` without checking that it is a scalar value.
#[inline]
pub(crate) fn encode_scalar(cp: u32) -> ([u8; 4], usize) {
    let mut buf = [0u8; 4];

    let len = if cp < 0x80 {
        buf[0] = cp as u8;
        1
    } else if cp < 0x800 {
        buf[0] = 0xC0 | ((cp >> 6) as u8);
        buf[1] = 0x80 | ((cp & 0x3F) as u8);
        2
    } else if cp < 0x10000 {
        buf[0] = 0xE0 | ((cp >> 12) as u8);
        buf[1] = 0x80 | (((cp >> 6) & 0x3F) as u8);
        buf[2] = 0x80 | ((cp & 0x3F) as u8);
        3
    } else {
        buf[0] = 0xF0 | ((cp >> 18) as u8);
        buf[1] = 0x80 | (((cp >> 12) & 0x3F) as u8);
        buf[2] = 0x80 | (((cp >> 6) & 0x3F) as u8);
        buf[3] = 0x80 | ((cp & 0x3F) as u8);
        4
    };

    (buf, len)
}

/// Format a byte as a human-readable string for error messages.
pub fn format_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        alloc::format!("0x{:02X} ({:?})", byte, byte as char)
    } else {
        alloc::format!("0x{:02X}", byte)
    }
}
