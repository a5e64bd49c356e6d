//! Detection of the Unicode line break characters that are not ASCII.
//!
//! - Line separator U+2028: `E2 80 A8`
//! - Paragraph separator U+2029: `E2 80 A9`
//! - Next line (NEL) U+0085: `C2 85`
//!
//! These are the fixed byte patterns a line-ending classifier looks ahead
//! for. Each detector takes the bytes starting at the candidate position and
//! returns false when fewer bytes than the pattern length are available.

/// Length of the UTF-8 encoding of U+2028 and U+2029.
pub const UTF8_SEPARATOR_LENGTH: usize = 3;

/// Length of the UTF-8 encoding of U+0085.
pub const UTF8_NEL_LENGTH: usize = 2;

pub const LINE_SEPARATOR_UTF8: [u8; UTF8_SEPARATOR_LENGTH] = [0xE2, 0x80, 0xA8];
pub const PARAGRAPH_SEPARATOR_UTF8: [u8; UTF8_SEPARATOR_LENGTH] = [0xE2, 0x80, 0xA9];
pub const NEL_UTF8: [u8; UTF8_NEL_LENGTH] = [0xC2, 0x85];

/// Returns true if `bytes` starts with U+2028 or U+2029.
///
/// ```
/// use uniconv::text::separator::is_separator;
///
/// assert!(is_separator("\u{2028}".as_bytes()));
/// assert!(is_separator("\u{2029}rest".as_bytes()));
/// assert!(!is_separator(&[0xE2, 0x80]));
/// ```
#[inline]
pub fn is_separator(bytes: &[u8]) -> bool {
    is_line_separator(bytes) || is_paragraph_separator(bytes)
}

/// Returns true if `bytes` starts with U+2028 LINE SEPARATOR.
#[inline]
pub fn is_line_separator(bytes: &[u8]) -> bool {
    bytes.starts_with(&LINE_SEPARATOR_UTF8)
}

/// Returns true if `bytes` starts with U+2029 PARAGRAPH SEPARATOR.
#[inline]
pub fn is_paragraph_separator(bytes: &[u8]) -> bool {
    bytes.starts_with(&PARAGRAPH_SEPARATOR_UTF8)
}

/// Returns true if `bytes` starts with U+0085 NEXT LINE.
///
/// ```
/// use uniconv::text::separator::is_nel;
///
/// assert!(is_nel(&[0xC2, 0x85]));
/// assert!(!is_nel(&[0xC2]));
/// ```
#[inline]
pub fn is_nel(bytes: &[u8]) -> bool {
    bytes.starts_with(&NEL_UTF8)
}
