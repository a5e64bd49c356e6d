//! Conversion between UTF-8 and UTF-16.
//!
//! UTF-16 text is a slice of native-endian `u16` code units. Scalar values
//! above U+FFFF are stored as a surrogate pair: a lead unit in
//! `0xD800-0xDBFF` followed by a trail unit in `0xDC00-0xDFFF`.
//!
//! ## Malformed input
//!
//! - Invalid UTF-8 becomes one U+FFFD unit per byte at which an invalid
//!   sequence starts; decoding resumes at the next byte.
//! - An unpaired surrogate in UTF-16 input becomes U+FFFD (3 bytes of UTF-8).
//!
//! The length calculators apply exactly the same rules, so
//! [`utf16_length`] and [`utf8_length`] are always the exact number of units
//! the converters write.
//!
//! ## Destination capacity
//!
//! Converters write into a caller-provided slice and fail with
//! [`ConversionError::Capacity`] if it is too small. Units written before the
//! failure are left in place.
//!
//! ```
//! use uniconv::text::utf16::{utf16_from_utf8, utf16_length, utf8_from_utf16};
//!
//! let text = "a😀".as_bytes();
//! let mut units = vec![0u16; utf16_length(text)];
//! assert_eq!(utf16_from_utf8(text, &mut units), Ok(3));
//! assert_eq!(units, [0x61, 0xD83D, 0xDE00]);
//!
//! let mut bytes = [0u8; 5];
//! assert_eq!(utf8_from_utf16(&units, &mut bytes), Ok(5));
//! assert_eq!(&bytes, text);
//! ```

use alloc::vec::Vec;

use crate::error::{check_scalar, ConversionError};
use crate::text::classify::{classify, decode_sequence};
use crate::text::utf8::encode_scalar;
use crate::REPLACEMENT_CHAR;

/// First lead (high) surrogate.
pub const SURROGATE_LEAD_FIRST: u16 = 0xD800;
/// Last lead (high) surrogate.
pub const SURROGATE_LEAD_LAST: u16 = 0xDBFF;
/// First trail (low) surrogate.
pub const SURROGATE_TRAIL_FIRST: u16 = 0xDC00;
/// Last trail (low) surrogate.
pub const SURROGATE_TRAIL_LAST: u16 = 0xDFFF;
/// First scalar value that needs a surrogate pair in UTF-16.
pub const SUPPLEMENTAL_PLANE_FIRST: u32 = 0x10000;

/// Returns true if `unit` is in U+D800-U+DBFF.
#[inline]
pub const fn is_lead_surrogate(unit: u16) -> bool {
    unit >= SURROGATE_LEAD_FIRST && unit <= SURROGATE_LEAD_LAST
}

/// Returns true if `unit` is in U+DC00-U+DFFF.
#[inline]
pub const fn is_trail_surrogate(unit: u16) -> bool {
    unit >= SURROGATE_TRAIL_FIRST && unit <= SURROGATE_TRAIL_LAST
}

/// Number of units in the character starting with `unit`: 2 for a lead
/// surrogate, otherwise 1.
#[inline]
pub const fn utf16_char_length(unit: u16) -> usize {
    if is_lead_surrogate(unit) {
        2
    } else {
        1
    }
}

/// Number of UTF-16 units needed for a UTF-8 sequence of `byte_count` bytes.
#[inline]
pub const fn utf16_length_from_utf8_byte_count(byte_count: usize) -> usize {
    if byte_count < 4 {
        1
    } else {
        2
    }
}

/// One decoding step over UTF-16: the scalar at the start of `units` and the
/// number of units it occupies. Unpaired surrogates decode to U+FFFD.
#[inline]
fn next_scalar(units: &[u16]) -> (u32, usize) {
    let lead = units[0];
    if is_lead_surrogate(lead) {
        if let Some(&trail) = units.get(1) {
            if is_trail_surrogate(trail) {
                let value = SUPPLEMENTAL_PLANE_FIRST
                    + (((lead as u32) & 0x3FF) << 10)
                    + ((trail as u32) & 0x3FF);
                return (value, 2);
            }
        }
        return (REPLACEMENT_CHAR, 1);
    }
    if is_trail_surrogate(lead) {
        return (REPLACEMENT_CHAR, 1);
    }
    (lead as u32, 1)
}

/// Number of UTF-8 bytes needed to hold `units` converted by
/// [`utf8_from_utf16`].
///
/// ```
/// use uniconv::text::utf16::utf8_length;
///
/// assert_eq!(utf8_length(&[0x41, 0xE9, 0x20AC]), 6);
/// assert_eq!(utf8_length(&[0xD83D, 0xDE00]), 4);
/// // Unpaired surrogate is written as U+FFFD
/// assert_eq!(utf8_length(&[0xD83D]), 3);
/// ```
pub fn utf8_length(units: &[u16]) -> usize {
    let mut len = 0;
    let mut i = 0;
    while i < units.len() {
        let unit = units[i];
        if unit < 0x80 {
            len += 1;
            i += 1;
        } else if unit < 0x800 {
            len += 2;
            i += 1;
        } else {
            let (value, used) = next_scalar(&units[i..]);
            len += if value >= SUPPLEMENTAL_PLANE_FIRST { 4 } else { 3 };
            i += used;
        }
    }
    len
}

/// Number of UTF-16 units needed to hold `bytes` converted by
/// [`utf16_from_utf8`].
///
/// Each 1-3 byte sequence counts 1, each 4-byte sequence counts 2 and each
/// byte starting an invalid sequence counts 1.
///
/// ```
/// use uniconv::text::utf16::utf16_length;
///
/// assert_eq!(utf16_length("aé€😀".as_bytes()), 5);
/// assert_eq!(utf16_length(&[0xE2, 0x82]), 2);
/// ```
pub fn utf16_length(bytes: &[u8]) -> usize {
    let mut units = 0;
    let mut pos = 0;
    while pos < bytes.len() {
        let class = classify(&bytes[pos..]);
        if class.is_invalid() {
            units += 1;
            pos += 1;
        } else {
            units += utf16_length_from_utf8_byte_count(class.width);
            pos += class.width;
        }
    }
    units
}

/// Convert UTF-16 to UTF-8, writing into `dst`.
///
/// Surrogate pairs become one 4-byte sequence, unpaired surrogates become
/// U+FFFD. Returns the number of bytes written, which equals
/// [`utf8_length`] of the source.
pub fn utf8_from_utf16(src: &[u16], dst: &mut [u8]) -> Result<usize, ConversionError> {
    let mut k = 0;
    let mut i = 0;
    while i < src.len() {
        let (value, used) = next_scalar(&src[i..]);
        let (bytes, len) = encode_scalar(value);
        let Some(out) = dst.get_mut(k..k + len) else {
            return Err(capacity_error(utf8_length(src), dst.len()));
        };
        out.copy_from_slice(&bytes[..len]);
        k += len;
        i += used;
    }
    Ok(k)
}

/// Convert UTF-8 to UTF-16, writing into `dst`.
///
/// Each byte at which an invalid sequence starts produces one U+FFFD unit
/// and decoding resumes at the next byte. Returns the number of units
/// written, which equals [`utf16_length`] of the source.
pub fn utf16_from_utf8(src: &[u8], dst: &mut [u16]) -> Result<usize, ConversionError> {
    let mut k = 0;
    let mut pos = 0;
    while pos < src.len() {
        let class = classify(&src[pos..]);
        let (value, used) = if class.is_invalid() {
            (REPLACEMENT_CHAR, 1)
        } else {
            (decode_sequence(&src[pos..], class.width), class.width)
        };
        let mut units = [0u16; 2];
        let len = encode_utf16(value, &mut units);
        let Some(out) = dst.get_mut(k..k + len) else {
            return Err(capacity_error(utf16_length(src), dst.len()));
        };
        out.copy_from_slice(&units[..len]);
        k += len;
        pos += used;
    }
    Ok(k)
}

/// Encode a single scalar value as UTF-16.
///
/// Returns the units and how many of them are used: 1 for scalars up to
/// U+FFFF, 2 (a surrogate pair) above that.
///
/// ```
/// use uniconv::text::utf16::utf16_from_utf32_character;
///
/// assert_eq!(utf16_from_utf32_character(0x41), Ok(([0x41, 0], 1)));
/// assert_eq!(utf16_from_utf32_character(0x1F600), Ok(([0xD83D, 0xDE00], 2)));
/// assert!(utf16_from_utf32_character(0x110000).is_err());
/// ```
pub fn utf16_from_utf32_character(value: u32) -> Result<([u16; 2], usize), ConversionError> {
    check_scalar(value)?;
    let mut units = [0u16; 2];
    let len = encode_utf16(value, &mut units);
    Ok((units, len))
}

#[inline]
fn encode_utf16(value: u32, units: &mut [u16; 2]) -> usize {
    if value < SUPPLEMENTAL_PLANE_FIRST {
        units[0] = value as u16;
        1
    } else {
        let offset = value - SUPPLEMENTAL_PLANE_FIRST;
        units[0] = (offset >> 10) as u16 + SURROGATE_LEAD_FIRST;
        units[1] = (offset & 0x3FF) as u16 + SURROGATE_TRAIL_FIRST;
        2
    }
}

fn capacity_error(required: usize, capacity: usize) -> ConversionError {
    log::debug!(
        "destination holds {} units but conversion needs {}",
        capacity,
        required
    );
    ConversionError::Capacity { required, capacity }
}

/// Convert UTF-16 to a newly allocated UTF-8 buffer.
pub fn utf8_from_utf16_vec(src: &[u16]) -> Vec<u8> {
    let mut out = alloc::vec![0u8; utf8_length(src)];
    let written = utf8_from_utf16(src, &mut out).unwrap_or_else(|err| {
        debug_assert!(false, "buffer sized by the length calculator rejected: {}", err);
        0
    });
    out.truncate(written);
    out
}

/// Convert UTF-8 to a newly allocated UTF-16 buffer.
pub fn utf16_from_utf8_vec(src: &[u8]) -> Vec<u16> {
    let mut out = alloc::vec![0u16; utf16_length(src)];
    let written = utf16_from_utf8(src, &mut out).unwrap_or_else(|err| {
        debug_assert!(false, "buffer sized by the length calculator rejected: {}", err);
        0
    });
    out.truncate(written);
    out
}
