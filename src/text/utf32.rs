//! Conversion from UTF-8 to UTF-32 scalar values.
//!
//! Decoding follows the same discipline as [`crate::text::utf16`]: each byte
//! at which an invalid sequence starts yields one U+FFFD and decoding resumes
//! at the next byte.

use alloc::vec::Vec;

use crate::error::ConversionError;
use crate::text::classify::{classify, decode_sequence};
use crate::REPLACEMENT_CHAR;

/// Number of scalar values [`utf32_from_utf8`] produces for `bytes`.
///
/// ```
/// use uniconv::text::utf32::utf32_length;
///
/// assert_eq!(utf32_length("aé€😀".as_bytes()), 4);
/// assert_eq!(utf32_length(&[0xF0, 0x9F]), 2);
/// ```
pub fn utf32_length(bytes: &[u8]) -> usize {
    let mut count = 0;
    let mut pos = 0;
    while pos < bytes.len() {
        let class = classify(&bytes[pos..]);
        pos += if class.is_invalid() { 1 } else { class.width };
        count += 1;
    }
    count
}

/// Convert UTF-8 to UTF-32 scalar values, writing into `dst`.
///
/// Returns the number of values written, which equals [`utf32_length`] of the
/// source, or [`ConversionError::Capacity`] if `dst` is too small.
///
/// ```
/// use uniconv::text::utf32::utf32_from_utf8;
///
/// let mut dst = [0u32; 3];
/// assert_eq!(utf32_from_utf8("a€😀".as_bytes(), &mut dst), Ok(3));
/// assert_eq!(dst, [0x61, 0x20AC, 0x1F600]);
/// ```
pub fn utf32_from_utf8(src: &[u8], dst: &mut [u32]) -> Result<usize, ConversionError> {
    let mut k = 0;
    let mut pos = 0;
    while pos < src.len() {
        let class = classify(&src[pos..]);
        let (value, used) = if class.is_invalid() {
            (REPLACEMENT_CHAR, 1)
        } else {
            (decode_sequence(&src[pos..], class.width), class.width)
        };
        let Some(slot) = dst.get_mut(k) else {
            let required = utf32_length(src);
            log::debug!(
                "destination holds {} scalars but conversion needs {}",
                dst.len(),
                required
            );
            return Err(ConversionError::Capacity {
                required,
                capacity: dst.len(),
            });
        };
        *slot = value;
        k += 1;
        pos += used;
    }
    Ok(k)
}

/// Convert UTF-8 to a newly allocated vector of scalar values.
pub fn utf32_from_utf8_vec(src: &[u8]) -> Vec<u32> {
    let mut out = alloc::vec![0u32; utf32_length(src)];
    let written = utf32_from_utf8(src, &mut out).unwrap_or_else(|err| {
        debug_assert!(false, "buffer sized by the length calculator rejected: {}", err);
        0
    });
    out.truncate(written);
    out
}
