//! Mapping UTF-16 offsets onto UTF-8 byte offsets.

use crate::text::classify::classify;
use crate::text::utf16::utf16_length_from_utf8_byte_count;

/// Translate an offset in UTF-16 code units into the byte offset of the
/// same position in the UTF-8 `text`.
///
/// The text is walked from the start; each sequence consumes 1 unit (2 for a
/// 4-byte sequence) until `position_utf16` units have been consumed. Each
/// byte starting an invalid sequence consumes 1 unit, matching
/// [`crate::text::utf16::utf16_length`]. An offset between the two units of
/// a surrogate pair maps to the end of that character. Offsets past the end
/// of the text clamp to `text.len()`.
///
/// # Examples
///
/// ```
/// use uniconv::text::position::utf8_position_from_utf16_position;
///
/// let text = "a日😀b".as_bytes();
/// assert_eq!(utf8_position_from_utf16_position(text, 0), 0);
/// assert_eq!(utf8_position_from_utf16_position(text, 1), 1);
/// assert_eq!(utf8_position_from_utf16_position(text, 2), 4);
/// assert_eq!(utf8_position_from_utf16_position(text, 4), 8);
/// assert_eq!(utf8_position_from_utf16_position(text, 5), 9);
/// assert_eq!(utf8_position_from_utf16_position(text, 100), 9);
/// ```
pub fn utf8_position_from_utf16_position(text: &[u8], position_utf16: usize) -> usize {
    let mut position_utf8 = 0;
    let mut length_utf16 = 0;
    while position_utf8 < text.len() && length_utf16 < position_utf16 {
        let class = classify(&text[position_utf8..]);
        if class.is_invalid() {
            length_utf16 += 1;
            position_utf8 += 1;
        } else {
            length_utf16 += utf16_length_from_utf8_byte_count(class.width);
            position_utf8 += class.width;
        }
    }
    position_utf8
}
