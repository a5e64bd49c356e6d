//! Precomputed lookup table for UTF-8 lead byte classification.
//!
//! `UTF8_CLASSIFY_TABLE` maps every byte value to the number of bytes a
//! sequence starting with that byte occupies, plus a flag marking bytes that
//! may only appear as continuation bytes.

/// Mask selecting the octet count (0-4) from a table entry.
pub const UTF8_CLASSIFY_MASK_OCTET_COUNT: u8 = 7;

/// Flag set on table entries for continuation bytes (`10xxxxxx`).
pub const UTF8_CLASSIFY_MASK_TRAIL_BYTE: u8 = 8;

/// Lookup table for UTF-8 lead bytes.
///
/// For a byte value `b`, `UTF8_CLASSIFY_TABLE[b] & UTF8_CLASSIFY_MASK_OCTET_COUNT`
/// is the length of the sequence `b` starts, or 0 if `b` can never start a
/// valid sequence. `UTF8_CLASSIFY_TABLE[b] & UTF8_CLASSIFY_MASK_TRAIL_BYTE` is
/// non-zero for continuation bytes.
///
/// | Bytes       | Entry                    |
/// |-------------|--------------------------|
/// | `0x00-0x7F` | 1                        |
/// | `0x80-0xBF` | 0, trail flag            |
/// | `0xC0-0xC1` | 0 (always overlong)      |
/// | `0xC2-0xDF` | 2                        |
/// | `0xE0-0xEF` | 3                        |
/// | `0xF0-0xF4` | 4                        |
/// | `0xF5-0xFF` | 0 (above U+10FFFF)       |
///
/// Table size: 256 bytes
pub static UTF8_CLASSIFY_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut byte = 0usize;
    while byte < 256 {
        table[byte] = match byte as u8 {
            0x00..=0x7F => 1,
            0x80..=0xBF => UTF8_CLASSIFY_MASK_TRAIL_BYTE,
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => 0,
        };
        byte += 1;
    }
    table
};

/// Number of bytes in the sequence started by `lead`, or 0 if `lead` can
/// never begin a valid sequence.
#[inline]
pub fn bytes_of_lead(lead: u8) -> usize {
    (UTF8_CLASSIFY_TABLE[lead as usize] & UTF8_CLASSIFY_MASK_OCTET_COUNT) as usize
}

/// Returns true if `byte` can only appear as a continuation byte.
#[inline]
pub fn is_trail_byte(byte: u8) -> bool {
    (UTF8_CLASSIFY_TABLE[byte as usize] & UTF8_CLASSIFY_MASK_TRAIL_BYTE) != 0
}
