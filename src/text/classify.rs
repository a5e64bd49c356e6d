//! Classification of the UTF-8 sequence at a position in a byte buffer.
//!
//! Every routine here takes the remainder of the buffer as a slice, so the
//! number of bytes actually available is always known and no routine reads
//! past the end of the buffer, even when the buffer ends in the middle of a
//! sequence.
//!
//! ```
//! use uniconv::text::classify::{classify, Utf8Class};
//!
//! assert_eq!(classify(b"A"), Utf8Class::valid(1));
//! assert_eq!(classify("é".as_bytes()), Utf8Class::valid(2));
//!
//! // Overlong encoding of NUL
//! assert!(classify(&[0xC0, 0x80]).is_invalid());
//!
//! // Three byte lead with only one byte available
//! assert_eq!(classify(&[0xE0]), Utf8Class::invalid(1));
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::table::{bytes_of_lead, is_trail_byte};
use crate::text::utf8::Utf8ErrorKind;

/// Result of classifying the sequence at the start of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Utf8Class {
    /// Number of bytes the sequence occupies.
    ///
    /// For an invalid sequence this is never more than the bytes available:
    /// a truncated sequence reports the available length, a sequence with a
    /// bad continuation byte reports the length of its valid prefix, and any
    /// other invalid sequence reports 1.
    pub width: usize,
    /// Whether the sequence is a well-formed encoding of a scalar value.
    pub valid: bool,
}

impl Utf8Class {
    /// A well-formed sequence of `width` bytes.
    pub const fn valid(width: usize) -> Self {
        Self { width, valid: true }
    }

    /// A malformed sequence spanning `width` bytes.
    pub const fn invalid(width: usize) -> Self {
        Self {
            width,
            valid: false,
        }
    }

    #[inline]
    pub const fn is_invalid(&self) -> bool {
        !self.valid
    }
}

/// Details of a malformed sequence, shared by the classifier and the
/// detailed validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Malformed {
    pub kind: Utf8ErrorKind,
    /// Width reported to [`classify_multi`] callers.
    pub width: usize,
    /// Offset of the offending byte from the start of the sequence.
    pub at: usize,
}

impl Malformed {
    const fn at_lead(kind: Utf8ErrorKind) -> Self {
        Self {
            kind,
            width: 1,
            at: 0,
        }
    }
}

/// Returns true if the byte is ASCII (top bit clear).
#[inline(always)]
pub const fn is_ascii(byte: u8) -> bool {
    byte & 0x80 == 0
}

/// Returns true if the scalar value is in the ASCII range.
#[inline(always)]
pub const fn is_ascii_scalar(value: u32) -> bool {
    value < 0x80
}

/// Classify the sequence at the start of `bytes`.
///
/// ASCII bytes short-circuit to width 1 without consulting the lookup table.
/// Everything else is handed to [`classify_multi`]. An empty slice
/// classifies as invalid with width 0.
#[inline]
pub fn classify(bytes: &[u8]) -> Utf8Class {
    match bytes.first() {
        Some(&lead) if is_ascii(lead) => Utf8Class::valid(1),
        _ => classify_multi(bytes),
    }
}

/// Classify a (potentially) multi-byte sequence at the start of `bytes`.
///
/// The sequence is invalid when:
/// - the lead byte can never start a sequence (continuation byte, `0xC0`,
///   `0xC1`, `0xF5-0xFF`)
/// - a byte in a continuation position is not a continuation byte
/// - fewer bytes are available than the lead byte requires
/// - the decoded value is an overlong encoding, a surrogate, or above
///   U+10FFFF
pub fn classify_multi(bytes: &[u8]) -> Utf8Class {
    match scan_sequence(bytes) {
        Ok(width) => Utf8Class::valid(width),
        Err(malformed) => Utf8Class::invalid(malformed.width),
    }
}

/// Like [`classify`] but reports 1 for invalid sequences instead of
/// setting the invalid flag.
///
/// Useful for stepping over text one visual character at a time, where each
/// invalid byte is drawn as its own placeholder.
#[inline]
pub fn draw_bytes(bytes: &[u8]) -> usize {
    let class = classify(bytes);
    if class.valid {
        class.width
    } else {
        1
    }
}

/// Scan the sequence at the start of `bytes`, returning its width or a
/// description of why it is malformed.
pub(crate) fn scan_sequence(bytes: &[u8]) -> Result<usize, Malformed> {
    let Some(&lead) = bytes.first() else {
        return Err(Malformed {
            kind: Utf8ErrorKind::TruncatedSequence,
            width: 0,
            at: 0,
        });
    };

    if is_ascii(lead) {
        return Ok(1);
    }

    let count = bytes_of_lead(lead);
    if count == 0 {
        let kind = match lead {
            0xC0 | 0xC1 => Utf8ErrorKind::OverlongEncoding,
            0xF5..=0xF7 => Utf8ErrorKind::OutOfRangeCodepoint,
            _ => Utf8ErrorKind::InvalidLeadByte,
        };
        return Err(Malformed::at_lead(kind));
    }

    let available = count.min(bytes.len());
    for (i, &byte) in bytes[1..available].iter().enumerate() {
        if !is_trail_byte(byte) {
            return Err(Malformed {
                kind: Utf8ErrorKind::InvalidContinuationByte,
                width: i + 1,
                at: i + 1,
            });
        }
    }

    if available < count {
        return Err(Malformed {
            kind: Utf8ErrorKind::TruncatedSequence,
            width: available,
            at: 0,
        });
    }

    let cp = decode_sequence(bytes, count);
    match count {
        2 => Ok(2),
        3 => {
            if cp < 0x800 {
                Err(Malformed::at_lead(Utf8ErrorKind::OverlongEncoding))
            } else if (0xD800..=0xDFFF).contains(&cp) {
                Err(Malformed::at_lead(Utf8ErrorKind::SurrogateCodepoint))
            } else {
                Ok(3)
            }
        }
        _ => {
            if cp < 0x10000 {
                Err(Malformed::at_lead(Utf8ErrorKind::OverlongEncoding))
            } else if cp > 0x10FFFF {
                Err(Malformed::at_lead(Utf8ErrorKind::OutOfRangeCodepoint))
            } else {
                Ok(4)
            }
        }
    }
}

/// Decode the `width`-byte sequence at the start of `bytes` without
/// validating it. `bytes` must hold at least `width` bytes.
#[inline]
pub(crate) fn decode_sequence(bytes: &[u8], width: usize) -> u32 {
    let b0 = bytes[0] as u32;
    match width {
        1 => b0,
        2 => ((b0 & 0x1F) << 6) | (bytes[1] as u32 & 0x3F),
        3 => ((b0 & 0x0F) << 12) | ((bytes[1] as u32 & 0x3F) << 6) | (bytes[2] as u32 & 0x3F),
        _ => {
            ((b0 & 0x07) << 18)
                | ((bytes[1] as u32 & 0x3F) << 12)
                | ((bytes[2] as u32 & 0x3F) << 6)
                | (bytes[3] as u32 & 0x3F)
        }
    }
}
