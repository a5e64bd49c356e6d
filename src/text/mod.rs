//! Text encoding conversion and validation.
//!
//! - [`classify`] - classification of the UTF-8 sequence at a position
//! - [`utf8`] - validation, repair, single scalar encode/decode
//! - [`utf16`] - UTF-8 <-> UTF-16 length calculation and conversion
//! - [`utf32`] - UTF-8 -> UTF-32 length calculation and conversion
//! - [`position`] - UTF-16 offset to UTF-8 offset mapping
//! - [`separator`] - U+2028 / U+2029 / U+0085 detection
//!
//! ```
//! use uniconv::text::utf8::{fix_invalid_utf8, validate_utf8, Utf8ErrorKind};
//!
//! let input = b"caf\xC3\xA9 \xC0\x80";
//! let err = validate_utf8(input).unwrap_err();
//! assert_eq!(err.kind, Utf8ErrorKind::OverlongEncoding);
//! assert_eq!(err.offset, 6);
//!
//! assert_eq!(fix_invalid_utf8(input), "café \u{FFFD}\u{FFFD}");
//! ```

pub mod classify;
pub mod position;
pub mod separator;
pub mod utf16;
pub mod utf32;
pub mod utf8;

// Re-export commonly used types
pub use classify::{classify, classify_multi, Utf8Class};
pub use position::utf8_position_from_utf16_position;
pub use utf16::{utf16_from_utf8, utf16_length, utf8_from_utf16, utf8_length};
pub use utf32::{utf32_from_utf8, utf32_length};
pub use utf8::{fix_invalid_utf8, is_valid_utf8, validate_utf8, Utf8Error, Utf8ErrorKind};
