//! Errors returned by the converters and single-scalar encoders.
//!
//! Malformed input text is never an error: it is replaced by U+FFFD. These
//! errors only report caller contract violations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A caller contract violation detected by a conversion routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConversionError {
    /// The destination buffer cannot hold the converted text.
    ///
    /// `required` is the full output length for the source, as reported by
    /// the matching length calculator. Both values are in destination units.
    #[error("destination too small: need {required} units, capacity is {capacity}")]
    Capacity { required: usize, capacity: usize },

    /// A surrogate code point (U+D800-U+DFFF) was given where a scalar value
    /// was expected.
    #[error("U+{value:04X} is a surrogate code point, not a scalar value")]
    SurrogateScalar { value: u32 },

    /// A value above U+10FFFF was given where a scalar value was expected.
    #[error("0x{value:X} is above U+10FFFF")]
    ScalarOutOfRange { value: u32 },
}

/// Check that `value` is a Unicode scalar value.
pub(crate) fn check_scalar(value: u32) -> Result<(), ConversionError> {
    if (0xD800..=0xDFFF).contains(&value) {
        log::debug!("rejecting surrogate scalar U+{:04X}", value);
        return Err(ConversionError::SurrogateScalar { value });
    }
    if value > 0x10FFFF {
        log::debug!("rejecting out of range scalar 0x{:X}", value);
        return Err(ConversionError::ScalarOutOfRange { value });
    }
    Ok(())
}
