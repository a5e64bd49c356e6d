//! Property tests over arbitrary byte strings and UTF-16 sequences.

use proptest::prelude::*;
use uniconv::text::classify::classify;
use uniconv::text::utf16::{utf16_from_utf8_vec, utf16_length, utf8_from_utf16_vec, utf8_length};
use uniconv::text::utf32::{utf32_from_utf8_vec, utf32_length};
use uniconv::text::utf8::{fix_invalid_utf8, is_valid_utf8, validate_utf8};
use uniconv::utf8_position_from_utf16_position;

fn some_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

/// Bytes biased towards lead and continuation bytes.
fn utf8_ish_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            0x00..0x80u8,
            0x80..0xC0u8,
            0xC0..0xE0u8,
            0xE0..0xF0u8,
            0xF0..=0xFFu8,
        ],
        0..64,
    )
}

fn some_units() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(
        prop_oneof![any::<u16>(), 0xD800..0xE000u16],
        0..32,
    )
}

proptest! {
    #[test]
    fn validator_agrees_with_std(bytes in utf8_ish_bytes()) {
        prop_assert_eq!(is_valid_utf8(&bytes), std::str::from_utf8(&bytes).is_ok());
        prop_assert_eq!(validate_utf8(&bytes).is_ok(), std::str::from_utf8(&bytes).is_ok());
    }

    #[test]
    fn first_error_offset_agrees_with_std(bytes in utf8_ish_bytes()) {
        if let (Err(ours), Err(std_err)) = (validate_utf8(&bytes), std::str::from_utf8(&bytes)) {
            // std reports the end of the valid prefix; the failing sequence
            // starts there, and the offending byte is at or after it.
            prop_assert!(ours.offset >= std_err.valid_up_to());
            prop_assert!(ours.offset < bytes.len());
        }
    }

    #[test]
    fn classify_width_is_bounded(bytes in utf8_ish_bytes()) {
        prop_assume!(!bytes.is_empty());
        let class = classify(&bytes);
        prop_assert!(class.width >= 1);
        prop_assert!(class.width <= 4);
        prop_assert!(class.width <= bytes.len());
    }

    #[test]
    fn repaired_text_is_valid(bytes in some_bytes()) {
        let repaired = fix_invalid_utf8(&bytes);
        prop_assert!(is_valid_utf8(repaired.as_bytes()));
    }

    #[test]
    fn repair_is_idempotent(bytes in utf8_ish_bytes()) {
        let once = fix_invalid_utf8(&bytes);
        let twice = fix_invalid_utf8(once.as_bytes());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn repair_keeps_valid_strings(s in any::<String>()) {
        prop_assert_eq!(fix_invalid_utf8(s.as_bytes()), s);
    }

    #[test]
    fn lengths_match_converted_output(bytes in utf8_ish_bytes()) {
        prop_assert_eq!(utf16_from_utf8_vec(&bytes).len(), utf16_length(&bytes));
        prop_assert_eq!(utf32_from_utf8_vec(&bytes).len(), utf32_length(&bytes));
    }

    #[test]
    fn utf16_conversion_matches_std(s in any::<String>()) {
        let expected: Vec<u16> = s.encode_utf16().collect();
        prop_assert_eq!(utf16_from_utf8_vec(s.as_bytes()), expected);
        let scalars: Vec<u32> = s.chars().map(u32::from).collect();
        prop_assert_eq!(utf32_from_utf8_vec(s.as_bytes()), scalars);
    }

    #[test]
    fn utf8_from_utf16_matches_std_lossy(units in some_units()) {
        let expected = String::from_utf16_lossy(&units);
        let converted = utf8_from_utf16_vec(&units);
        prop_assert_eq!(converted.len(), utf8_length(&units));
        prop_assert_eq!(converted, expected.into_bytes());
    }

    #[test]
    fn round_trip_through_utf16(s in any::<String>()) {
        let units = utf16_from_utf8_vec(s.as_bytes());
        prop_assert_eq!(utf8_from_utf16_vec(&units), s.into_bytes());
    }

    #[test]
    fn position_mapping_is_monotonic(bytes in utf8_ish_bytes()) {
        let total = utf16_length(&bytes);
        let mut previous = 0;
        for position in 0..=total + 1 {
            let mapped = utf8_position_from_utf16_position(&bytes, position);
            prop_assert!(mapped >= previous);
            prop_assert!(mapped <= bytes.len());
            previous = mapped;
        }
        prop_assert_eq!(utf8_position_from_utf16_position(&bytes, total), bytes.len());
    }

    #[test]
    fn position_mapping_matches_std_boundaries(s in any::<String>()) {
        let mut utf16 = 0;
        for (offset, c) in s.char_indices() {
            prop_assert_eq!(utf8_position_from_utf16_position(s.as_bytes(), utf16), offset);
            utf16 += c.len_utf16();
        }
    }
}
