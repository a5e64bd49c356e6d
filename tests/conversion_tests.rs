//! Tests for the public conversion API.

use uniconv::table::{
    UTF8_CLASSIFY_MASK_OCTET_COUNT, UTF8_CLASSIFY_MASK_TRAIL_BYTE, UTF8_CLASSIFY_TABLE,
};
use uniconv::text::classify::{classify, draw_bytes, Utf8Class};
use uniconv::text::separator::{is_line_separator, is_nel, is_paragraph_separator, is_separator};
use uniconv::text::utf16::{
    utf16_from_utf32_character, utf16_from_utf8, utf16_from_utf8_vec, utf16_length,
    utf8_from_utf16, utf8_from_utf16_vec, utf8_length,
};
use uniconv::text::utf32::{utf32_from_utf8, utf32_from_utf8_vec, utf32_length};
use uniconv::text::utf8::{
    decode_utf8, fix_invalid_utf8, is_valid_utf8, utf8_from_utf32_character, validate_utf8,
    Utf8ErrorKind,
};
use uniconv::{utf8_position_from_utf16_position, ConversionError};

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_table_matches_classifier_for_every_lead_byte() {
    for lead in 0u8..=255 {
        let entry = UTF8_CLASSIFY_TABLE[lead as usize];
        let count = (entry & UTF8_CLASSIFY_MASK_OCTET_COUNT) as usize;
        let trail = entry & UTF8_CLASSIFY_MASK_TRAIL_BYTE != 0;
        assert_eq!(trail, (0x80..=0xBF).contains(&lead), "lead {:#04X}", lead);

        // A lead byte followed by enough continuation bytes for the smallest
        // value of its length is valid with exactly that width.
        if count > 1 {
            let mut seq = vec![lead];
            seq.extend(std::iter::repeat(0xBF).take(count - 1));
            let class = classify(&seq);
            if class.valid {
                assert_eq!(class.width, count, "lead {:#04X}", lead);
            }
        }
    }
}

#[test]
fn test_overlong_nul_is_invalid() {
    assert!(!classify(&[0xC0, 0x80]).valid);
    assert!(!is_valid_utf8(&[0xC0, 0x80]));
}

#[test]
fn test_truncated_three_byte_lead() {
    assert_eq!(classify(&[0xE0]), Utf8Class::invalid(1));
    assert_eq!(classify(&[0xE2, 0x82]), Utf8Class::invalid(2));
}

#[test]
fn test_invalid_width_never_exceeds_input() {
    let cases: [&[u8]; 8] = [
        &[0xF0],
        &[0xF0, 0x9F],
        &[0xF0, 0x9F, 0x98],
        &[0xE2, 0x41, 0x41],
        &[0xF4, 0x90, 0x80, 0x80],
        &[0xED, 0xA0, 0x80],
        &[0x80],
        &[0xFF, 0xFF],
    ];
    for bytes in cases {
        let class = classify(bytes);
        assert!(class.is_invalid(), "{:02X?}", bytes);
        assert!(class.width >= 1 && class.width <= bytes.len(), "{:02X?}", bytes);
    }
}

#[test]
fn test_draw_bytes_steps_one_over_garbage() {
    assert_eq!(draw_bytes("😀".as_bytes()), 4);
    assert_eq!(draw_bytes(&[0xE2, 0x82]), 1);
    assert_eq!(draw_bytes(&[0xFF]), 1);
}

#[test]
fn test_empty_input() {
    assert_eq!(classify(&[]), Utf8Class::invalid(0));
    assert!(is_valid_utf8(b""));
    assert_eq!(fix_invalid_utf8(b""), "");
    assert_eq!(utf16_length(b""), 0);
    assert_eq!(utf32_length(b""), 0);
    assert_eq!(utf8_length(&[]), 0);
    assert_eq!(utf8_position_from_utf16_position(b"", 3), 0);
}

// ============================================================================
// Validation and repair
// ============================================================================

#[test]
fn test_validator_agrees_with_std() {
    let cases: [&[u8]; 10] = [
        b"plain ascii",
        "café 日本 😀".as_bytes(),
        b"\xC0\x80",
        b"\xED\xA0\x80",
        b"\xF4\x90\x80\x80",
        b"\xEF\xBF\xBF",
        b"abc\xE2\x82",
        b"\x80abc",
        b"\xF5\x80\x80\x80",
        b"\xF0\x9F\x98\x80",
    ];
    for bytes in cases {
        assert_eq!(
            is_valid_utf8(bytes),
            std::str::from_utf8(bytes).is_ok(),
            "{:02X?}",
            bytes
        );
    }
}

#[test]
fn test_validate_reports_first_error() {
    let err = validate_utf8(b"line one\nok \xED\xA0\x80").unwrap_err();
    assert_eq!(err.kind, Utf8ErrorKind::SurrogateCodepoint);
    assert_eq!(err.offset, 12);
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 4);
}

#[test]
fn test_repair_replaces_each_bad_byte() {
    assert_eq!(fix_invalid_utf8(b"a\xFFb\xC0\x80c"), "a\u{FFFD}b\u{FFFD}\u{FFFD}c");
    assert_eq!(fix_invalid_utf8(b"\xF0\x9F\x98"), "\u{FFFD}\u{FFFD}\u{FFFD}");
}

#[test]
fn test_repair_keeps_valid_text() {
    let s = "Hello, world! Café résumé naïve. 日本語 🎉🚀";
    assert_eq!(fix_invalid_utf8(s.as_bytes()), s);
}

#[test]
fn test_noncharacters_are_valid() {
    assert!(is_valid_utf8("\u{FFFE}\u{FFFF}\u{1FFFF}\u{10FFFF}".as_bytes()));
}

// ============================================================================
// Conversion
// ============================================================================

#[test]
fn test_surrogate_pair_round_trip() {
    let pair = [0xD83Du16, 0xDE00];
    let utf8 = utf8_from_utf16_vec(&pair);
    assert_eq!(utf8, [0xF0, 0x9F, 0x98, 0x80]);
    assert_eq!(utf32_from_utf8_vec(&utf8), [0x1F600]);
    assert_eq!(utf16_from_utf8_vec(&utf8), pair);
}

#[test]
fn test_unpaired_surrogates_become_replacement() {
    assert_eq!(utf8_from_utf16_vec(&[0x41, 0xD800, 0x42]), "A\u{FFFD}B".as_bytes());
    assert_eq!(utf8_from_utf16_vec(&[0xDC00, 0xD800]), "\u{FFFD}\u{FFFD}".as_bytes());
    assert_eq!(utf8_length(&[0xDC00, 0xD800]), 6);
}

#[test]
fn test_exact_capacity_succeeds() {
    let src = "a€😀".as_bytes();
    let mut units = vec![0u16; utf16_length(src)];
    assert_eq!(utf16_from_utf8(src, &mut units), Ok(4));
    assert_eq!(units, [0x61, 0x20AC, 0xD83D, 0xDE00]);

    let mut scalars = vec![0u32; utf32_length(src)];
    assert_eq!(utf32_from_utf8(src, &mut scalars), Ok(3));
    assert_eq!(scalars, [0x61, 0x20AC, 0x1F600]);

    let mut bytes = vec![0u8; utf8_length(&units)];
    assert_eq!(utf8_from_utf16(&units, &mut bytes), Ok(src.len()));
    assert_eq!(bytes, src);
}

#[test]
fn test_undersized_destination_is_an_error() {
    let src = "a€😀".as_bytes();

    let mut units = [0u16; 3];
    assert_eq!(
        utf16_from_utf8(src, &mut units),
        Err(ConversionError::Capacity {
            required: 4,
            capacity: 3
        })
    );
    // Characters that fit were written
    assert_eq!(units[..2], [0x61, 0x20AC]);

    let mut scalars = [0u32; 2];
    assert_eq!(
        utf32_from_utf8(src, &mut scalars),
        Err(ConversionError::Capacity {
            required: 3,
            capacity: 2
        })
    );

    let mut bytes = [0u8; 7];
    assert_eq!(
        utf8_from_utf16(&[0x61, 0x20AC, 0xD83D, 0xDE00], &mut bytes),
        Err(ConversionError::Capacity {
            required: 8,
            capacity: 7
        })
    );
}

#[test]
fn test_length_matches_output_for_invalid_input() {
    let src = b"ok\xE2\x82 \xF0\x9F\x98\x80 \xFF\xC0\xAF";
    assert_eq!(utf16_from_utf8_vec(src).len(), utf16_length(src));
    assert_eq!(utf32_from_utf8_vec(src).len(), utf32_length(src));
    assert_eq!(
        utf32_from_utf8_vec(src),
        [0x6F, 0x6B, 0xFFFD, 0xFFFD, 0x20, 0x1F600, 0x20, 0xFFFD, 0xFFFD, 0xFFFD]
    );
}

#[test]
fn test_single_scalar_encoders() {
    assert_eq!(utf8_from_utf32_character(0x20AC), Ok(([0xE2, 0x82, 0xAC, 0], 3)));
    assert_eq!(utf16_from_utf32_character(0x10FFFF), Ok(([0xDBFF, 0xDFFF], 2)));
    assert_eq!(
        utf8_from_utf32_character(0xD800),
        Err(ConversionError::SurrogateScalar { value: 0xD800 })
    );
    assert_eq!(
        utf16_from_utf32_character(0x110000),
        Err(ConversionError::ScalarOutOfRange { value: 0x110000 })
    );
}

#[test]
fn test_decode_utf8() {
    assert_eq!(decode_utf8("€x".as_bytes()), Some((0x20AC, 3)));
    assert_eq!(decode_utf8(&[0xE2, 0x82]), None);
}

// ============================================================================
// Positions and separators
// ============================================================================

#[test]
fn test_position_mapping_across_widths() {
    let text = "aé€😀z".as_bytes();
    let expected = [(0, 0), (1, 1), (2, 3), (3, 6), (5, 10), (6, 11)];
    for (utf16, utf8) in expected {
        assert_eq!(utf8_position_from_utf16_position(text, utf16), utf8, "utf16 {}", utf16);
    }
}

#[test]
fn test_separators() {
    let text = "a\u{2028}b\u{2029}c\u{85}d".as_bytes();
    assert!(is_line_separator(&text[1..]));
    assert!(is_separator(&text[1..]));
    assert!(is_paragraph_separator(&text[5..]));
    assert!(is_separator(&text[5..]));
    assert!(is_nel(&text[9..]));
    assert!(!is_separator(&text[9..]));

    // Truncated at the end of the buffer
    assert!(!is_line_separator(&[0xE2, 0x80]));
    assert!(!is_nel(&[0xC2]));
    assert!(!is_separator(&[]));
}
