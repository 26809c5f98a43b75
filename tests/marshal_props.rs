//! Property tests for marshaling robustness.
//!
//! Round-trips arbitrary values through an in-memory stream and feeds
//! arbitrary garbage into the decoder, checking value equality and
//! typed-error (never panic) behaviour.

use std::ffi::CString;

use proptest::prelude::*;
use tagwire::{Error, MemoryStream, Stream, read, release, write};

// ── Round-trips ──────────────────────────────────────────────

proptest! {
    #[test]
    fn string_round_trip(text in ".*") {
        let mut s = MemoryStream::new();
        write(&mut s, text.as_str()).unwrap();

        let back: String = read(&mut s).unwrap();
        prop_assert_eq!(back, text);
        prop_assert_eq!(s.available(), 0);
    }

    #[test]
    fn scalar_tuple_round_trip(
        flag in any::<bool>(),
        word in any::<u16>(),
        big in any::<i64>(),
        ratio in -1.0e12f64..1.0e12f64, // NaN never compares equal
        symbol in any::<char>(),
    ) {
        let value = (flag, word, big, ratio, symbol);
        let mut s = MemoryStream::new();
        write(&mut s, &value).unwrap();

        let back: (bool, u16, i64, f64, char) = read(&mut s).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn nested_composite_round_trip(
        inner in any::<(u8, String)>(),
        samples in any::<[i32; 3]>(),
    ) {
        let mut s = MemoryStream::new();
        write(&mut s, &(&inner, samples)).unwrap();

        let back: ((u8, String), [i32; 3]) = read(&mut s).unwrap();
        prop_assert_eq!(back.0, inner);
        prop_assert_eq!(back.1, samples);
    }

    /// C-string reads transfer an owned buffer; content must survive the
    /// trip and release must consume it cleanly.
    #[test]
    fn c_string_round_trip(bytes in proptest::collection::vec(1u8..=255u8, 0..=64)) {
        let original = CString::new(bytes).unwrap();

        let mut s = MemoryStream::new();
        write(&mut s, original.as_c_str()).unwrap();

        let back: CString = read(&mut s).unwrap();
        prop_assert_eq!(back.as_c_str(), original.as_c_str());
        release(back);
    }
}

// ── Decoder robustness ───────────────────────────────────────

proptest! {
    /// Arbitrary bytes must decode to a value or a typed error, never a
    /// panic, for every type category.
    #[test]
    fn garbage_decodes_to_typed_errors(
        bytes in proptest::collection::vec(any::<u8>(), 0..=128),
    ) {
        let mut s = MemoryStream::new();
        s.write(&bytes).unwrap();
        if let Err(e) = read::<(u32, String), _>(&mut s) {
            let _: Error = e;
        }

        let mut s = MemoryStream::new();
        s.write(&bytes).unwrap();
        if let Err(e) = read::<[i16; 5], _>(&mut s) {
            let _: Error = e;
        }

        let mut s = MemoryStream::new();
        s.write(&bytes).unwrap();
        if let Err(e) = read::<(char, CString), _>(&mut s) {
            let _: Error = e;
        }

        let mut s = MemoryStream::new();
        s.write(&bytes).unwrap();
        if let Err(e) = read::<heapless::String<8>, _>(&mut s) {
            let _: Error = e;
        }
    }
}
