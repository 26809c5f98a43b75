//! Fuzz target: `read` across every type category
//!
//! Feeds arbitrary bytes into the unmarshaler for scalar, string,
//! tuple and array output types.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Failures are typed `Error` values, never aborts
//! - A successful string read owns its buffer (released without fault)
//!
//! cargo fuzz run fuzz_unmarshal

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::ffi::CString;
use tagwire::{MemoryStream, Stream, read, release};

fuzz_target!(|data: &[u8]| {
    let mut s = MemoryStream::new();
    let _ = s.write(data);
    let _ = read::<(bool, u32, String), _>(&mut s);

    let mut s = MemoryStream::new();
    let _ = s.write(data);
    let _ = read::<[i16; 4], _>(&mut s);

    let mut s = MemoryStream::new();
    let _ = s.write(data);
    if let Ok(owned) = read::<CString, _>(&mut s) {
        release(owned);
    }

    let mut s = MemoryStream::new();
    let _ = s.write(data);
    let _ = read::<((char, f64), [u8; 2]), _>(&mut s);
});
