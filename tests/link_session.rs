//! End-to-end session over an in-memory link.
//!
//! Plays both ends of a link the way a device and host would: the device
//! advertises callable signatures, then values for a call cross the wire
//! and come back.

use std::ffi::CString;

use tagwire::{MemoryStream, Stream, method_signature, read, release, signature, write};

struct Scrubber;

impl Scrubber {
    fn set_flow(&mut self, _channel: u8, _rate: f32) -> i16 {
        0
    }
}

fn describe(_name: &str, _limits: [u16; 2]) {}

#[test]
fn advertise_then_call() {
    let mut link = MemoryStream::new();
    link.open(9600).unwrap();

    // Device advertises its callables; signatures concatenate with no
    // inter-signature delimiter.
    method_signature(&mut link, Scrubber::set_flow as fn(&mut Scrubber, u8, f32) -> i16)
        .unwrap();
    signature(&mut link, describe as fn(&'static str, [u16; 2])).unwrap();

    let mut advertised = b"h: B f: s [".to_vec();
    advertised.extend_from_slice(&2u32.to_ne_bytes());
    advertised.extend_from_slice(b"H]");
    assert_eq!(link.as_bytes(), advertised);
    link.clear();

    // Host marshals the call arguments for set_flow.
    write(&mut link, &(3u8, 0.25f32)).unwrap();
    assert_eq!(link.available(), 1 + 4);

    let (channel, rate): (u8, f32) = read(&mut link).unwrap();
    assert_eq!(channel, 3);
    assert_eq!(rate, 0.25);

    // Device marshals the return value back.
    write(&mut link, &0i16).unwrap();
    assert_eq!(read::<i16, _>(&mut link).unwrap(), 0);
    assert_eq!(link.available(), 0);
}

#[test]
fn string_argument_ownership_crosses_the_link() {
    let mut link = MemoryStream::new();
    link.open(9600).unwrap();

    write(&mut link, "tank A").unwrap();
    write(&mut link, CString::new("tank B").unwrap().as_c_str()).unwrap();

    // Owning representation reads into a growable string.
    let owned: String = read(&mut link).unwrap();
    assert_eq!(owned, "tank A");

    // Pointer representation hands the caller an owned buffer.
    let handed: CString = read(&mut link).unwrap();
    assert_eq!(handed.to_bytes(), b"tank B");
    release(handed);

    assert_eq!(link.available(), 0);
}
