//! Value marshaling over a [`Stream`].
//!
//! Wire format, per type category:
//!
//! ```text
//! scalar   fixed-width native-order bytes, verbatim
//! string   u32 count (native order) + that many raw bytes, no terminator
//! tuple    each element in declared order, no separators
//! array    u32 count (native order) + each element in index order
//! ```
//!
//! The structural recursion is the same one [`crate::tag`] uses for
//! derivation, but the two never touch: marshaling never inspects a tag
//! string, derivation never touches the stream.
//!
//! No endian normalization is performed — both link ends are assumed to
//! share platform conventions (a documented serial-link limitation, not
//! a defect to silently fix). No operation retries: each needed span is
//! requested from the stream exactly once, and a short count surfaces as
//! a typed error with both requested and actual byte counts.

use alloc::ffi::CString;
use alloc::string::String;
use alloc::vec::Vec;
use core::ffi::CStr;

use log::warn;

use crate::error::{Error, Result};
use crate::stream::Stream;

/// Width of every embedded count field: string length prefixes and
/// array element counts. Fixed at 32 bits; both link ends must agree.
pub const COUNT_WIDTH: usize = 4;

/// Serializes a value's bytes to a stream.
pub trait Marshal {
    fn write_to<S: Stream>(&self, stream: &mut S) -> Result<()>;
}

/// Deserializes a value's bytes from a stream.
///
/// Reads return by value; heap-backed buffers (e.g. the [`CString`]
/// produced for a pointer-representation string) are owned by the
/// caller from the moment the read returns.
pub trait Unmarshal: Sized {
    fn read_from<S: Stream>(stream: &mut S) -> Result<Self>;
}

/// Marshal `value` to `stream`.
pub fn write<S: Stream, T: Marshal + ?Sized>(stream: &mut S, value: &T) -> Result<()> {
    value.write_to(stream)
}

/// Unmarshal a `T` from `stream`.
pub fn read<T: Unmarshal, S: Stream>(stream: &mut S) -> Result<T> {
    T::read_from(stream)
}

/// Release a heap-backed string buffer produced by a read.
///
/// Reads hand the buffer to the caller as an owned [`CString`], so the
/// double-free and leak classes of the raw-pointer protocol cannot
/// occur; this consuming release is the explicit end of that ownership.
pub fn release(s: CString) {
    drop(s);
}

// ── Stream helpers ───────────────────────────────────────────

pub(crate) fn write_all<S: Stream>(stream: &mut S, bytes: &[u8]) -> Result<()> {
    let accepted = stream.write(bytes)?;
    if accepted < bytes.len() {
        return Err(Error::ShortWrite {
            requested: bytes.len(),
            accepted,
        });
    }
    Ok(())
}

pub(crate) fn read_exact<S: Stream>(stream: &mut S, buf: &mut [u8]) -> Result<()> {
    let got = stream.read(buf)?;
    if got < buf.len() {
        return Err(Error::ShortRead {
            requested: buf.len(),
            got,
        });
    }
    Ok(())
}

fn write_count<S: Stream>(stream: &mut S, count: usize) -> Result<()> {
    let n = u32::try_from(count).map_err(|_| Error::Oversize { len: count })?;
    write_all(stream, &n.to_ne_bytes())
}

fn read_count<S: Stream>(stream: &mut S) -> Result<usize> {
    let mut buf = [0u8; COUNT_WIDTH];
    read_exact(stream, &mut buf)?;
    Ok(u32::from_ne_bytes(buf) as usize)
}

/// Span size for string payload reads. Growing the buffer one span at a
/// time keeps a corrupt length prefix from forcing a giant allocation
/// before the stream runs dry.
const PAYLOAD_SPAN: usize = 4096;

fn read_payload<S: Stream>(stream: &mut S, len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut remaining = len;
    while remaining > 0 {
        let span = remaining.min(PAYLOAD_SPAN);
        let start = buf.len();
        buf.try_reserve(span)
            .map_err(|_| Error::Alloc { requested: len })?;
        buf.resize(start + span, 0);
        read_exact(stream, &mut buf[start..])?;
        remaining -= span;
    }
    Ok(buf)
}

// ── Scalars ──────────────────────────────────────────────────

macro_rules! scalar_marshal {
    ($($ty:ty),*) => {
        $(
            impl Marshal for $ty {
                fn write_to<S: Stream>(&self, stream: &mut S) -> Result<()> {
                    write_all(stream, &self.to_ne_bytes())
                }
            }

            impl Unmarshal for $ty {
                fn read_from<S: Stream>(stream: &mut S) -> Result<Self> {
                    let mut buf = [0u8; core::mem::size_of::<$ty>()];
                    read_exact(stream, &mut buf)?;
                    Ok(<$ty>::from_ne_bytes(buf))
                }
            }
        )*
    };
}

scalar_marshal!(i8, u8, i16, u16, i32, u32, isize, usize, i64, u64, f32, f64);

impl Marshal for bool {
    fn write_to<S: Stream>(&self, stream: &mut S) -> Result<()> {
        write_all(stream, &[u8::from(*self)])
    }
}

impl Unmarshal for bool {
    fn read_from<S: Stream>(stream: &mut S) -> Result<Self> {
        let mut buf = [0u8; 1];
        read_exact(stream, &mut buf)?;
        Ok(buf[0] != 0)
    }
}

// A char is its 4-byte Unicode scalar value on the wire; one-byte
// character data belongs to i8/u8.
impl Marshal for char {
    fn write_to<S: Stream>(&self, stream: &mut S) -> Result<()> {
        write_all(stream, &u32::from(*self).to_ne_bytes())
    }
}

impl Unmarshal for char {
    fn read_from<S: Stream>(stream: &mut S) -> Result<Self> {
        let v = u32::read_from(stream)?;
        char::from_u32(v).ok_or(Error::Char(v))
    }
}

// ── Strings ──────────────────────────────────────────────────

impl Marshal for str {
    fn write_to<S: Stream>(&self, stream: &mut S) -> Result<()> {
        write_count(stream, self.len())?;
        write_all(stream, self.as_bytes())
    }
}

impl Marshal for String {
    fn write_to<S: Stream>(&self, stream: &mut S) -> Result<()> {
        self.as_str().write_to(stream)
    }
}

impl Unmarshal for String {
    fn read_from<S: Stream>(stream: &mut S) -> Result<Self> {
        let len = read_count(stream)?;
        let buf = read_payload(stream, len)?;
        String::from_utf8(buf).map_err(|e| Error::Utf8(e.utf8_error()))
    }
}

impl Marshal for CStr {
    fn write_to<S: Stream>(&self, stream: &mut S) -> Result<()> {
        let bytes = self.to_bytes();
        write_count(stream, bytes.len())?;
        write_all(stream, bytes)
    }
}

impl Marshal for CString {
    fn write_to<S: Stream>(&self, stream: &mut S) -> Result<()> {
        self.as_c_str().write_to(stream)
    }
}

impl Unmarshal for CString {
    fn read_from<S: Stream>(stream: &mut S) -> Result<Self> {
        let len = read_count(stream)?;
        let mut buf = read_payload(stream, len)?;
        // One extra byte for the in-memory terminator; the wire carries none.
        buf.try_reserve_exact(1)
            .map_err(|_| Error::Alloc {
                requested: len.saturating_add(1),
            })?;
        buf.push(0);
        CString::from_vec_with_nul(buf).map_err(|_| Error::Nul)
    }
}

impl<const N: usize> Marshal for heapless::String<N> {
    fn write_to<S: Stream>(&self, stream: &mut S) -> Result<()> {
        self.as_str().write_to(stream)
    }
}

impl<const N: usize> Unmarshal for heapless::String<N> {
    fn read_from<S: Stream>(stream: &mut S) -> Result<Self> {
        let len = read_count(stream)?;
        if len > N {
            return Err(Error::Capacity { needed: len, cap: N });
        }
        let mut raw = [0u8; N];
        read_exact(stream, &mut raw[..len])?;
        let text = core::str::from_utf8(&raw[..len]).map_err(Error::Utf8)?;
        let mut out = heapless::String::new();
        out.push_str(text)
            .map_err(|()| Error::Capacity { needed: len, cap: N })?;
        Ok(out)
    }
}

/// Borrowed values marshal as the pointee.
impl<T: Marshal + ?Sized> Marshal for &T {
    fn write_to<S: Stream>(&self, stream: &mut S) -> Result<()> {
        (**self).write_to(stream)
    }
}

// ── Tuples ───────────────────────────────────────────────────

impl Marshal for () {
    fn write_to<S: Stream>(&self, _stream: &mut S) -> Result<()> {
        Ok(())
    }
}

impl Unmarshal for () {
    fn read_from<S: Stream>(_stream: &mut S) -> Result<Self> {
        Ok(())
    }
}

macro_rules! tuple_marshal {
    ($($elem:ident : $idx:tt),+) => {
        impl<$($elem: Marshal),+> Marshal for ($($elem,)+) {
            fn write_to<S: Stream>(&self, stream: &mut S) -> Result<()> {
                $(self.$idx.write_to(stream)?;)+
                Ok(())
            }
        }

        impl<$($elem: Unmarshal),+> Unmarshal for ($($elem,)+) {
            fn read_from<S: Stream>(stream: &mut S) -> Result<Self> {
                Ok(($($elem::read_from(stream)?,)+))
            }
        }
    };
}

tuple_marshal!(E1: 0);
tuple_marshal!(E1: 0, E2: 1);
tuple_marshal!(E1: 0, E2: 1, E3: 2);
tuple_marshal!(E1: 0, E2: 1, E3: 2, E4: 3);
tuple_marshal!(E1: 0, E2: 1, E3: 2, E4: 3, E5: 4);
tuple_marshal!(E1: 0, E2: 1, E3: 2, E4: 3, E5: 4, E6: 5);
tuple_marshal!(E1: 0, E2: 1, E3: 2, E4: 3, E5: 4, E6: 5, E7: 6);
tuple_marshal!(E1: 0, E2: 1, E3: 2, E4: 3, E5: 4, E6: 5, E7: 6, E8: 7);

// ── Fixed arrays ─────────────────────────────────────────────

impl<T: Marshal, const N: usize> Marshal for [T; N] {
    fn write_to<S: Stream>(&self, stream: &mut S) -> Result<()> {
        write_count(stream, N)?;
        for item in self {
            item.write_to(stream)?;
        }
        Ok(())
    }
}

impl<T: Unmarshal, const N: usize> Unmarshal for [T; N] {
    fn read_from<S: Stream>(stream: &mut S) -> Result<Self> {
        let got = read_count(stream)?;
        if got != N {
            warn!("array count mismatch: expected {N}, got {got}");
            return Err(Error::CountMismatch { expected: N, got });
        }
        let mut items = Vec::new();
        items
            .try_reserve_exact(N)
            .map_err(|_| Error::Alloc { requested: N })?;
        for _ in 0..N {
            items.push(T::read_from(stream)?);
        }
        // Exactly N elements were pushed above.
        Ok(items.try_into().unwrap_or_else(|_| unreachable!()))
    }
}

// ── Tests ────────────────────────────────────────────────────
