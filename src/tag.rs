//! Wire tag grammar and compile-time tag derivation.
//!
//! Every marshalable type maps to a tag: a single designator byte for
//! scalars and strings, a bracketed composite for tuples and arrays.
//! Derivation is a pure function of the static type — no stream access,
//! no runtime branching, no failure mode. A type without a [`TypeTag`]
//! impl simply does not compile, which is the whole error story for
//! this operation.
//!
//! Grammar:
//!
//! ```text
//! scalar  := '?' | 'c' | 'b' | 'B' | 'h' | 'H' | 'i' | 'I'
//!          | 'l' | 'L' | 'q' | 'Q' | 'f' | 'd'
//! string  := 's'
//! tuple   := '(' tag* ')'
//! array   := '[' rawcount(u32, native order) tag ']'
//! ```
//!
//! The array production embeds one binary field (the element count as
//! raw native-order `u32` bytes) inside an otherwise textual tag; the
//! element tag appears exactly once regardless of the count, since
//! arrays are homogeneous.
//!
//! `isize`/`usize` carry the `l`/`L` pair and are the only types whose
//! wire width varies per build target — resolved once per target by the
//! type system, never per call.

use alloc::ffi::CString;
use alloc::string::String;
use alloc::vec::Vec;
use core::ffi::CStr;

/// Tag designator bytes.
pub const BOOL: u8 = b'?';
pub const CHAR: u8 = b'c';
pub const I8: u8 = b'b';
pub const U8: u8 = b'B';
pub const I16: u8 = b'h';
pub const U16: u8 = b'H';
pub const I32: u8 = b'i';
pub const U32: u8 = b'I';
pub const ISIZE: u8 = b'l';
pub const USIZE: u8 = b'L';
pub const I64: u8 = b'q';
pub const U64: u8 = b'Q';
pub const F32: u8 = b'f';
pub const F64: u8 = b'd';
pub const STRING: u8 = b's';
pub const TUPLE_OPEN: u8 = b'(';
pub const TUPLE_CLOSE: u8 = b')';
pub const ARRAY_OPEN: u8 = b'[';
pub const ARRAY_CLOSE: u8 = b']';

/// Derives a type's wire tag at definition time.
///
/// Two compilation units deriving a tag for the identical type produce
/// byte-identical output; cross-process signature matching relies on it.
pub trait TypeTag {
    /// True only for the unit type. A unit return emits no tag in a
    /// signature; in every other position `()` derives `"()"`.
    const IS_UNIT: bool = false;

    /// Append this type's tag bytes to `buf`.
    fn push_tag(buf: &mut Vec<u8>);
}

/// The complete tag of `T`, as freshly derived bytes.
pub fn tag_of<T: TypeTag + ?Sized>() -> Vec<u8> {
    let mut buf = Vec::new();
    T::push_tag(&mut buf);
    buf
}

macro_rules! scalar_tags {
    ($($ty:ty => $tag:expr,)*) => {
        $(
            impl TypeTag for $ty {
                fn push_tag(buf: &mut Vec<u8>) {
                    buf.push($tag);
                }
            }
        )*
    };
}

scalar_tags! {
    bool => BOOL,
    char => CHAR,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    isize => ISIZE,
    usize => USIZE,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

// String-like types are wire-indistinguishable; only the in-memory
// representation differs.
macro_rules! string_tags {
    ($($ty:ty,)*) => {
        $(
            impl TypeTag for $ty {
                fn push_tag(buf: &mut Vec<u8>) {
                    buf.push(STRING);
                }
            }
        )*
    };
}

string_tags! {
    str,
    String,
    CStr,
    CString,
}

impl<const N: usize> TypeTag for heapless::String<N> {
    fn push_tag(buf: &mut Vec<u8>) {
        buf.push(STRING);
    }
}

/// Borrowed parameters derive the pointee's tag.
impl<T: TypeTag + ?Sized> TypeTag for &T {
    fn push_tag(buf: &mut Vec<u8>) {
        T::push_tag(buf);
    }
}

impl TypeTag for () {
    const IS_UNIT: bool = true;

    fn push_tag(buf: &mut Vec<u8>) {
        buf.push(TUPLE_OPEN);
        buf.push(TUPLE_CLOSE);
    }
}

macro_rules! tuple_tags {
    ($($elem:ident),+) => {
        impl<$($elem: TypeTag),+> TypeTag for ($($elem,)+) {
            fn push_tag(buf: &mut Vec<u8>) {
                buf.push(TUPLE_OPEN);
                $($elem::push_tag(buf);)+
                buf.push(TUPLE_CLOSE);
            }
        }
    };
}

tuple_tags!(E1);
tuple_tags!(E1, E2);
tuple_tags!(E1, E2, E3);
tuple_tags!(E1, E2, E3, E4);
tuple_tags!(E1, E2, E3, E4, E5);
tuple_tags!(E1, E2, E3, E4, E5, E6);
tuple_tags!(E1, E2, E3, E4, E5, E6, E7);
tuple_tags!(E1, E2, E3, E4, E5, E6, E7, E8);

impl<T: TypeTag, const N: usize> TypeTag for [T; N] {
    fn push_tag(buf: &mut Vec<u8>) {
        buf.push(ARRAY_OPEN);
        buf.extend_from_slice(&(N as u32).to_ne_bytes());
        T::push_tag(buf);
        buf.push(ARRAY_CLOSE);
    }
}

// ── Tests ────────────────────────────────────────────────────
