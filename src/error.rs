//! Unified error types for the marshaling layer.
//!
//! A single `Error` enum that every operation funnels into, keeping the
//! caller's error handling uniform. All variants are `Copy` so they can be
//! cheaply passed back through an embedded control loop without allocation.
//!
//! Nothing here is retried or masked: every condition propagates to the
//! immediate caller, which may re-request the call at a higher protocol
//! level.

use core::fmt;

use crate::stream::LinkError;

/// Every fallible marshaling operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The stream delivered fewer bytes than the current value needs.
    ShortRead { requested: usize, got: usize },
    /// The stream accepted fewer bytes than the current value needs.
    ShortWrite { requested: usize, accepted: usize },
    /// Heap allocation for a string read could not be satisfied.
    Alloc { requested: usize },
    /// A decoded element count disagrees with the fixed array length.
    CountMismatch { expected: usize, got: usize },
    /// A length does not fit the 32-bit wire count field.
    Oversize { len: usize },
    /// A decoded `char` payload is not a Unicode scalar value.
    Char(u32),
    /// A decoded string payload is not valid UTF-8.
    Utf8(core::str::Utf8Error),
    /// A decoded C-string payload contains an interior NUL byte.
    Nul,
    /// A payload exceeds a fixed-capacity string's capacity.
    Capacity { needed: usize, cap: usize },
    /// The underlying link failed terminally.
    Link(LinkError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortRead { requested, got } => {
                write!(f, "short read: requested {requested} bytes, got {got}")
            }
            Self::ShortWrite {
                requested,
                accepted,
            } => {
                write!(
                    f,
                    "short write: requested {requested} bytes, accepted {accepted}"
                )
            }
            Self::Alloc { requested } => {
                write!(f, "allocation of {requested} bytes failed")
            }
            Self::CountMismatch { expected, got } => {
                write!(f, "array count mismatch: expected {expected}, got {got}")
            }
            Self::Oversize { len } => {
                write!(f, "length {len} exceeds the 32-bit wire count field")
            }
            Self::Char(v) => write!(f, "invalid char payload {v:#x}"),
            Self::Utf8(e) => write!(f, "string payload is not UTF-8: {e}"),
            Self::Nul => write!(f, "interior NUL in C-string payload"),
            Self::Capacity { needed, cap } => {
                write!(f, "payload of {needed} bytes exceeds capacity {cap}")
            }
            Self::Link(e) => write!(f, "link: {e}"),
        }
    }
}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
