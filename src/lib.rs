//! TagWire — type-tagged binary marshaling for embedded RPC links.
//!
//! A small device and a host share a byte-oriented link (typically a
//! serial port). Each side describes its value types with a compact
//! single-character-per-type tag grammar, then marshals concrete values
//! against that grammar. Tag derivation and value marshaling are driven
//! by the same static-type recursion but never touch each other:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     TagWire Stack                        │
//! │                                                          │
//! │  ┌─────────┐      ┌───────────┐      ┌───────────────┐   │
//! │  │ TypeTag │─────▶│ Signature │      │ Marshal /     │   │
//! │  │ (derive)│      │ (emit)    │      │ Unmarshal     │   │
//! │  └─────────┘      └─────┬─────┘      └───────┬───────┘   │
//! │                         │                    │           │
//! │                         ▼                    ▼           │
//! │                   ┌──────────────────────────────┐       │
//! │                   │        Stream (trait)        │       │
//! │                   └──────────────────────────────┘       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! This layer does not dispatch calls, look up methods, or frame the
//! transport — it only derives tags and marshals values. A higher layer
//! matches a signature to a registered callable and invokes it.
//!
//! Byte order on the wire is the native order of both link ends; a
//! serial link between agreeing platforms is the assumed deployment.

#![cfg_attr(not(test), no_std)]
#![deny(unused_must_use)]

extern crate alloc;

pub mod marshal;
pub mod signature;
pub mod stream;
pub mod tag;

mod error;

pub use error::{Error, Result};
pub use marshal::{Marshal, Unmarshal, read, release, write};
pub use signature::{Callable, MethodSignature, Signature, method_signature, signature};
pub use stream::{LinkError, MemoryStream, Stream};
pub use tag::{TypeTag, tag_of};
