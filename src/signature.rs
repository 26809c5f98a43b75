//! Signature derivation — encode a callable's type as tagged text.
//!
//! A signature is `[returnTag] ':' ' ' paramTag (' ' paramTag)*`. A
//! callable returning nothing emits no return tag, so its signature
//! begins at the `": "` marker. No separator follows the last parameter
//! and none is emitted between signatures: callers concatenate, relying
//! on the fixed `": "` marker and on bracket well-formedness of compound
//! tags to keep boundaries unambiguous.
//!
//! Signatures are emitted straight to the stream — in this protocol they
//! are always immediately consumed as output, never stored.
//!
//! Method-style callables coerce to `fn(&T, ...)` pointers; their
//! receiver is stripped and never appears in the signature. Coherence
//! keeps free functions and receiver-taking functions on separate
//! traits, funneled through the one [`Callable`] emitter.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::Result;
use crate::marshal::write_all;
use crate::stream::Stream;
use crate::tag::{TypeTag, tag_of};

/// An explicit callable description: optional return tag plus ordered
/// parameter tags, each as derived bytes.
pub struct Callable {
    pub ret: Option<Vec<u8>>,
    pub params: Vec<Vec<u8>>,
}

impl Callable {
    /// Emit the encoded signature to `stream`.
    pub fn write_to<S: Stream>(&self, stream: &mut S) -> Result<()> {
        if let Some(ret) = &self.ret {
            write_all(stream, ret)?;
        }
        write_all(stream, b": ")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write_all(stream, b" ")?;
            }
            write_all(stream, param)?;
        }
        Ok(())
    }
}

fn return_tag<R: TypeTag>() -> Option<Vec<u8>> {
    if R::IS_UNIT { None } else { Some(tag_of::<R>()) }
}

/// Describes a free-function pointer type.
pub trait Signature {
    fn describe() -> Callable;
}

/// Describes a receiver-taking function pointer type, with the receiver
/// excluded from the description.
pub trait MethodSignature {
    fn describe() -> Callable;
}

/// Derive `f`'s signature and write it to `stream`.
pub fn signature<S: Stream, F: Signature>(stream: &mut S, _f: F) -> Result<()> {
    F::describe().write_to(stream)
}

/// Derive `f`'s signature, receiver excluded, and write it to `stream`.
pub fn method_signature<S: Stream, F: MethodSignature>(stream: &mut S, _f: F) -> Result<()> {
    F::describe().write_to(stream)
}

macro_rules! fn_signature {
    ($($param:ident),*) => {
        impl<R: TypeTag, $($param: TypeTag),*> Signature for fn($($param),*) -> R {
            fn describe() -> Callable {
                Callable {
                    ret: return_tag::<R>(),
                    params: vec![$(tag_of::<$param>()),*],
                }
            }
        }

        impl<T, R: TypeTag, $($param: TypeTag),*> MethodSignature
            for for<'r> fn(&'r T, $($param),*) -> R
        {
            fn describe() -> Callable {
                Callable {
                    ret: return_tag::<R>(),
                    params: vec![$(tag_of::<$param>()),*],
                }
            }
        }

        impl<T, R: TypeTag, $($param: TypeTag),*> MethodSignature
            for for<'r> fn(&'r mut T, $($param),*) -> R
        {
            fn describe() -> Callable {
                Callable {
                    ret: return_tag::<R>(),
                    params: vec![$(tag_of::<$param>()),*],
                }
            }
        }
    };
}

fn_signature!();
fn_signature!(P1);
fn_signature!(P1, P2);
fn_signature!(P1, P2, P3);
fn_signature!(P1, P2, P3, P4);
fn_signature!(P1, P2, P3, P4, P5);
fn_signature!(P1, P2, P3, P4, P5, P6);
fn_signature!(P1, P2, P3, P4, P5, P6, P7);
fn_signature!(P1, P2, P3, P4, P5, P6, P7, P8);

// ── Tests ────────────────────────────────────────────────────
