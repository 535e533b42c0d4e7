//! Derived operations.
//!
//! Each operation dispatches through a class descriptor's method accessor:
//! the capability is resolved on the subject (or on a type representative for
//! constructor-level capabilities) and invoked. A subject lacking the
//! capability yields [`Error::Unsupported`] naming both.
//!
//! Functions passed in (`f`, `pred`, ...) are function [`Value`]s; their
//! errors propagate unchanged.

mod algebra;
mod apply;
pub(crate) mod combinators;
mod foldable;
pub mod rec;
mod traversable;

pub use algebra::{
    alt, bimap, compose, concat, contramap, duplicate, empty, extend, extract, flip, id, invert,
    map, map_left, promap, zero,
};
pub use apply::{
    ap, ap_first, ap_second, append, chain, chain_rec, filter_m, join, lift2, lift3, of, prepend,
};
pub use foldable::{
    all, any, drop_while, elem, filter, fold_map, intercalate, none, reduce, reject, reverse,
    size, sort, sort_by, take_while,
};
pub use traversable::{sequence, traverse};

use fl_value::{Error, Result, Value};

use crate::TypeClass;

/// Resolves `capability` through `class` on `subject` and calls it.
pub(crate) fn invoke(
    class: &TypeClass,
    capability: &str,
    subject: &Value,
    args: &[Value],
) -> Result<Value> {
    let method = class
        .method(capability)
        .and_then(|accessor| accessor.resolve(subject))
        .ok_or_else(|| Error::unsupported(capability, subject))?;
    method.call(args)
}

/// The type representative of `x`, needed to build values of the same type.
pub(crate) fn rep_of(capability: &str, x: &Value) -> Result<Value> {
    x.constructor()
        .ok_or_else(|| Error::unsupported(capability, x))
}
