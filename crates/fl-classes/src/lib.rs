//! Fantasy Land type classes with runtime dispatch.
//!
//! This crate classifies [`fl_value::Value`]s into the algebraic structures
//! of the Fantasy Land specification (Setoid, Ord, Functor, Monad, ...) and
//! provides the derived operations built on them.
//!
//! # Overview
//!
//! - [`TypeClass`]: an immutable class descriptor with a membership test and
//!   per-capability [`MethodAccessor`]s
//! - [`classes`]: the 24 standard descriptors and their [`Registry`]
//! - [`declare_type_class`], [`declare_method_class`]: user-defined classes
//! - [`resolve`]: capability lookup on values and type representatives
//! - [`MethodTable`]: built-in implementations for the host's native types
//! - [`equals`], [`lte`], [`to_string`]: cycle-aware structural algorithms
//! - [`map`], [`chain`], [`traverse`], [`sort`], ...: derived operations
//!
//! # Dispatch
//!
//! A capability is searched, in order, on the value's own fields, on its type
//! representative's prototype, and in the built-in method table keyed by the
//! value's runtime type name. Custom types participate by putting namespaced
//! functions (`fantasy-land/map`, ...) on their prototype or statics; the
//! namespace is configurable through [`fl_session::Options`].
//!
//! # Example
//!
//! ```ignore
//! use fl_classes::{classes, map, to_string};
//! use fl_value::Value;
//!
//! let xs = Value::array([Value::from(1), Value::from(2)]);
//! assert!(classes::functor().test(&xs));
//!
//! let double = Value::unary("double", |x| Ok(Value::from(x.as_number().unwrap_or(0.0) * 2.0)));
//! assert_eq!(to_string(&map(&double, &xs)?)?, "[2, 4]");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod class;
pub mod classes;
mod guard;
mod ops;
mod resolve;
mod structural;
pub mod table;

pub use class::{declare_method_class, declare_type_class, MethodAccessor, Registry, TypeClass};
pub use ops::rec;
pub use ops::{
    all, alt, any, ap, ap_first, ap_second, append, bimap, chain, chain_rec, compose, concat,
    contramap, drop_while, duplicate, elem, empty, extend, extract, filter, filter_m, flip,
    fold_map, id, intercalate, invert, join, lift2, lift3, map, map_left, none, of, prepend,
    promap, reduce, reject, reverse, sequence, size, sort, sort_by, take_while, traverse, zero,
};
pub use resolve::{resolve, Location};
pub use structural::{equals, gt, gte, lt, lte, max, min, same_type, to_string};
pub use table::MethodTable;

pub use fl_session;
pub use fl_value;
