//! Dynamic values for the fantasy-land type-class runtime.
//!
//! This crate defines the value space the dispatch engine in `fl-classes`
//! operates on. It mirrors the built-in kinds of a dynamically typed host:
//! primitives, dates, regular expressions, arrays, plain and typed objects,
//! errors and functions, plus type representatives for user-defined types.
//!
//! # Overview
//!
//! - [`Value`]: the cheaply clonable value enum
//! - [`Object`], [`Array`]: shared, interior-mutable containers (they may
//!   contain themselves)
//! - [`Function`]: named native closures taking a receiver and arguments
//! - [`TypeRep`]: a type representative carrying constructor-level fields and
//!   a prototype object with instance-level fields
//! - [`Builtin`]: the built-in type tags reported by runtime type
//!   identification
//! - [`Error`], [`Result`]: the error type shared by the whole workspace
//!
//! # Identity
//!
//! [`Value::is`] follows strict equality: primitives compare by value and every
//! reference kind compares by pointer. Structural equality lives in
//! `fl-classes`.
//!
//! # Example
//!
//! ```ignore
//! use fl_value::{TypeRep, Value};
//!
//! let xs = Value::array([Value::from(1), Value::from(2)]);
//! assert_eq!(xs.type_name(), "Array");
//!
//! let identity = TypeRep::new("Identity").with_type_ident("my-package/Identity@1");
//! let boxed = identity.construct([("value", Value::from(42))]);
//! assert_eq!(boxed.type_name(), "my-package/Identity@1");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod array;
mod builtin;
pub mod date;
mod error;
mod function;
pub mod number;
mod object;
mod regexp;
mod type_rep;
mod value;

pub use array::Array;
pub use builtin::Builtin;
pub use error::{Error, Result};
pub use function::{expect_arity, Function};
pub use object::Object;
pub use regexp::RegExp;
pub use type_rep::TypeRep;
pub use value::{Boxed, ErrorValue, Primitive, Value};
