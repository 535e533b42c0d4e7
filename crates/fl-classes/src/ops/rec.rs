//! Step values for `chainRec`.
//!
//! A step function receives `next` and `done` constructors and returns steps
//! built with them; a step is an object `{value, done}`.

use fl_value::{Error, Result, Value};

/// A step asking for another iteration with `value`.
#[must_use]
pub fn next(value: Value) -> Value {
    Value::object([("value", value), ("done", Value::Bool(false))])
}

/// A step finishing with `value`.
#[must_use]
pub fn done(value: Value) -> Value {
    Value::object([("value", value), ("done", Value::Bool(true))])
}

pub(crate) fn next_fn() -> Value {
    Value::unary("next", |x| Ok(next(x.clone())))
}

pub(crate) fn done_fn() -> Value {
    Value::unary("done", |x| Ok(done(x.clone())))
}

/// Splits a step into `(finished, value)`.
pub(crate) fn read_step(step: &Value) -> Result<(bool, Value)> {
    let Value::Object(o) = step else {
        return Err(Error::type_error("chainRec step", step));
    };
    let finished = o.get("done").is_some_and(|d| d.truthy());
    Ok((finished, o.get("value").unwrap_or(Value::Undefined)))
}
