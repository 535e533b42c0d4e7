//! Applicative and monadic operations.

use fl_value::{Result, Value};

use super::{combinators, concat, invoke, map, rep_of, zero};
use crate::classes;

/// Applies the functions in `f` to the values in `x`.
pub fn ap(f: &Value, x: &Value) -> Result<Value> {
    invoke(classes::apply(), "ap", x, &[f.clone()])
}

/// Lifts a binary function over two applicatives.
pub fn lift2(f: &Value, x: &Value, y: &Value) -> Result<Value> {
    ap(&map(&combinators::curry2(f), x)?, y)
}

/// Lifts a ternary function over three applicatives.
pub fn lift3(f: &Value, x: &Value, y: &Value, z: &Value) -> Result<Value> {
    ap(&ap(&map(&combinators::curry3(f), x)?, y)?, z)
}

/// Combines two applicatives, keeping the values of the first.
pub fn ap_first(x: &Value, y: &Value) -> Result<Value> {
    let first = Value::binary("first", |a, _| Ok(a.clone()));
    lift2(&first, x, y)
}

/// Combines two applicatives, keeping the values of the second.
pub fn ap_second(x: &Value, y: &Value) -> Result<Value> {
    let second = Value::binary("second", |_, b| Ok(b.clone()));
    lift2(&second, x, y)
}

/// Lifts `x` into the applicative represented by `rep`.
pub fn of(rep: &Value, x: &Value) -> Result<Value> {
    invoke(classes::applicative(), "of", rep, &[x.clone()])
}

/// `concat(xs, of(rep(xs), x))`
pub fn append(x: &Value, xs: &Value) -> Result<Value> {
    let rep = rep_of("of", xs)?;
    concat(xs, &of(&rep, x)?)
}

/// `concat(of(rep(xs), x), xs)`
pub fn prepend(x: &Value, xs: &Value) -> Result<Value> {
    let rep = rep_of("of", xs)?;
    concat(&of(&rep, x)?, xs)
}

/// Monadic bind.
pub fn chain(f: &Value, m: &Value) -> Result<Value> {
    invoke(classes::chain(), "chain", m, &[f.clone()])
}

/// Removes one level of nesting.
pub fn join(m: &Value) -> Result<Value> {
    chain(&combinators::identity(), m)
}

/// Stack-safe monadic recursion.
///
/// `f` receives `next`, `done` and the current seed and returns the
/// container of steps; see [`crate::rec`].
pub fn chain_rec(rep: &Value, f: &Value, seed: &Value) -> Result<Value> {
    invoke(classes::chain_rec(), "chainRec", rep, &[f.clone(), seed.clone()])
}

/// Keeps the elements of a monad satisfying `pred`, replacing the others by
/// the type's `zero`.
pub fn filter_m(pred: &Value, m: &Value) -> Result<Value> {
    let rep = rep_of("zero", m)?;
    let nothing = zero(&rep)?;
    let pred = pred.clone();
    let keep = Value::unary("filterM", move |x| {
        if pred.call(&[x.clone()])?.truthy() {
            of(&rep, x)
        } else {
            Ok(nothing.clone())
        }
    });
    chain(&keep, m)
}
