//! Single-capability operations.

use fl_value::{Result, Value};

use super::{combinators, invoke};
use crate::classes;

/// Right-to-left composition: `compose(f, g)(x) = f(g(x))`.
pub fn compose(f: &Value, g: &Value) -> Result<Value> {
    invoke(classes::semigroupoid(), "compose", g, &[f.clone()])
}

/// The identity morphism of a category.
pub fn id(rep: &Value) -> Result<Value> {
    invoke(classes::category(), "id", rep, &[])
}

/// Semigroup combination.
pub fn concat(x: &Value, y: &Value) -> Result<Value> {
    invoke(classes::semigroup(), "concat", x, &[y.clone()])
}

/// The identity element of a monoid.
pub fn empty(rep: &Value) -> Result<Value> {
    invoke(classes::monoid(), "empty", rep, &[])
}

/// The inverse of a group element.
pub fn invert(g: &Value) -> Result<Value> {
    invoke(classes::group(), "invert", g, &[])
}

/// Maps `f` over a functor.
pub fn map(f: &Value, functor: &Value) -> Result<Value> {
    invoke(classes::functor(), "map", functor, &[f.clone()])
}

/// Applies every function inside `functor` to `x`.
pub fn flip(functor: &Value, x: &Value) -> Result<Value> {
    map(&combinators::thrush(x.clone()), functor)
}

/// Maps both sides of a bifunctor.
pub fn bimap(f: &Value, g: &Value, bifunctor: &Value) -> Result<Value> {
    invoke(classes::bifunctor(), "bimap", bifunctor, &[f.clone(), g.clone()])
}

/// Maps the left side of a bifunctor.
pub fn map_left(f: &Value, bifunctor: &Value) -> Result<Value> {
    bimap(f, &combinators::identity(), bifunctor)
}

/// Maps the input with `f` and the output with `g`.
pub fn promap(f: &Value, g: &Value, profunctor: &Value) -> Result<Value> {
    invoke(classes::profunctor(), "promap", profunctor, &[f.clone(), g.clone()])
}

/// Maps the input of a contravariant functor.
pub fn contramap(f: &Value, contravariant: &Value) -> Result<Value> {
    invoke(classes::contravariant(), "contramap", contravariant, &[f.clone()])
}

/// Picks between two alternatives.
pub fn alt(x: &Value, y: &Value) -> Result<Value> {
    invoke(classes::alt(), "alt", x, &[y.clone()])
}

/// The identity element of `alt`.
pub fn zero(rep: &Value) -> Result<Value> {
    invoke(classes::plus(), "zero", rep, &[])
}

/// Extends a local computation over a whole structure.
pub fn extend(f: &Value, w: &Value) -> Result<Value> {
    invoke(classes::extend(), "extend", w, &[f.clone()])
}

/// `extend(identity, w)`
pub fn duplicate(w: &Value) -> Result<Value> {
    extend(&combinators::identity(), w)
}

/// Extracts the focused value of a comonad.
pub fn extract(w: &Value) -> Result<Value> {
    invoke(classes::comonad(), "extract", w, &[])
}
