use fl_value::{Result, Value};

use super::{combinators, invoke};
use crate::classes;

/// Maps each element to an applicative of type `rep` and collects the
/// results inside a single applicative.
pub fn traverse(rep: &Value, f: &Value, traversable: &Value) -> Result<Value> {
    invoke(
        classes::traversable(),
        "traverse",
        traversable,
        &[rep.clone(), f.clone()],
    )
}

/// `traverse(rep, identity, traversable)`
pub fn sequence(rep: &Value, traversable: &Value) -> Result<Value> {
    traverse(rep, &combinators::identity(), traversable)
}
