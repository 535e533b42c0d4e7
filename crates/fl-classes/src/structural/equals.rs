use fl_value::{Result, Value};
use tracing::trace;

use super::same_type;
use crate::classes;
use crate::guard::{self, Entry, PairStack};

/// Structural equality.
///
/// Values of different types are never equal. Otherwise both must be
/// Setoids, and the first one's `equals` decides. A comparison that reaches
/// itself again (a cyclic structure) is assumed to hold, so two encodings of
/// the same infinite structure compare equal.
///
/// # Errors
///
/// Propagates errors raised by custom `equals` implementations, and returns
/// [`fl_value::Error::RecursionLimit`] for acyclic nesting deeper than the
/// configured limit.
pub fn equals(x: &Value, y: &Value) -> Result<bool> {
    guard::with_stack(|| equals_level(x, y))
}

fn equals_level(x: &Value, y: &Value) -> Result<bool> {
    if !same_type(x, y) {
        return Ok(false);
    }
    let _guard = match guard::enter_pair(PairStack::Equals, x, y)? {
        Entry::Cycle => {
            trace!(type_name = %x.type_name(), "equals: cycle detected");
            return Ok(true);
        }
        Entry::Entered(guard) => Some(guard),
        Entry::Untracked => None,
    };
    let setoid = classes::setoid();
    if !(setoid.test(x) && setoid.test(y)) {
        return Ok(false);
    }
    match setoid.method("equals").and_then(|m| m.resolve(x)) {
        Some(method) => Ok(method.call(&[y.clone()])?.truthy()),
        None => Ok(false),
    }
}
