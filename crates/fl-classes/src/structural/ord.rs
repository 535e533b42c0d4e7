use fl_value::{Result, Value};
use tracing::trace;

use super::{equals, same_type};
use crate::classes;
use crate::guard::{self, Entry, PairStack};

/// Returns true if `x` is less than or equal to `y`.
///
/// Values of different types are unordered (`false`). Otherwise both must be
/// Ords, and the first one's `lte` decides. A comparison that reaches itself
/// again falls back to [`equals`].
///
/// # Errors
///
/// Propagates errors from custom `lte` implementations, and returns
/// [`fl_value::Error::RecursionLimit`] for nesting deeper than the
/// configured limit.
pub fn lte(x: &Value, y: &Value) -> Result<bool> {
    guard::with_stack(|| lte_level(x, y))
}

fn lte_level(x: &Value, y: &Value) -> Result<bool> {
    if !same_type(x, y) {
        return Ok(false);
    }
    let _guard = match guard::enter_pair(PairStack::Lte, x, y)? {
        Entry::Cycle => {
            trace!(type_name = %x.type_name(), "lte: cycle detected");
            return equals(x, y);
        }
        Entry::Entered(guard) => Some(guard),
        Entry::Untracked => None,
    };
    let ord = classes::ord();
    if !(ord.test(x) && ord.test(y)) {
        return Ok(false);
    }
    match ord.method("lte").and_then(|m| m.resolve(x)) {
        Some(method) => Ok(method.call(&[y.clone()])?.truthy()),
        None => Ok(false),
    }
}

/// `lte(x, y) && !lte(y, x)`
///
/// # Errors
///
/// As for [`lte`].
pub fn lt(x: &Value, y: &Value) -> Result<bool> {
    Ok(lte(x, y)? && !lte(y, x)?)
}

/// `lt(y, x)`
///
/// # Errors
///
/// As for [`lte`].
pub fn gt(x: &Value, y: &Value) -> Result<bool> {
    lt(y, x)
}

/// `lte(y, x)`
///
/// # Errors
///
/// As for [`lte`].
pub fn gte(x: &Value, y: &Value) -> Result<bool> {
    lte(y, x)
}

/// The smaller of two values; `y` if they are unordered.
///
/// # Errors
///
/// As for [`lte`].
pub fn min(x: &Value, y: &Value) -> Result<Value> {
    Ok(if lte(x, y)? { x.clone() } else { y.clone() })
}

/// The larger of two values; `x` if they are unordered.
///
/// # Errors
///
/// As for [`lte`].
pub fn max(x: &Value, y: &Value) -> Result<Value> {
    Ok(if lte(x, y)? { y.clone() } else { x.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(x: f64) -> Value {
        Value::from(x)
    }

    fn nums(xs: &[f64]) -> Value {
        Value::array(xs.iter().map(|&x| n(x)))
    }

    #[test]
    fn test_nan_is_least() {
        assert!(lte(&n(f64::NAN), &n(f64::NEG_INFINITY)).unwrap());
        assert!(!lte(&n(0.0), &n(f64::NAN)).unwrap());
        assert!(lt(&n(f64::NAN), &n(0.0)).unwrap());
    }

    #[test]
    fn test_arrays() {
        assert!(lte(&nums(&[1.0, 2.0]), &nums(&[1.0, 2.0, 3.0])).unwrap());
        assert!(!lte(&nums(&[1.0, 2.0, 3.0]), &nums(&[1.0, 2.0])).unwrap());
        assert!(lte(&nums(&[1.0, 2.0]), &nums(&[1.0, 3.0])).unwrap());
    }

    #[test]
    fn test_derived() {
        let (a, b) = (n(1.0), n(2.0));
        assert!(lt(&a, &b).unwrap());
        assert!(!lt(&a, &a).unwrap());
        assert!(gt(&b, &a).unwrap());
        assert!(gte(&a, &a).unwrap());
        assert_eq!(min(&a, &b).unwrap().as_number(), Some(1.0));
        assert_eq!(max(&a, &b).unwrap().as_number(), Some(2.0));
    }

    #[test]
    fn test_unordered() {
        let (a, b) = (n(1.0), Value::from("1"));
        assert!(!lte(&a, &b).unwrap());
        assert!(!lte(&b, &a).unwrap());
        assert!(min(&a, &b).unwrap().is(&b));
        assert!(max(&a, &b).unwrap().is(&a));
        // Errors have no order.
        let e = Value::error("Error", "x");
        assert!(!lte(&e, &e).unwrap());
    }

    #[test]
    fn test_cyclic_falls_back_to_equals() {
        let xs = fl_value::Array::new();
        xs.push(Value::Array(xs.clone()));
        let v = Value::Array(xs);
        assert!(lte(&v, &v).unwrap());
    }
}
