//! Folds, filters and sorting.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fl_value::{Error, Result, Value};

use super::{combinators, concat, empty, invoke, of, rep_of};
use crate::classes;
use crate::structural::{equals, lte};

/// Left fold: `f(...f(f(initial, x0), x1)..., xn)`.
pub fn reduce(f: &Value, initial: &Value, foldable: &Value) -> Result<Value> {
    invoke(classes::foldable(), "reduce", foldable, &[f.clone(), initial.clone()])
}

/// The elements of a foldable, in fold order.
fn to_vec(foldable: &Value) -> Result<Vec<Value>> {
    if let Value::Array(xs) = foldable {
        return Ok(xs.to_vec());
    }
    let out = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&out);
    let push = Value::binary("collect", move |acc, x| {
        sink.borrow_mut().push(x.clone());
        Ok(acc.clone())
    });
    reduce(&push, &Value::Undefined, foldable)?;
    let xs = out.take();
    Ok(xs)
}

/// The number of elements.
pub fn size(foldable: &Value) -> Result<usize> {
    if let Value::Array(xs) = foldable {
        return Ok(xs.len());
    }
    let count = Value::binary("size", |n, _| {
        let n = n.as_number().ok_or_else(|| Error::type_error("Number", n))?;
        Ok(Value::from(n + 1.0))
    });
    let n = reduce(&count, &Value::from(0), foldable)?;
    match n.as_number() {
        Some(n) if n >= 0.0 && n.fract() == 0.0 => Ok(n as usize),
        _ => Err(Error::type_error("Number", &n)),
    }
}

/// True if every element satisfies `pred`.
pub fn all(pred: &Value, foldable: &Value) -> Result<bool> {
    if let Value::Array(xs) = foldable {
        for x in xs.to_vec() {
            if !pred.call(&[x])?.truthy() {
                return Ok(false);
            }
        }
        return Ok(true);
    }
    let pred = pred.clone();
    let step = Value::binary("all", move |acc, x| {
        Ok(Value::Bool(acc.truthy() && pred.call(&[x.clone()])?.truthy()))
    });
    Ok(reduce(&step, &Value::Bool(true), foldable)?.truthy())
}

/// True if some element satisfies `pred`.
pub fn any(pred: &Value, foldable: &Value) -> Result<bool> {
    if let Value::Array(xs) = foldable {
        for x in xs.to_vec() {
            if pred.call(&[x])?.truthy() {
                return Ok(true);
            }
        }
        return Ok(false);
    }
    let pred = pred.clone();
    let step = Value::binary("any", move |acc, x| {
        Ok(Value::Bool(acc.truthy() || pred.call(&[x.clone()])?.truthy()))
    });
    Ok(reduce(&step, &Value::Bool(false), foldable)?.truthy())
}

/// True if no element satisfies `pred`.
pub fn none(pred: &Value, foldable: &Value) -> Result<bool> {
    any(pred, foldable).map(|found| !found)
}

/// True if some element equals `x`.
pub fn elem(x: &Value, foldable: &Value) -> Result<bool> {
    let x = x.clone();
    let is_x = Value::unary("elem", move |y| equals(&x, y).map(Value::Bool));
    any(&is_x, foldable)
}

/// Concatenates the elements with `separator` between adjacent ones.
pub fn intercalate(separator: &Value, foldable: &Value) -> Result<Value> {
    let rep = rep_of("empty", separator)?;
    let first = Cell::new(true);
    let separator = separator.clone();
    let step = Value::binary("intercalate", move |acc, x| {
        if first.replace(false) {
            concat(acc, x)
        } else {
            concat(acc, &concat(&separator, x)?)
        }
    });
    reduce(&step, &empty(&rep)?, foldable)
}

/// Maps every element into a monoid and concatenates the results.
pub fn fold_map(rep: &Value, f: &Value, foldable: &Value) -> Result<Value> {
    let f = f.clone();
    let step = Value::binary("foldMap", move |acc, x| concat(acc, &f.call(&[x.clone()])?));
    reduce(&step, &empty(rep)?, foldable)
}

/// Reverses the elements.
pub fn reverse(foldable: &Value) -> Result<Value> {
    if let Value::Array(xs) = foldable {
        let mut items = xs.to_vec();
        items.reverse();
        return Ok(Value::from(items));
    }
    let rep = rep_of("of", foldable)?;
    let inner = rep.clone();
    let step = Value::binary("reverse", move |acc, x| concat(&of(&inner, x)?, acc));
    reduce(&step, &empty(&rep)?, foldable)
}

/// Sorts the elements by [`lte`], keeping the order of equal elements.
pub fn sort(foldable: &Value) -> Result<Value> {
    sort_by(&combinators::identity(), foldable)
}

/// Sorts the elements by the [`lte`] order of `f(x)`, keeping the order of
/// elements whose keys are equal.
///
/// Each element is inserted after every already-placed element whose key is
/// `lte` its own, found by binary search, so stability does not depend on any
/// underlying sort routine. The result is rebuilt with `empty`, `of` and
/// `concat` of the input's type.
pub fn sort_by(f: &Value, foldable: &Value) -> Result<Value> {
    let mut ranked: Vec<(Value, Value)> = Vec::new();
    for x in to_vec(foldable)? {
        let fx = f.call(&[x.clone()])?;
        let (mut lower, mut upper) = (0, ranked.len());
        while lower < upper {
            let idx = (lower + upper) / 2;
            if lte(&ranked[idx].1, &fx)? {
                lower = idx + 1;
            } else {
                upper = idx;
            }
        }
        ranked.insert(lower, (x, fx));
    }
    let rep = rep_of("of", foldable)?;
    let mut result = empty(&rep)?;
    for (x, _) in ranked {
        result = concat(&result, &of(&rep, &x)?)?;
    }
    Ok(result)
}

/// Keeps the elements satisfying `pred`.
///
/// Arrays are filtered directly; other values use their own `filter` if they
/// have one, and are otherwise rebuilt from `empty`, `of` and `concat`.
pub fn filter(pred: &Value, filterable: &Value) -> Result<Value> {
    if let Value::Array(xs) = filterable {
        let mut out = Vec::new();
        for x in xs.to_vec() {
            if pred.call(&[x.clone()])?.truthy() {
                out.push(x);
            }
        }
        return Ok(Value::from(out));
    }
    let class = classes::filterable();
    if let Some(method) = class
        .method("filter")
        .and_then(|accessor| accessor.resolve(filterable))
    {
        return method.call(&[pred.clone()]);
    }
    let rep = rep_of("empty", filterable)?;
    let inner = rep.clone();
    let pred = pred.clone();
    let step = Value::binary("filter", move |acc, x| {
        if pred.call(&[x.clone()])?.truthy() {
            concat(acc, &of(&inner, x)?)
        } else {
            Ok(acc.clone())
        }
    });
    reduce(&step, &empty(&rep)?, filterable)
}

/// Discards the elements satisfying `pred`.
pub fn reject(pred: &Value, filterable: &Value) -> Result<Value> {
    filter(&combinators::complement(pred), filterable)
}

/// The longest prefix whose elements satisfy `pred`.
pub fn take_while(pred: &Value, filterable: &Value) -> Result<Value> {
    let pred = pred.clone();
    let taking = Cell::new(true);
    let step = Value::unary("takeWhile", move |x| {
        let keep = taking.get() && pred.call(&[x.clone()])?.truthy();
        taking.set(keep);
        Ok(Value::Bool(keep))
    });
    filter(&step, filterable)
}

/// Everything after the longest prefix whose elements satisfy `pred`.
pub fn drop_while(pred: &Value, filterable: &Value) -> Result<Value> {
    let pred = pred.clone();
    let taking = Cell::new(false);
    let step = Value::unary("dropWhile", move |x| {
        let keep = taking.get() || !pred.call(&[x.clone()])?.truthy();
        taking.set(keep);
        Ok(Value::Bool(keep))
    });
    filter(&step, filterable)
}
