//! Arrays and argument lists.

use std::collections::VecDeque;

use fl_value::{Array, Error, Result, Value};

use super::{show, take_args, Implementations};
use crate::ops::{self, combinators, rec};
use crate::structural::{equals, lte};

pub(super) fn array() -> Implementations {
    Implementations::default()
        .with_static("empty", |_, _| Ok(Value::array([])))
        .with_static("zero", |_, _| Ok(Value::array([])))
        .with_static("of", |_, args| {
            let [x] = take_args::<1>("of", args)?;
            Ok(Value::array([x.clone()]))
        })
        .with_static("chainRec", chain_rec)
        .with_method("equals", sequence_equals)
        .with_method("lte", sequence_lte)
        .with_method("concat", concat)
        .with_method("alt", concat)
        .with_method("filter", |this, args| {
            let [pred] = take_args::<1>("filter", args)?;
            let mut out = Vec::new();
            for x in elements(this)? {
                if pred.call(&[x.clone()])?.truthy() {
                    out.push(x);
                }
            }
            Ok(Value::from(out))
        })
        .with_method("map", |this, args| {
            let [f] = take_args::<1>("map", args)?;
            elements(this)?
                .into_iter()
                .map(|x| f.call(&[x]))
                .collect::<Result<Vec<_>>>()
                .map(Value::from)
        })
        .with_method("ap", |this, args| {
            let [fs] = take_args::<1>("ap", args)?;
            let xs = elements(this)?;
            let mut out = Vec::new();
            for f in elements(fs)? {
                for x in &xs {
                    out.push(f.call(&[x.clone()])?);
                }
            }
            Ok(Value::from(out))
        })
        .with_method("chain", |this, args| {
            let [f] = take_args::<1>("chain", args)?;
            let mut out = Vec::new();
            for x in elements(this)? {
                out.extend(elements(&f.call(&[x])?)?);
            }
            Ok(Value::from(out))
        })
        .with_method("reduce", |this, args| {
            let [f, initial] = take_args::<2>("reduce", args)?;
            elements(this)?
                .into_iter()
                .try_fold(initial.clone(), |acc, x| f.call(&[acc, x]))
        })
        .with_method("traverse", traverse)
        .with_method("extend", |this, args| {
            let [f] = take_args::<1>("extend", args)?;
            let xs = elements(this)?;
            (0..xs.len())
                .map(|idx| f.call(&[Value::array(xs[idx..].iter().cloned())]))
                .collect::<Result<Vec<_>>>()
                .map(Value::from)
        })
        .with_method("toString", |this, _| {
            let xs = this
                .as_array()
                .ok_or_else(|| Error::type_error("Array", this))?;
            let mut parts = render_elements(xs)?;
            let mut props = xs.props();
            props.retain(|(k, _)| !is_index(k));
            props.sort_by(|(a, _), (b, _)| a.encode_utf16().cmp(b.encode_utf16()));
            for (k, v) in props {
                parts.push(format!("{}: {}", show(&Value::from(k))?, show(&v)?));
            }
            Ok(Value::from(format!("[{}]", parts.join(", "))))
        })
}

pub(super) fn arguments() -> Implementations {
    Implementations::default()
        .with_method("equals", sequence_equals)
        .with_method("lte", sequence_lte)
        .with_method("toString", |this, _| {
            let xs = this
                .as_array()
                .ok_or_else(|| Error::type_error("Arguments", this))?;
            Ok(Value::from(format!(
                "function () {{ return arguments; }} ({})",
                render_elements(xs)?.join(", ")
            )))
        })
}

fn elements(value: &Value) -> Result<Vec<Value>> {
    value
        .as_array()
        .map(Array::to_vec)
        .ok_or_else(|| Error::type_error("Array", value))
}

fn render_elements(xs: &Array) -> Result<Vec<String>> {
    xs.to_vec().iter().map(show).collect()
}

fn is_index(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

fn sequence_equals(this: &Value, args: &[Value]) -> Result<Value> {
    let [other] = take_args::<1>("equals", args)?;
    let (xs, ys) = (elements(this)?, elements(other)?);
    if xs.len() != ys.len() {
        return Ok(Value::Bool(false));
    }
    for (x, y) in xs.iter().zip(&ys) {
        if !equals(x, y)? {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

/// The first position holding unequal elements decides; otherwise the
/// shorter sequence is the lesser.
fn sequence_lte(this: &Value, args: &[Value]) -> Result<Value> {
    let [other] = take_args::<1>("lte", args)?;
    let (xs, ys) = (elements(this)?, elements(other)?);
    for idx in 0.. {
        let (Some(x), Some(y)) = (xs.get(idx), ys.get(idx)) else {
            return Ok(Value::Bool(idx == xs.len()));
        };
        if !equals(x, y)? {
            return lte(x, y).map(Value::Bool);
        }
    }
    Ok(Value::Bool(true))
}

fn concat(this: &Value, args: &[Value]) -> Result<Value> {
    let [other] = take_args::<1>("concat", args)?;
    let mut xs = elements(this)?;
    xs.extend(elements(other)?);
    Ok(Value::from(xs))
}

/// Pairs up adjacent elements and joins the halves with `lift2`, which keeps
/// the nesting of applicative combinations logarithmic in the length.
fn traverse(this: &Value, args: &[Value]) -> Result<Value> {
    let [rep, f] = take_args::<2>("traverse", args)?;
    let xs = elements(this)?;
    let ctx = Traverse {
        rep,
        f,
        xs: &xs,
        pair: combinators::pair(),
        concat: combinators::concat(),
    };
    if xs.len() % 2 == 1 {
        let first = ops::map(&combinators::singleton(), &f.call(&[xs[0].clone()])?)?;
        let rest = ctx.go(1, xs.len() - 1)?;
        ops::lift2(&ctx.concat, &first, &rest)
    } else {
        ctx.go(0, xs.len())
    }
}

struct Traverse<'a> {
    rep: &'a Value,
    f: &'a Value,
    xs: &'a [Value],
    pair: Value,
    concat: Value,
}

impl Traverse<'_> {
    /// Traverses the even-length run `xs[idx..idx + n]`.
    fn go(&self, idx: usize, n: usize) -> Result<Value> {
        match n {
            0 => ops::of(self.rep, &Value::array([])),
            2 => ops::lift2(
                &self.pair,
                &self.f.call(&[self.xs[idx].clone()])?,
                &self.f.call(&[self.xs[idx + 1].clone()])?,
            ),
            _ => {
                let m = n / 4 * 2;
                ops::lift2(&self.concat, &self.go(idx, m)?, &self.go(idx + m, n - m)?)
            }
        }
    }
}

/// Runs a step function over a work queue: steps marked as continuing are
/// scheduled ahead of the remaining work, finished ones are collected in order.
fn chain_rec(_: &Value, args: &[Value]) -> Result<Value> {
    let [f, seed] = take_args::<2>("chainRec", args)?;
    let (next, done) = (rec::next_fn(), rec::done_fn());
    let mut todo = VecDeque::from([seed.clone()]);
    let mut result = Vec::new();
    while let Some(head) = todo.pop_front() {
        let steps = f.call(&[next.clone(), done.clone(), head])?;
        let mut more = Vec::new();
        for step in elements(&steps)? {
            let (finished, value) = rec::read_step(&step)?;
            if finished {
                result.push(value);
            } else {
                more.push(value);
            }
        }
        for value in more.into_iter().rev() {
            todo.push_front(value);
        }
    }
    Ok(Value::from(result))
}
