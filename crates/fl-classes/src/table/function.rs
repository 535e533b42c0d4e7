//! Functions of one argument.

use fl_value::{Error, Result, Value};

use super::{take_args, Implementations};
use crate::ops::{self, combinators, rec};

pub(super) fn function() -> Implementations {
    Implementations::default()
        .with_static("id", |_, _| Ok(combinators::identity()))
        .with_static("of", |_, args| {
            let [x] = take_args::<1>("of", args)?;
            Ok(combinators::constant(x.clone()))
        })
        .with_static("chainRec", chain_rec)
        .with_method("equals", |this, args| {
            let [other] = take_args::<1>("equals", args)?;
            Ok(Value::Bool(this.is(other)))
        })
        .with_method("compose", |this, args| {
            let [g] = take_args::<1>("compose", args)?;
            let (f, g) = (this.clone(), g.clone());
            Ok(Value::unary("compose", move |x| g.call(&[f.call(&[x.clone()])?])))
        })
        .with_method("map", |this, args| {
            let [g] = take_args::<1>("map", args)?;
            let (f, g) = (this.clone(), g.clone());
            Ok(Value::unary("map", move |x| g.call(&[f.call(&[x.clone()])?])))
        })
        .with_method("promap", |this, args| {
            let [pre, post] = take_args::<2>("promap", args)?;
            let (f, pre, post) = (this.clone(), pre.clone(), post.clone());
            Ok(Value::unary("promap", move |x| {
                post.call(&[f.call(&[pre.call(&[x.clone()])?])?])
            }))
        })
        .with_method("ap", |this, args| {
            let [g] = take_args::<1>("ap", args)?;
            let (f, g) = (this.clone(), g.clone());
            Ok(Value::unary("ap", move |x| {
                g.call(&[x.clone()])?.call(&[f.call(&[x.clone()])?])
            }))
        })
        .with_method("chain", |this, args| {
            let [g] = take_args::<1>("chain", args)?;
            let (f, g) = (this.clone(), g.clone());
            Ok(Value::unary("chain", move |x| {
                g.call(&[f.call(&[x.clone()])?])?.call(&[x.clone()])
            }))
        })
        .with_method("extend", |this, args| {
            let [g] = take_args::<1>("extend", args)?;
            let (f, g) = (this.clone(), g.clone());
            Ok(Value::unary("extend", move |x| {
                let (f, x) = (f.clone(), x.clone());
                let shifted = Value::unary("extended", move |y| f.call(&[ops::concat(&x, y)?]));
                g.call(&[shifted])
            }))
        })
        .with_method("contramap", |this, args| {
            let [g] = take_args::<1>("contramap", args)?;
            let (f, g) = (this.clone(), g.clone());
            Ok(Value::unary("contramap", move |x| f.call(&[g.call(&[x.clone()])?])))
        })
        .with_method("toString", |this, _| {
            let name = match this {
                Value::Function(f) => f.name().to_string(),
                Value::TypeRep(rep) => rep.name().to_string(),
                other => return Err(Error::type_error("Function", other)),
            };
            Ok(Value::from(format!("function {name}() {{ [native code] }}")))
        })
}

/// Builds a function that iterates the step function from the seed until a
/// finished step, threading the environment argument through every call.
fn chain_rec(_: &Value, args: &[Value]) -> Result<Value> {
    let [f, seed] = take_args::<2>("chainRec", args)?;
    let (f, seed) = (f.clone(), seed.clone());
    Ok(Value::unary("chainRec", move |env| {
        let (next, done) = (rec::next_fn(), rec::done_fn());
        let mut step = (false, seed.clone());
        while !step.0 {
            let body = f.call(&[next.clone(), done.clone(), step.1])?;
            step = rec::read_step(&body.call(&[env.clone()])?)?;
        }
        Ok(step.1)
    }))
}
