//! Plain objects, treated as string-keyed records.

use std::cmp::Ordering;

use fl_value::{Error, Object, Result, Value};

use super::{show, take_args, Implementations};
use crate::ops;
use crate::structural::{equals, lte};

pub(super) fn object() -> Implementations {
    Implementations::default()
        .with_static("empty", |_, _| Ok(Value::Object(Object::new())))
        .with_static("zero", |_, _| Ok(Value::Object(Object::new())))
        .with_method("equals", |this, args| {
            let [other] = take_args::<1>("equals", args)?;
            let (a, b) = (fields(this)?, fields(other)?);
            let keys = a.sorted_keys();
            if keys != b.sorted_keys() {
                return Ok(Value::Bool(false));
            }
            for k in &keys {
                if !equals(&field(&a, k), &field(&b, k))? {
                    return Ok(Value::Bool(false));
                }
            }
            Ok(Value::Bool(true))
        })
        .with_method("lte", object_lte)
        .with_method("concat", concat)
        .with_method("alt", concat)
        .with_method("filter", |this, args| {
            let [pred] = take_args::<1>("filter", args)?;
            let out = Object::new();
            for (k, v) in fields(this)?.entries() {
                if pred.call(&[v.clone()])?.truthy() {
                    out.set(k, v);
                }
            }
            Ok(Value::Object(out))
        })
        .with_method("map", |this, args| {
            let [f] = take_args::<1>("map", args)?;
            let out = Object::new();
            for (k, v) in fields(this)?.entries() {
                out.set(k, f.call(&[v])?);
            }
            Ok(Value::Object(out))
        })
        .with_method("ap", |this, args| {
            let [other] = take_args::<1>("ap", args)?;
            let fs = fields(other)?;
            let out = Object::new();
            for (k, v) in fields(this)?.entries() {
                if let Some(f) = fs.get_own(&k) {
                    out.set(k, f.call(&[v])?);
                }
            }
            Ok(Value::Object(out))
        })
        .with_method("reduce", |this, args| {
            let [f, initial] = take_args::<2>("reduce", args)?;
            let o = fields(this)?;
            o.sorted_keys()
                .iter()
                .try_fold(initial.clone(), |acc, k| f.call(&[acc, field(&o, k)]))
        })
        .with_method("traverse", |this, args| {
            let [rep, f] = take_args::<2>("traverse", args)?;
            let mut acc = ops::of(rep, &Value::Object(Object::new()))?;
            for (k, v) in fields(this)?.entries() {
                let set = Value::binary("set", move |o, v| {
                    let singleton = Value::object([(k.clone(), v.clone())]);
                    concat(o, &[singleton])
                });
                acc = ops::lift2(&set, &acc, &f.call(&[v])?)?;
            }
            Ok(acc)
        })
        .with_method("toString", |this, _| {
            let o = fields(this)?;
            let parts = o
                .sorted_keys()
                .into_iter()
                .map(|k| {
                    let v = field(&o, &k);
                    Ok(format!("{}: {}", show(&Value::from(k))?, show(&v)?))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::from(format!("{{{}}}", parts.join(", "))))
        })
}

fn fields(value: &Value) -> Result<Object> {
    value
        .as_object()
        .cloned()
        .ok_or_else(|| Error::type_error("Object", value))
}

fn field(o: &Object, key: &str) -> Value {
    o.get_own(key).unwrap_or(Value::Undefined)
}

fn concat(this: &Value, args: &[Value]) -> Result<Value> {
    let [other] = take_args::<1>("concat", args)?;
    let out = Object::new();
    for (k, v) in fields(this)?.entries() {
        out.set(k, v);
    }
    for (k, v) in fields(other)?.entries() {
        out.set(k, v);
    }
    Ok(Value::Object(out))
}

/// Walks both sorted key lists in step. A smaller key, or running out of
/// keys first, makes this object the lesser; at a shared key the first
/// unequal pair of values decides.
///
/// A key whose values are of different types orders neither way, so the
/// walk is not a total order when such keys are present.
fn object_lte(this: &Value, args: &[Value]) -> Result<Value> {
    let [other] = take_args::<1>("lte", args)?;
    let (a, b) = (fields(this)?, fields(other)?);
    let (these, those) = (a.sorted_keys(), b.sorted_keys());
    for idx in 0.. {
        let (Some(k), Some(z)) = (these.get(idx), those.get(idx)) else {
            return Ok(Value::Bool(idx == these.len()));
        };
        match k.encode_utf16().cmp(z.encode_utf16()) {
            Ordering::Less => return Ok(Value::Bool(true)),
            Ordering::Greater => return Ok(Value::Bool(false)),
            Ordering::Equal => {}
        }
        let (x, y) = (field(&a, k), field(&b, k));
        if !equals(&x, &y)? {
            return lte(&x, &y).map(Value::Bool);
        }
    }
    Ok(Value::Bool(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(entries: &[(&str, Value)]) -> Value {
        Value::object(entries.iter().map(|(k, v)| (*k, v.clone())))
    }

    #[test]
    fn test_concat_later_wins() {
        let a = obj(&[("x", Value::from(1)), ("y", Value::from(2))]);
        let b = obj(&[("y", Value::from(3)), ("z", Value::from(4))]);
        let out = concat(&a, &[b]).unwrap();
        let o = out.as_object().unwrap();
        assert_eq!(o.keys(), vec!["x", "y", "z"]);
        assert_eq!(o.get_own("y").and_then(|v| v.as_number()), Some(3.0));
    }

    #[test]
    fn test_lte_by_keys() {
        let a = obj(&[("a", Value::from(9))]);
        let b = obj(&[("b", Value::from(0))]);
        assert_eq!(object_lte(&a, &[b.clone()]).unwrap().as_bool(), Some(true));
        assert_eq!(object_lte(&b, &[a]).unwrap().as_bool(), Some(false));
    }

    #[test]
    fn test_lte_undefined_field_is_unordered() {
        let a = obj(&[("x", Value::from(1)), ("z", Value::from(3))]);
        let b = obj(&[("x", Value::from(1)), ("z", Value::Undefined)]);
        assert_eq!(object_lte(&a, &[b.clone()]).unwrap().as_bool(), Some(false));
        assert_eq!(object_lte(&b, &[a]).unwrap().as_bool(), Some(false));
    }
}
