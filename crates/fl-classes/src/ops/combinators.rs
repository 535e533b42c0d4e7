//! Small function values the derived operations pass around.

use fl_value::Value;

/// `x => x`
pub(crate) fn identity() -> Value {
    Value::unary("identity", |x| Ok(x.clone()))
}

/// `_ => x`
pub(crate) fn constant(x: Value) -> Value {
    Value::function("constant", move |_, _| Ok(x.clone()))
}

/// `f => f(x)`
pub(crate) fn thrush(x: Value) -> Value {
    Value::unary("thrush", move |f| f.call(&[x.clone()]))
}

/// `(a, b) => [a, b]`
pub(crate) fn pair() -> Value {
    Value::binary("pair", |a, b| Ok(Value::array([a.clone(), b.clone()])))
}

/// `x => [x]`
pub(crate) fn singleton() -> Value {
    Value::unary("singleton", |x| Ok(Value::array([x.clone()])))
}

/// `(a, b) => concat(a, b)`
pub(crate) fn concat() -> Value {
    Value::binary("concat", super::concat)
}

/// `x => !pred(x)`
pub(crate) fn complement(pred: &Value) -> Value {
    let pred = pred.clone();
    Value::unary("complement", move |x| {
        Ok(Value::Bool(!pred.call(&[x.clone()])?.truthy()))
    })
}

/// Curries a binary function: `a => b => f(a, b)`.
pub(crate) fn curry2(f: &Value) -> Value {
    let f = f.clone();
    Value::unary("curried", move |a| {
        let (f, a) = (f.clone(), a.clone());
        Ok(Value::unary("curried", move |b| f.call(&[a.clone(), b.clone()])))
    })
}

/// Curries a ternary function: `a => b => c => f(a, b, c)`.
pub(crate) fn curry3(f: &Value) -> Value {
    let f = f.clone();
    Value::unary("curried", move |a| {
        let (f, a) = (f.clone(), a.clone());
        let rest = Value::binary("curried", move |b, c| {
            f.call(&[a.clone(), b.clone(), c.clone()])
        });
        Ok(curry2(&rest))
    })
}
