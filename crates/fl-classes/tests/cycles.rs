//! Integration tests for self-referential structures and the depth limit.

use fl_classes::fl_session::{with_options, Options};
use fl_classes::{equals, lte, to_string};
use fl_value::{Array, Error, Object, Value};

/// `xs = [xs]`
fn loop1() -> Value {
    let xs = Array::new();
    xs.push(Value::Array(xs.clone()));
    Value::Array(xs)
}

/// `xs = [[xs]]`: the same infinite structure as [`loop1`], unrolled once.
fn loop2() -> Value {
    let xs = Array::new();
    let ys = Array::new();
    ys.push(Value::Array(xs.clone()));
    xs.push(Value::Array(ys));
    Value::Array(xs)
}

fn nested(depth: usize) -> Value {
    (0..depth).fold(Value::from(0), |inner, _| Value::array([inner]))
}

/// Every level of `nested(depth)`, innermost first.
fn levels(depth: usize) -> Vec<Value> {
    let mut out = vec![Value::from(0)];
    for idx in 0..depth {
        let outer = Value::array([out[idx].clone()]);
        out.push(outer);
    }
    out
}

/// Drops a deep structure outermost first, so each drop frees one level.
fn release(levels: Vec<Value>) {
    levels.into_iter().rev().for_each(drop);
}

#[test]
fn test_self_referential_array() {
    let xs = loop1();
    assert!(equals(&xs, &xs).unwrap());
    assert!(lte(&xs, &xs).unwrap());
    assert_eq!(to_string(&xs).unwrap(), "[<Circular>]");
}

#[test]
fn test_two_encodings_of_one_structure() {
    let (a, b) = (loop1(), loop2());
    assert!(equals(&a, &b).unwrap());
    assert!(equals(&b, &a).unwrap());
    assert!(lte(&a, &b).unwrap());
    assert!(lte(&b, &a).unwrap());
    assert_eq!(to_string(&b).unwrap(), "[[<Circular>]]");
}

#[test]
fn test_self_referential_object() {
    let o = Object::new();
    o.set("name", Value::from("root"));
    o.set("self", Value::Object(o.clone()));
    let v = Value::Object(o);
    assert!(equals(&v, &v).unwrap());
    assert_eq!(to_string(&v).unwrap(), r#"{"name": "root", "self": <Circular>}"#);
}

#[test]
fn test_mutual_recursion_through_array_props() {
    let xs = Array::from_vec(vec![Value::from(1)]);
    let o = Object::new();
    o.set("list", Value::Array(xs.clone()));
    xs.set_prop("owner", Value::Object(o));
    assert_eq!(
        to_string(&Value::Array(xs)).unwrap(),
        r#"[1, "owner": {"list": <Circular>}]"#
    );
}

#[test]
fn test_guards_are_released_after_errors() {
    let failing = Value::object([(
        "fantasy-land/equals",
        Value::function("equals", |_, _| Err(Error::user("boom"))),
    )]);
    let xs = Value::array([failing.clone()]);
    assert!(equals(&xs, &xs).is_err());
    // A leaked guard would make the second comparison hit the cycle path.
    assert_eq!(equals(&xs, &xs), Err(Error::user("boom")));
}

#[test]
fn test_depth_limit() {
    let (a, b) = (nested(60), nested(60));
    let limited = Options::default().with_max_depth(32);
    assert_eq!(
        with_options(limited.clone(), || equals(&a, &b)),
        Err(Error::RecursionLimit(32))
    );
    assert_eq!(
        with_options(limited.clone(), || lte(&a, &b)),
        Err(Error::RecursionLimit(32))
    );
    assert_eq!(
        with_options(limited, || to_string(&a)),
        Err(Error::RecursionLimit(32))
    );
    assert!(equals(&a, &b).unwrap());
    let rendered = to_string(&a).unwrap();
    assert_eq!(rendered, format!("{}0{}", "[".repeat(60), "]".repeat(60)));
}

#[test]
fn test_default_depth_fits_on_a_test_thread() {
    let depth = Options::default().max_depth - 1;
    let (a, b) = (nested(depth), nested(depth));
    assert_eq!(equals(&a, &b), Ok(true));
    assert_eq!(lte(&a, &b), Ok(true));
    let expected = format!("{}0{}", "[".repeat(depth), "]".repeat(depth));
    assert_eq!(to_string(&a), Ok(expected));
}

#[test]
fn test_deep_nesting_beyond_the_thread_stack() {
    let depth = 5_000;
    let (a, b) = (levels(depth), levels(depth));
    let (x, y) = (&a[depth], &b[depth]);
    let raised = Options::default().with_max_depth(depth + 1);
    assert_eq!(with_options(raised.clone(), || equals(x, y)), Ok(true));
    assert_eq!(with_options(raised.clone(), || lte(x, y)), Ok(true));
    let rendered = with_options(raised, || to_string(x)).unwrap();
    assert_eq!(rendered.len(), 2 * depth + 1);
    assert_eq!(
        equals(x, y),
        Err(Error::RecursionLimit(Options::default().max_depth))
    );
    release(a);
    release(b);
}
