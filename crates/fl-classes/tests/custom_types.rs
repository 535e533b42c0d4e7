//! Integration tests for user-defined types.
//!
//! The fixtures below participate through type representatives whose
//! prototypes carry `fantasy-land/` methods and whose statics carry the
//! constructor-level ones.

use fl_classes::fl_session::{with_options, Options};
use fl_classes::*;
use fl_value::{Builtin, Error, Result, TypeRep, Value};

fn num(n: f64) -> Value {
    Value::from(n)
}

fn nums(xs: &[i32]) -> Value {
    Value::array(xs.iter().map(|&x| Value::from(x)))
}

fn show(x: &Value) -> String {
    to_string(x).unwrap()
}

fn field(x: &Value, key: &str) -> Value {
    x.lookup(key).unwrap_or(Value::Undefined)
}

/// The representative `this` was built from.
fn rep_of(this: &Value) -> Result<TypeRep> {
    match this.constructor() {
        Some(Value::TypeRep(rep)) => Ok(rep),
        _ => Err(Error::type_error("instance", this)),
    }
}

/// The representative a static method is bound to.
fn this_rep(this: &Value) -> Result<TypeRep> {
    this.as_type_rep()
        .cloned()
        .ok_or_else(|| Error::type_error("type representative", this))
}

fn add() -> Value {
    Value::binary("add", |a, b| {
        Ok(num(a.as_number().unwrap_or(f64::NAN) + b.as_number().unwrap_or(f64::NAN)))
    })
}

fn inc() -> Value {
    Value::unary("inc", |x| Ok(num(x.as_number().unwrap_or(f64::NAN) + 1.0)))
}

fn is_even() -> Value {
    Value::unary("even", |x| Ok(Value::Bool(x.as_number().unwrap_or(1.0) % 2.0 == 0.0)))
}

// ============================================================================
// Identity
// ============================================================================

fn identity_rep() -> TypeRep {
    fn wrap(this: &Value, x: Value) -> Result<Value> {
        Ok(rep_of(this)?.construct([("value", x)]))
    }

    TypeRep::new("Identity")
        .with_type_ident("fl-test/Identity@1")
        .with_static(
            "fantasy-land/of",
            Value::function("of", |this, args| {
                Ok(this_rep(this)?.construct([("value", args[0].clone())]))
            }),
        )
        .with_static(
            "fantasy-land/chainRec",
            Value::function("chainRec", |this, args| {
                let (f, mut seed) = (args[0].clone(), args[1].clone());
                let next_ = Value::unary("next", |x| Ok(rec::next(x.clone())));
                let done_ = Value::unary("done", |x| Ok(rec::done(x.clone())));
                loop {
                    let step = field(&f.call(&[next_.clone(), done_.clone(), seed])?, "value");
                    let value = field(&step, "value");
                    if field(&step, "done").truthy() {
                        return Ok(this_rep(this)?.construct([("value", value)]));
                    }
                    seed = value;
                }
            }),
        )
        .with_method(
            "fantasy-land/equals",
            Value::function("equals", |this, args| {
                equals(&field(this, "value"), &field(&args[0], "value")).map(Value::Bool)
            }),
        )
        .with_method(
            "fantasy-land/lte",
            Value::function("lte", |this, args| {
                lte(&field(this, "value"), &field(&args[0], "value")).map(Value::Bool)
            }),
        )
        .with_method(
            "fantasy-land/concat",
            Value::function("concat", |this, args| {
                wrap(this, concat(&field(this, "value"), &field(&args[0], "value"))?)
            }),
        )
        .with_method(
            "fantasy-land/map",
            Value::function("map", |this, args| {
                wrap(this, args[0].call(&[field(this, "value")])?)
            }),
        )
        .with_method(
            "fantasy-land/ap",
            Value::function("ap", |this, args| {
                wrap(this, field(&args[0], "value").call(&[field(this, "value")])?)
            }),
        )
        .with_method(
            "fantasy-land/chain",
            Value::function("chain", |this, args| args[0].call(&[field(this, "value")])),
        )
        .with_method(
            "fantasy-land/reduce",
            Value::function("reduce", |this, args| {
                args[0].call(&[args[1].clone(), field(this, "value")])
            }),
        )
        .with_method(
            "fantasy-land/traverse",
            Value::function("traverse", |this, args| {
                let me = this.clone();
                let rewrap = Value::unary("Identity", move |x| wrap(&me, x.clone()));
                map(&rewrap, &args[1].call(&[field(this, "value")])?)
            }),
        )
        .with_method(
            "fantasy-land/extend",
            Value::function("extend", |this, args| wrap(this, args[0].call(&[this.clone()])?)),
        )
        .with_method(
            "fantasy-land/extract",
            Value::function("extract", |this, _| Ok(field(this, "value"))),
        )
        .with_method(
            "toString",
            Value::function("toString", |this, _| {
                Ok(Value::from(format!("Identity ({})", to_string(&field(this, "value"))?)))
            }),
        )
}

fn id_of(rep: &TypeRep, x: Value) -> Value {
    rep.construct([("value", x)])
}

#[test]
fn test_identity_membership() {
    let rep = identity_rep();
    let x = id_of(&rep, num(1.0));
    for class in [
        classes::setoid(),
        classes::ord(),
        classes::semigroup(),
        classes::functor(),
        classes::apply(),
        classes::applicative(),
        classes::chain(),
        classes::monad(),
        classes::chain_rec(),
        classes::foldable(),
        classes::traversable(),
        classes::extend(),
        classes::comonad(),
    ] {
        assert!(class.test(&x), "Identity should be a {class}");
    }
    for class in [
        classes::monoid(),
        classes::alt(),
        classes::filterable(),
        classes::contravariant(),
        classes::bifunctor(),
    ] {
        assert!(!class.test(&x), "Identity should not be a {class}");
    }
    assert_eq!(x.type_name(), "fl-test/Identity@1");
}

#[test]
fn test_identity_registry_lookup() {
    let rep = identity_rep();
    let x = id_of(&rep, num(1.0));
    let names: Vec<&str> = classes::registry().classes_of(&x).map(TypeClass::name).collect();
    assert!(names.contains(&"fl-classes/Monad"));
    assert!(names.contains(&"fl-classes/Comonad"));
    assert!(!names.contains(&"fl-classes/Alternative"));
}

#[test]
fn test_identity_operations() {
    let rep = identity_rep();
    let one = id_of(&rep, num(1.0));
    let two = id_of(&rep, num(2.0));

    assert_eq!(show(&one), "Identity (1)");
    assert!(equals(&map(&inc(), &one).unwrap(), &two).unwrap());
    assert!(equals(&lift2(&add(), &one, &two).unwrap(), &id_of(&rep, num(3.0))).unwrap());
    assert!(equals(&of(&Value::from(rep.clone()), &num(1.0)).unwrap(), &one).unwrap());
    assert!(lte(&one, &two).unwrap());
    assert!(!lte(&two, &one).unwrap());
    assert_eq!(extract(&two).unwrap().as_number(), Some(2.0));
    assert_eq!(show(&duplicate(&one).unwrap()), "Identity (Identity (1))");
    assert_eq!(reduce(&add(), &num(10.0), &two).unwrap().as_number(), Some(12.0));
    assert_eq!(size(&two).unwrap(), 1);

    let words = concat(
        &id_of(&rep, Value::from("ab")),
        &id_of(&rep, Value::from("cd")),
    )
    .unwrap();
    assert_eq!(show(&words), r#"Identity ("abcd")"#);

    let to_id = {
        let rep = rep.clone();
        Value::unary("toId", move |x| Ok(id_of(&rep, inc().call(&[x.clone()])?)))
    };
    assert_eq!(show(&chain(&to_id, &one).unwrap()), "Identity (2)");
}

#[test]
fn test_identity_structural_nesting() {
    let rep = identity_rep();
    let a = id_of(&rep, Value::array([num(1.0), id_of(&rep, num(2.0))]));
    let b = id_of(&rep, Value::array([num(1.0), id_of(&rep, num(2.0))]));
    let c = id_of(&rep, Value::array([num(1.0), id_of(&rep, num(3.0))]));
    assert!(equals(&a, &b).unwrap());
    assert!(!equals(&a, &c).unwrap());
    assert!(lte(&a, &c).unwrap());
    assert_eq!(show(&a), "Identity ([1, Identity (2)])");
}

#[test]
fn test_sort_custom_ord() {
    let rep = identity_rep();
    let xs = Value::array([3.0, 1.0, 2.0].map(|n| id_of(&rep, num(n))));
    let sorted = sort(&xs).unwrap();
    assert_eq!(show(&sorted), "[Identity (1), Identity (2), Identity (3)]");
    assert!(elem(&id_of(&rep, num(2.0)), &xs).unwrap());
}

#[test]
fn test_traverse_identity() {
    let rep = identity_rep();
    let rep_value = Value::from(rep.clone());
    let xs = Value::array([id_of(&rep, num(1.0)), id_of(&rep, num(2.0))]);
    assert_eq!(show(&sequence(&rep_value, &xs).unwrap()), "Identity ([1, 2])");

    let range = Value::unary("range", |x| {
        let n = x.as_number().unwrap_or(0.0);
        Ok(Value::array([num(n), num(n + 1.0)]))
    });
    let out = traverse(&Value::from(TypeRep::builtin(Builtin::Array)), &range, &id_of(&rep, num(1.0)))
        .unwrap();
    assert_eq!(show(&out), "[Identity (1), Identity (2)]");
}

#[test]
fn test_identity_chain_rec() {
    let rep = identity_rep();
    let rep_id = rep.clone();
    let step = Value::function("step", move |_, args| {
        let n = args[2].as_number().unwrap_or(0.0);
        let inner = if n >= 10_000.0 {
            args[1].call(&[num(n)])?
        } else {
            args[0].call(&[num(n + 1.0)])?
        };
        Ok(id_of(&rep_id, inner))
    });
    let out = chain_rec(&Value::from(rep), &step, &num(0.0)).unwrap();
    assert_eq!(show(&out), "Identity (10000)");
}

#[test]
fn test_prototype_is_not_an_instance() {
    let rep = identity_rep();
    let proto = Value::Object(rep.prototype().clone());
    assert!(proto.is_prototype());
    assert_eq!(proto.type_name(), "Object");
    assert!(!classes::comonad().test(&proto));
    assert!(classes::comonad().test(&id_of(&rep, num(1.0))));
}

// ============================================================================
// Maybe
// ============================================================================

fn maybe_rep() -> TypeRep {
    fn just(rep: &TypeRep, x: Value) -> Value {
        rep.construct([("isJust", Value::Bool(true)), ("value", x)])
    }
    fn nothing(rep: &TypeRep) -> Value {
        rep.construct([("isJust", Value::Bool(false))])
    }
    fn is_just(x: &Value) -> bool {
        field(x, "isJust").truthy()
    }

    TypeRep::new("Maybe")
        .with_type_ident("fl-test/Maybe@1")
        .with_static(
            "fantasy-land/of",
            Value::function("of", |this, args| Ok(just(&this_rep(this)?, args[0].clone()))),
        )
        .with_static(
            "fantasy-land/zero",
            Value::function("zero", |this, _| Ok(nothing(&this_rep(this)?))),
        )
        .with_method(
            "fantasy-land/equals",
            Value::function("equals", |this, args| {
                let other = &args[0];
                Ok(Value::Bool(match (is_just(this), is_just(other)) {
                    (true, true) => equals(&field(this, "value"), &field(other, "value"))?,
                    (false, false) => true,
                    _ => false,
                }))
            }),
        )
        .with_method(
            "fantasy-land/map",
            Value::function("map", |this, args| {
                if !is_just(this) {
                    return Ok(this.clone());
                }
                Ok(just(&rep_of(this)?, args[0].call(&[field(this, "value")])?))
            }),
        )
        .with_method(
            "fantasy-land/ap",
            Value::function("ap", |this, args| {
                let fs = &args[0];
                if !is_just(fs) {
                    return Ok(fs.clone());
                }
                if !is_just(this) {
                    return Ok(this.clone());
                }
                let out = field(fs, "value").call(&[field(this, "value")])?;
                Ok(just(&rep_of(this)?, out))
            }),
        )
        .with_method(
            "fantasy-land/chain",
            Value::function("chain", |this, args| {
                if is_just(this) {
                    args[0].call(&[field(this, "value")])
                } else {
                    Ok(this.clone())
                }
            }),
        )
        .with_method(
            "fantasy-land/alt",
            Value::function("alt", |this, args| {
                Ok(if is_just(this) { this.clone() } else { args[0].clone() })
            }),
        )
        .with_method(
            "fantasy-land/reduce",
            Value::function("reduce", |this, args| {
                if is_just(this) {
                    args[0].call(&[args[1].clone(), field(this, "value")])
                } else {
                    Ok(args[1].clone())
                }
            }),
        )
        .with_method(
            "toString",
            Value::function("toString", |this, _| {
                Ok(Value::from(if is_just(this) {
                    format!("Just ({})", to_string(&field(this, "value"))?)
                } else {
                    "Nothing".to_string()
                }))
            }),
        )
}

fn just(rep: &TypeRep, x: Value) -> Value {
    of(&Value::from(rep.clone()), &x).unwrap()
}

fn nothing(rep: &TypeRep) -> Value {
    zero(&Value::from(rep.clone())).unwrap()
}

fn positive(rep: &TypeRep) -> Value {
    let rep = rep.clone();
    Value::unary("positive", move |x| {
        Ok(if x.as_number().unwrap_or(0.0) > 0.0 {
            just(&rep, x.clone())
        } else {
            nothing(&rep)
        })
    })
}

#[test]
fn test_maybe_membership() {
    let rep = maybe_rep();
    for x in [just(&rep, num(1.0)), nothing(&rep)] {
        assert!(classes::alternative().test(&x));
        assert!(classes::monad().test(&x));
        assert!(classes::foldable().test(&x));
        assert!(!classes::traversable().test(&x));
        assert!(!classes::ord().test(&x));
    }
}

#[test]
fn test_maybe_operations() {
    let rep = maybe_rep();
    assert_eq!(show(&map(&inc(), &just(&rep, num(1.0))).unwrap()), "Just (2)");
    assert_eq!(show(&map(&inc(), &nothing(&rep)).unwrap()), "Nothing");
    assert!(equals(&nothing(&rep), &nothing(&rep)).unwrap());
    assert!(!equals(&nothing(&rep), &just(&rep, num(1.0))).unwrap());
    assert_eq!(
        show(&alt(&nothing(&rep), &just(&rep, num(1.0))).unwrap()),
        "Just (1)"
    );
    assert_eq!(
        show(&alt(&just(&rep, num(2.0)), &just(&rep, num(1.0))).unwrap()),
        "Just (2)"
    );
    let nested = just(&rep, just(&rep, num(1.0)));
    assert_eq!(show(&join(&nested).unwrap()), "Just (1)");
    assert_eq!(size(&nothing(&rep)).unwrap(), 0);
}

#[test]
fn test_filter_m_uses_zero() {
    let rep = maybe_rep();
    assert_eq!(show(&filter_m(&is_even(), &just(&rep, num(2.0))).unwrap()), "Just (2)");
    assert_eq!(show(&filter_m(&is_even(), &just(&rep, num(3.0))).unwrap()), "Nothing");
}

#[test]
fn test_traverse_array_with_maybe() {
    let rep = maybe_rep();
    let rep_value = Value::from(rep.clone());
    let out = traverse(&rep_value, &positive(&rep), &nums(&[1, 2, 3])).unwrap();
    assert_eq!(show(&out), "Just ([1, 2, 3])");
    let out = traverse(&rep_value, &positive(&rep), &nums(&[1, -2, 3])).unwrap();
    assert_eq!(show(&out), "Nothing");
    let out = traverse(&rep_value, &positive(&rep), &nums(&[])).unwrap();
    assert_eq!(show(&out), "Just ([])");
}

#[test]
fn test_traverse_object_with_maybe() {
    let rep = maybe_rep();
    let rep_value = Value::from(rep.clone());
    let o = Value::object([("a", num(1.0)), ("b", num(2.0))]);
    let out = traverse(&rep_value, &positive(&rep), &o).unwrap();
    assert_eq!(show(&out), r#"Just ({"a": 1, "b": 2})"#);
}

// ============================================================================
// List: only Monoid, Applicative's `of` and Foldable
// ============================================================================

fn list_rep() -> TypeRep {
    fn items(x: &Value) -> Vec<Value> {
        field(x, "items").as_array().map(|xs| xs.to_vec()).unwrap_or_default()
    }

    TypeRep::new("List")
        .with_type_ident("fl-test/List@1")
        .with_static(
            "fantasy-land/of",
            Value::function("of", |this, args| {
                Ok(this_rep(this)?.construct([("items", Value::array([args[0].clone()]))]))
            }),
        )
        .with_static(
            "fantasy-land/empty",
            Value::function("empty", |this, _| {
                Ok(this_rep(this)?.construct([("items", Value::array([]))]))
            }),
        )
        .with_method(
            "fantasy-land/concat",
            Value::function("concat", |this, args| {
                let mut xs = items(this);
                xs.extend(items(&args[0]));
                Ok(rep_of(this)?.construct([("items", Value::from(xs))]))
            }),
        )
        .with_method(
            "fantasy-land/reduce",
            Value::function("reduce", |this, args| {
                items(this)
                    .into_iter()
                    .try_fold(args[1].clone(), |acc, x| args[0].call(&[acc, x]))
            }),
        )
        .with_method(
            "toString",
            Value::function("toString", |this, _| {
                Ok(Value::from(format!("List {}", to_string(&field(this, "items"))?)))
            }),
        )
}

fn list(rep: &TypeRep, xs: &[i32]) -> Value {
    rep.construct([("items", nums(xs))])
}

#[test]
fn test_list_rebuilds_through_monoid() {
    let rep = list_rep();
    let xs = list(&rep, &[3, 1, 4, 1, 5]);
    assert!(!classes::filterable().test(&xs));
    assert_eq!(show(&filter(&is_even(), &xs).unwrap()), "List [4]");
    assert_eq!(show(&reject(&is_even(), &xs).unwrap()), "List [3, 1, 1, 5]");
    assert_eq!(show(&reverse(&xs).unwrap()), "List [5, 1, 4, 1, 3]");
    assert_eq!(show(&sort(&xs).unwrap()), "List [1, 1, 3, 4, 5]");
    assert_eq!(size(&xs).unwrap(), 5);
    let odd = Value::unary("odd", |x| Ok(Value::Bool(x.as_number().unwrap_or(0.0) % 2.0 == 1.0)));
    assert_eq!(show(&take_while(&odd, &xs).unwrap()), "List [3, 1]");
    assert_eq!(show(&drop_while(&odd, &xs).unwrap()), "List [4, 1, 5]");
    assert_eq!(show(&append(&Value::from(9), &xs).unwrap()), "List [3, 1, 4, 1, 5, 9]");
    assert!(all(&Value::unary("small", |x| Ok(Value::Bool(x.as_number().unwrap_or(9.0) < 6.0))), &xs).unwrap());
}

// ============================================================================
// Plain objects, options and user-declared classes
// ============================================================================

#[test]
fn test_plain_object_with_namespaced_field() {
    let boxed = Value::object([
        ("n", num(1.0)),
        (
            "fantasy-land/map",
            Value::function("map", |this, args| {
                Ok(Value::object([("n", args[0].call(&[field(this, "n")])?)]))
            }),
        ),
    ]);
    let out = map(&inc(), &boxed).unwrap();
    assert_eq!(show(&out), r#"{"n": 2}"#);
}

#[test]
fn test_plain_object_as_representative() {
    let rep = Value::object([(
        "fantasy-land/of",
        Value::function("of", |_, args| Ok(Value::array([args[0].clone(), args[0].clone()]))),
    )]);
    assert_eq!(show(&of(&rep, &num(1.0)).unwrap()), "[1, 1]");
}

#[test]
fn test_namespace_option() {
    let boxed = Value::object([(
        "custom/extract",
        Value::function("extract", |_, _| Ok(Value::from("found"))),
    )]);
    let out = with_options(Options::default().with_namespace("custom/"), || extract(&boxed));
    assert_eq!(out.unwrap().as_str(), Some("found"));
    assert!(matches!(extract(&boxed), Err(Error::Unsupported { .. })));
}

#[test]
fn test_user_declared_classes() {
    let pointed = declare_method_class(
        "my-lib/Pointed",
        vec![classes::functor().clone()],
        [("of", Location::Constructor)],
    )
    .unwrap();
    let rep = identity_rep();
    assert!(pointed.test(&id_of(&rep, num(1.0))));
    assert!(pointed.test(&nums(&[])));
    assert!(!pointed.test(&num(1.0)));
    assert!(!pointed.test(&Value::object::<&str, _>([])));
    let accessor = pointed.method("of").unwrap();
    let made = accessor.resolve(&Value::from(rep)).unwrap().call(&[num(5.0)]).unwrap();
    assert_eq!(show(&made), "Identity (5)");

    let positive = declare_type_class(
        "my-lib/Positive",
        "https://example.invalid/positive",
        vec![classes::ord().clone()],
        |x| x.as_number().is_some_and(|n| n > 0.0),
    )
    .unwrap();
    assert!(positive.test(&num(1.0)));
    assert!(!positive.test(&num(-1.0)));
    assert!(!positive.test(&Value::from("1")));

    let mut registry = Registry::new();
    registry.register(pointed).unwrap();
    registry.register(positive.clone()).unwrap();
    assert!(matches!(registry.register(positive), Err(Error::Declaration(_))));
    let two = num(2.0);
    let names: Vec<&str> = registry.classes_of(&two).map(TypeClass::name).collect();
    assert_eq!(names, vec!["my-lib/Positive"]);
}
