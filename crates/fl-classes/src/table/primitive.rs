//! Scalars: null, undefined, booleans, numbers, dates, regular expressions,
//! strings and errors.

use fl_value::date::to_iso_string;
use fl_value::number::format_number;
use fl_value::{Error, Result, Value};

use super::{show, take_args, Implementations};

pub(super) fn null() -> Implementations {
    Implementations::default()
        .with_method("equals", |_, args| {
            let [other] = take_args::<1>("equals", args)?;
            Ok(Value::Bool(other.is_null()))
        })
        .with_method("lte", always_lte)
        .with_method("toString", |_, _| Ok(Value::from("null")))
}

pub(super) fn undefined() -> Implementations {
    Implementations::default()
        .with_method("equals", |_, args| {
            let [other] = take_args::<1>("equals", args)?;
            Ok(Value::Bool(other.is_undefined()))
        })
        .with_method("lte", always_lte)
        .with_method("toString", |_, _| Ok(Value::from("undefined")))
}

fn always_lte(_: &Value, args: &[Value]) -> Result<Value> {
    take_args::<1>("lte", args)?;
    Ok(Value::Bool(true))
}

// ============================================================================
// Boxable primitives
// ============================================================================

/// Pairs up two primitives of the same wrapping: both bare or both boxed.
/// A bare primitive never equals or orders against a boxed one.
fn unwrap_pair(this: &Value, other: &Value) -> Option<(Value, Value)> {
    match (this, other) {
        (Value::Boxed(a), Value::Boxed(b)) => Some((a.value(), b.value())),
        (Value::Boxed(_), _) | (_, Value::Boxed(_)) => None,
        _ => Some((this.clone(), other.clone())),
    }
}

fn compare_unwrapped(
    method: &str,
    this: &Value,
    args: &[Value],
    cmp: fn(&Value, &Value) -> bool,
) -> Result<Value> {
    let [other] = take_args::<1>(method, args)?;
    Ok(Value::Bool(
        unwrap_pair(this, other).is_some_and(|(a, b)| cmp(&a, &b)),
    ))
}

fn show_boxed(this: &Value, name: &str, bare: impl Fn(&Value) -> Result<String>) -> Result<Value> {
    match this {
        Value::Boxed(boxed) => Ok(Value::from(format!(
            "new {name} ({})",
            bare(&boxed.value())?
        ))),
        _ => bare(this).map(Value::from),
    }
}

pub(super) fn boolean() -> Implementations {
    Implementations::default()
        .with_method("equals", |this, args| {
            compare_unwrapped("equals", this, args, |a, b| {
                matches!((a, b), (Value::Bool(x), Value::Bool(y)) if x == y)
            })
        })
        .with_method("lte", |this, args| {
            compare_unwrapped("lte", this, args, |a, b| {
                matches!((a, b), (Value::Bool(x), Value::Bool(y)) if !*x || *y)
            })
        })
        .with_method("toString", |this, _| {
            show_boxed(this, "Boolean", |v| match v {
                Value::Bool(b) => Ok(b.to_string()),
                other => Err(Error::type_error("Boolean", other)),
            })
        })
}

pub(super) fn number_equals(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

/// `NaN` is the least number.
pub(super) fn number_lte(a: f64, b: f64) -> bool {
    a.is_nan() || (!b.is_nan() && a <= b)
}

pub(super) fn render_number(n: f64) -> String {
    if n == 0.0 && n.is_sign_negative() {
        "-0".to_string()
    } else {
        format_number(n)
    }
}

pub(super) fn number() -> Implementations {
    Implementations::default()
        .with_method("equals", |this, args| {
            compare_unwrapped("equals", this, args, |a, b| match (a, b) {
                (Value::Number(x), Value::Number(y)) => number_equals(*x, *y),
                _ => false,
            })
        })
        .with_method("lte", |this, args| {
            compare_unwrapped("lte", this, args, |a, b| match (a, b) {
                (Value::Number(x), Value::Number(y)) => number_lte(*x, *y),
                _ => false,
            })
        })
        .with_method("toString", |this, _| {
            show_boxed(this, "Number", |v| match v {
                Value::Number(n) => Ok(render_number(*n)),
                other => Err(Error::type_error("Number", other)),
            })
        })
}

/// UTF-16 code unit order.
fn string_lte(a: &str, b: &str) -> bool {
    a.encode_utf16().le(b.encode_utf16())
}

pub(super) fn quote(s: &str) -> Result<String> {
    serde_json::to_string(s).map_err(|e| Error::Invalid(e.to_string()))
}

pub(super) fn string() -> Implementations {
    Implementations::default()
        .with_static("empty", |_, _| Ok(Value::from("")))
        .with_method("equals", |this, args| {
            compare_unwrapped("equals", this, args, |a, b| match (a, b) {
                (Value::String(x), Value::String(y)) => x == y,
                _ => false,
            })
        })
        .with_method("lte", |this, args| {
            compare_unwrapped("lte", this, args, |a, b| match (a, b) {
                (Value::String(x), Value::String(y)) => string_lte(x, y),
                _ => false,
            })
        })
        .with_method("concat", |this, args| {
            let [other] = take_args::<1>("concat", args)?;
            match (this, other) {
                (Value::String(a), Value::String(b)) => Ok(Value::from(format!("{a}{b}"))),
                (Value::String(_), other) => Err(Error::type_error("String", other)),
                (this, _) => Err(Error::type_error("String", this)),
            }
        })
        .with_method("toString", |this, _| {
            show_boxed(this, "String", |v| match v {
                Value::String(s) => quote(s),
                other => Err(Error::type_error("String", other)),
            })
        })
}

// ============================================================================
// Dates, regular expressions and errors
// ============================================================================

fn time_values(method: &str, this: &Value, args: &[Value]) -> Result<Option<(f64, f64)>> {
    let [other] = take_args::<1>(method, args)?;
    Ok(match (this, other) {
        (Value::Date(a), Value::Date(b)) => Some((*a, *b)),
        _ => None,
    })
}

pub(super) fn date() -> Implementations {
    Implementations::default()
        .with_method("equals", |this, args| {
            let pair = time_values("equals", this, args)?;
            Ok(Value::Bool(pair.is_some_and(|(a, b)| number_equals(a, b))))
        })
        .with_method("lte", |this, args| {
            let pair = time_values("lte", this, args)?;
            Ok(Value::Bool(pair.is_some_and(|(a, b)| number_lte(a, b))))
        })
        .with_method("toString", |this, _| {
            let Value::Date(ms) = this else {
                return Err(Error::type_error("Date", this));
            };
            let iso = match to_iso_string(*ms) {
                Some(text) => quote(&text)?,
                None => "NaN".to_string(),
            };
            Ok(Value::from(format!("new Date ({iso})")))
        })
}

pub(super) fn regexp() -> Implementations {
    Implementations::default()
        .with_method("equals", |this, args| {
            let [other] = take_args::<1>("equals", args)?;
            Ok(Value::Bool(match (this, other) {
                (Value::RegExp(a), Value::RegExp(b)) => {
                    a.source() == b.source() && a.flags() == b.flags()
                }
                _ => false,
            }))
        })
        .with_method("toString", |this, _| match this {
            Value::RegExp(re) => Ok(Value::from(re.to_string())),
            other => Err(Error::type_error("RegExp", other)),
        })
}

pub(super) fn error() -> Implementations {
    Implementations::default()
        .with_method("equals", |this, args| {
            let [other] = take_args::<1>("equals", args)?;
            Ok(Value::Bool(match (this, other) {
                (Value::Error(a), Value::Error(b)) => {
                    a.name() == b.name() && a.message() == b.message()
                }
                _ => false,
            }))
        })
        .with_method("toString", |this, _| match this {
            Value::Error(e) => {
                let message = show(&Value::from(e.message()))?;
                Ok(Value::from(format!("new {} ({message})", e.name())))
            }
            other => Err(Error::type_error("Error", other)),
        })
}
