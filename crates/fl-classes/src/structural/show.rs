use fl_value::{Error, Result, Value};
use tracing::trace;

use crate::guard::{self, Entry};
use crate::table::MethodTable;

const OBJECT_TAG: &str = "[object Object]";

/// Renders `x` as source-like text.
///
/// A value met again while it is being rendered is replaced by the
/// configured circular marker. Objects with a `toString` field (own or
/// inherited) that yields something other than `[object Object]` render
/// through it; everything else uses the built-in renderer for its type.
///
/// # Errors
///
/// Propagates errors from custom `toString` fields, and returns
/// [`Error::RecursionLimit`] for nesting deeper than the configured limit.
pub fn to_string(x: &Value) -> Result<String> {
    guard::with_stack(|| render_level(x))
}

fn render_level(x: &Value) -> Result<String> {
    let _guard = match guard::enter_value(x)? {
        Entry::Cycle => {
            trace!(type_name = %x.type_name(), "to_string: cycle detected");
            return Ok(fl_session::current().circular_marker.clone());
        }
        Entry::Entered(guard) => Some(guard),
        Entry::Untracked => None,
    };
    if let Some(custom) = custom(x)? {
        return Ok(custom);
    }
    let table = MethodTable::global();
    let render = table
        .prototype_method(&x.type_name(), "toString")
        .or_else(|| table.prototype_method(x.builtin().name(), "toString"))
        .ok_or_else(|| Error::unsupported("toString", x))?;
    match render(x, &[])? {
        Value::String(s) => Ok(s.to_string()),
        other => Err(Error::type_error("String", &other)),
    }
}

fn custom(x: &Value) -> Result<Option<String>> {
    let Value::Object(o) = x else {
        return Ok(None);
    };
    if o.is_prototype() {
        return Ok(None);
    }
    let Some(Value::Function(f)) = o.get("toString") else {
        return Ok(None);
    };
    Ok(match f.call_with(x, &[])? {
        Value::String(s) if &*s != OBJECT_TAG => Some(s.to_string()),
        _ => None,
    })
}
