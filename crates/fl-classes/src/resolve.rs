//! Capability resolution.
//!
//! Finds the function implementing a capability for a subject. Custom types
//! expose capabilities as fields under the namespaced key (by default
//! `fantasy-land/<capability>`); built-in types fall back to the
//! [`MethodTable`]. The function returned is bound to the subject, so callers
//! pass only the capability's own arguments.

use fl_value::{Function, Value};
use tracing::trace;

use crate::table::{MethodTable, NativeMethod};

/// Where a capability is looked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// On the type representative (`of`, `empty`, `zero`, `id`, `chainRec`).
    Constructor,
    /// On the value itself.
    Value,
}

/// Resolves `capability` on `subject`.
///
/// For [`Location::Value`] the subject is an instance: its fields (own, then
/// inherited from its representative's prototype) are searched unless it is
/// itself a prototype, then the method table's instance operations for its
/// runtime type.
///
/// For [`Location::Constructor`] the subject is a type representative: its
/// static fields are searched, then, since representatives are invokable,
/// the method table's static operations under its display name. A plain
/// object standing in for a representative is searched but has no fallback.
///
/// Returns `None` when nothing implements the capability.
#[must_use]
pub fn resolve(capability: &str, location: Location, subject: &Value) -> Option<Function> {
    let found = match location {
        Location::Value => resolve_on_value(capability, subject),
        Location::Constructor => resolve_on_rep(capability, subject),
    };
    if found.is_none() {
        trace!(
            capability,
            ?location,
            type_name = %subject.describe(),
            "capability not found"
        );
    }
    found
}

fn resolve_on_value(capability: &str, subject: &Value) -> Option<Function> {
    if !subject.is_prototype() {
        let key = fl_session::current().key(capability);
        if let Some(Value::Function(f)) = subject.lookup(&key) {
            return Some(f.bind(subject.clone()));
        }
    }
    MethodTable::global()
        .prototype_method(&subject.type_name(), capability)
        .map(|method| native(capability, method, subject.clone()))
}

fn resolve_on_rep(capability: &str, rep: &Value) -> Option<Function> {
    let key = fl_session::current().key(capability);
    let table = MethodTable::global();
    let method = match rep {
        Value::TypeRep(r) => {
            if let Some(Value::Function(f)) = r.get_static(&key) {
                return Some(f.bind(rep.clone()));
            }
            table.static_method(r.name(), capability)
        }
        Value::Object(o) => {
            return match o.get_own(&key) {
                Some(Value::Function(f)) => Some(f.bind(rep.clone())),
                _ => None,
            };
        }
        Value::Function(f) => table.static_method(f.name(), capability),
        _ => None,
    };
    method.map(|method| native(capability, method, rep.clone()))
}

fn native(capability: &str, method: NativeMethod, this: Value) -> Function {
    Function::new(capability, move |_, args| method(&this, args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fl_session::{with_options, Options};
    use fl_value::{Builtin, TypeRep};

    fn tagged(tag: &'static str) -> Value {
        Value::function(tag, move |_, _| Ok(Value::from(tag)))
    }

    #[test]
    fn test_builtin_fallback() {
        let f = resolve("map", Location::Value, &Value::array([])).unwrap();
        let out = f.call(&[Value::unary("id", |x| Ok(x.clone()))]).unwrap();
        assert!(matches!(out, Value::Array(_)));
        assert!(resolve("map", Location::Value, &Value::from(1)).is_none());
    }

    #[test]
    fn test_own_field_wins() {
        let o = Value::object([("fantasy-land/map", tagged("own"))]);
        let f = resolve("map", Location::Value, &o).unwrap();
        assert_eq!(f.call(&[]).unwrap().as_str(), Some("own"));
    }

    #[test]
    fn test_inherited_field() {
        let rep = TypeRep::new("Box").with_method("fantasy-land/map", tagged("proto"));
        let x = rep.construct::<&str, _>([]);
        let f = resolve("map", Location::Value, &x).unwrap();
        assert_eq!(f.call(&[]).unwrap().as_str(), Some("proto"));
    }

    #[test]
    fn test_prototype_skips_own_fields() {
        let rep = TypeRep::new("Box").with_method("fantasy-land/concat", tagged("proto"));
        let proto = Value::Object(rep.prototype().clone());
        // The prototype's own `concat` is ignored; the plain-object table entry is used.
        let f = resolve("concat", Location::Value, &proto).unwrap();
        let out = f.call(&[Value::object::<&str, _>([])]).unwrap();
        assert!(matches!(out, Value::Object(_)));
    }

    #[test]
    fn test_bound_receiver() {
        let echo = Value::function("echo", |this, _| Ok(this.clone()));
        let o = Value::object([("fantasy-land/extract", echo)]);
        let f = resolve("extract", Location::Value, &o).unwrap();
        assert!(f.call(&[]).unwrap().is(&o));
    }

    #[test]
    fn test_constructor_statics_then_table() {
        let rep = Value::from(TypeRep::new("Box").with_static("fantasy-land/of", tagged("static")));
        let f = resolve("of", Location::Constructor, &rep).unwrap();
        assert_eq!(f.call(&[]).unwrap().as_str(), Some("static"));
        assert!(resolve("empty", Location::Constructor, &rep).is_none());

        let array = Value::from(TypeRep::builtin(Builtin::Array));
        let f = resolve("of", Location::Constructor, &array).unwrap();
        let out = f.call(&[Value::from(1)]).unwrap();
        assert_eq!(out.as_array().map(|xs| xs.len()), Some(1));
    }

    #[test]
    fn test_plain_object_as_rep() {
        let rep = Value::object([("fantasy-land/empty", tagged("plain"))]);
        let f = resolve("empty", Location::Constructor, &rep).unwrap();
        assert_eq!(f.call(&[]).unwrap().as_str(), Some("plain"));
        assert!(resolve("of", Location::Constructor, &rep).is_none());
        assert!(resolve("of", Location::Constructor, &Value::from(1)).is_none());
    }

    #[test]
    fn test_namespace_option() {
        let o = Value::object([("fl/map", tagged("custom"))]);
        let found = with_options(Options::default().with_namespace("fl/"), || {
            resolve("map", Location::Value, &o)
        });
        assert_eq!(found.unwrap().call(&[]).unwrap().as_str(), Some("custom"));
        // Under the default namespace the field is invisible and plain
        // objects fall back to the table.
        let f = resolve("map", Location::Value, &o).unwrap();
        assert!(f.call(&[Value::unary("id", |x| Ok(x.clone()))]).is_ok());
    }
}
