//! The built-in method table.
//!
//! Maps each built-in type name to its constructor-level (static) and
//! instance-level (prototype) operations. The table is built once and never
//! mutated; the resolver consults it after a value's own fields.

mod array;
mod function;
mod object;
mod primitive;

use std::sync::OnceLock;

use fl_value::{expect_arity, Builtin, Error, Result, Value};
use rustc_hash::FxHashMap;

/// A built-in operation: receives the subject (or representative) as `this`.
pub type NativeMethod = fn(&Value, &[Value]) -> Result<Value>;

/// The operations one built-in type implements.
#[derive(Default)]
pub struct Implementations {
    statics: FxHashMap<&'static str, NativeMethod>,
    prototype: FxHashMap<&'static str, NativeMethod>,
}

impl Implementations {
    fn with_static(mut self, capability: &'static str, method: NativeMethod) -> Self {
        self.statics.insert(capability, method);
        self
    }

    fn with_method(mut self, capability: &'static str, method: NativeMethod) -> Self {
        self.prototype.insert(capability, method);
        self
    }

    /// Names of the constructor-level operations.
    pub fn static_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.statics.keys().copied()
    }

    /// Names of the instance-level operations.
    pub fn prototype_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.prototype.keys().copied()
    }
}

/// The immutable table of built-in implementations.
pub struct MethodTable {
    types: FxHashMap<&'static str, Implementations>,
}

static TABLE: OnceLock<MethodTable> = OnceLock::new();

impl MethodTable {
    /// The process-wide table.
    pub fn global() -> &'static MethodTable {
        TABLE.get_or_init(MethodTable::build)
    }

    fn build() -> MethodTable {
        let mut types = FxHashMap::default();
        types.insert(Builtin::Null.name(), primitive::null());
        types.insert(Builtin::Undefined.name(), primitive::undefined());
        types.insert(Builtin::Boolean.name(), primitive::boolean());
        types.insert(Builtin::Number.name(), primitive::number());
        types.insert(Builtin::Date.name(), primitive::date());
        types.insert(Builtin::RegExp.name(), primitive::regexp());
        types.insert(Builtin::String.name(), primitive::string());
        types.insert(Builtin::Error.name(), primitive::error());
        types.insert(Builtin::Array.name(), array::array());
        types.insert(Builtin::Arguments.name(), array::arguments());
        types.insert(Builtin::Object.name(), object::object());
        types.insert(Builtin::Function.name(), function::function());
        MethodTable { types }
    }

    /// The implementations registered for `type_name`.
    #[must_use]
    pub fn implementations(&self, type_name: &str) -> Option<&Implementations> {
        self.types.get(type_name)
    }

    /// Looks up a constructor-level operation.
    #[must_use]
    pub fn static_method(&self, type_name: &str, capability: &str) -> Option<NativeMethod> {
        self.types.get(type_name)?.statics.get(capability).copied()
    }

    /// Looks up an instance-level operation.
    #[must_use]
    pub fn prototype_method(&self, type_name: &str, capability: &str) -> Option<NativeMethod> {
        self.types.get(type_name)?.prototype.get(capability).copied()
    }
}

// ============================================================================
// Shared helpers for the per-type modules
// ============================================================================

/// Checks arity and returns the first `N` arguments.
fn take_args<'a, const N: usize>(method: &str, args: &'a [Value]) -> Result<&'a [Value; N]> {
    expect_arity(method, args, N)?;
    args[..N]
        .try_into()
        .map_err(|_| Error::Invalid(format!("{method}: malformed argument list")))
}

/// Renders the receiver through the cycle-aware writer.
fn show(value: &Value) -> Result<String> {
    crate::structural::to_string(value)
}
