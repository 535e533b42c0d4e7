//! The dynamic value type.

use std::fmt;
use std::rc::Rc;

use crate::date::time_clip;
use crate::type_rep::TYPE_IDENT_KEY;
use crate::{Array, Builtin, Error, Function, Object, RegExp, Result, TypeRep};

/// A dynamic value.
///
/// Cloning is cheap: reference kinds share their storage, so a clone of an
/// array or object observes later mutations of the original.
#[derive(Clone, Debug)]
pub enum Value {
    /// The `null` value.
    Null,
    /// The `undefined` value.
    Undefined,
    /// A boolean.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// An immutable string.
    String(Rc<str>),
    /// A date as milliseconds since the epoch; `NaN` is the invalid date.
    Date(f64),
    /// A regular expression.
    RegExp(RegExp),
    /// An array.
    Array(Array),
    /// An argument list.
    Arguments(Array),
    /// An error with a name and message.
    Error(ErrorValue),
    /// A plain object, a typed instance or a prototype.
    Object(Object),
    /// A native function.
    Function(Function),
    /// An object wrapper around a primitive.
    Boxed(Boxed),
    /// A type representative.
    TypeRep(TypeRep),
}

// ============================================================================
// Boxed primitives
// ============================================================================

/// A primitive that can be wrapped in an object.
#[derive(Clone, Debug)]
pub enum Primitive {
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    String(Rc<str>),
}

impl Primitive {
    /// The built-in tag of the wrapped primitive.
    #[must_use]
    pub fn builtin(&self) -> Builtin {
        match self {
            Primitive::Bool(_) => Builtin::Boolean,
            Primitive::Number(_) => Builtin::Number,
            Primitive::String(_) => Builtin::String,
        }
    }

    /// The wrapped primitive as a plain value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Primitive::Bool(b) => Value::Bool(*b),
            Primitive::Number(n) => Value::Number(*n),
            Primitive::String(s) => Value::String(Rc::clone(s)),
        }
    }
}

/// A boxed primitive; identity is by reference like any other object.
#[derive(Clone, Debug)]
pub struct Boxed(Rc<Primitive>);

impl Boxed {
    /// Wraps a primitive.
    #[must_use]
    pub fn new(primitive: Primitive) -> Self {
        Self(Rc::new(primitive))
    }

    /// The wrapped primitive.
    #[must_use]
    pub fn primitive(&self) -> &Primitive {
        &self.0
    }

    /// The wrapped primitive as a plain value.
    #[must_use]
    pub fn value(&self) -> Value {
        self.0.to_value()
    }

    /// Returns true if both handles refer to the same wrapper.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// ============================================================================
// Error values
// ============================================================================

/// An error object: a constructor name such as `TypeError` and a message.
#[derive(Clone)]
pub struct ErrorValue(Rc<ErrorInner>);

struct ErrorInner {
    name: Rc<str>,
    message: Rc<str>,
}

impl ErrorValue {
    /// Creates an error value.
    #[must_use]
    pub fn new(name: impl Into<Rc<str>>, message: impl Into<Rc<str>>) -> Self {
        Self(Rc::new(ErrorInner {
            name: name.into(),
            message: message.into(),
        }))
    }

    /// The error name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.0.message
    }

    /// Returns true if both handles refer to the same error.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.name(), self.message())
    }
}

// ============================================================================
// Construction
// ============================================================================

impl Value {
    /// Creates an array value.
    pub fn array<I: IntoIterator<Item = Value>>(items: I) -> Value {
        Value::Array(items.into_iter().collect())
    }

    /// Creates an argument-list value.
    pub fn arguments<I: IntoIterator<Item = Value>>(items: I) -> Value {
        Value::Arguments(items.into_iter().collect())
    }

    /// Creates a plain object from `(key, value)` pairs.
    pub fn object<K, I>(entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(Object::from_entries(entries))
    }

    /// Creates a date from a time value, clipping it to the valid range.
    #[must_use]
    pub fn date(ms: f64) -> Value {
        Value::Date(time_clip(ms))
    }

    /// Creates a regular expression value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Invalid`] for unknown or repeated flags.
    pub fn regexp(source: &str, flags: &str) -> Result<Value> {
        RegExp::new(source, flags).map(Value::RegExp)
    }

    /// Creates an error value.
    #[must_use]
    pub fn error(name: &str, message: &str) -> Value {
        Value::Error(ErrorValue::new(name, message))
    }

    /// Creates a function value from a closure over `(this, args)`.
    pub fn function<F>(name: &str, body: F) -> Value
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
    {
        Value::Function(Function::new(name, body))
    }

    /// Creates a function value of one argument.
    pub fn unary<F>(name: &str, f: F) -> Value
    where
        F: Fn(&Value) -> Result<Value> + 'static,
    {
        Value::Function(Function::unary(name, f))
    }

    /// Creates a function value of two arguments.
    pub fn binary<F>(name: &str, f: F) -> Value
    where
        F: Fn(&Value, &Value) -> Result<Value> + 'static,
    {
        Value::Function(Function::binary(name, f))
    }

    /// Wraps a primitive in an object.
    #[must_use]
    pub fn boxed(primitive: Primitive) -> Value {
        Value::Boxed(Boxed::new(primitive))
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl Value {
    /// The number, if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The array, if this is an array or an argument list.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(xs) | Value::Arguments(xs) => Some(xs),
            _ => None,
        }
    }

    /// The object, if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// The function, if this is a function.
    #[must_use]
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// The type representative, if this is one.
    #[must_use]
    pub fn as_type_rep(&self) -> Option<&TypeRep> {
        match self {
            Value::TypeRep(rep) => Some(rep),
            _ => None,
        }
    }

    /// Returns true for `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for `undefined`.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Returns true if this is some type representative's prototype object.
    #[must_use]
    pub fn is_prototype(&self) -> bool {
        matches!(self, Value::Object(o) if o.is_prototype())
    }

    /// Returns true for values compared by reference rather than by value.
    #[must_use]
    pub fn is_reference(&self) -> bool {
        !matches!(
            self,
            Value::Null
                | Value::Undefined
                | Value::Bool(_)
                | Value::Number(_)
                | Value::String(_)
                | Value::Date(_)
        )
    }
}

// ============================================================================
// Runtime type identification
// ============================================================================

impl Value {
    /// The built-in tag of this value, ignoring any nominal type identifier.
    #[must_use]
    pub fn builtin(&self) -> Builtin {
        match self {
            Value::Null => Builtin::Null,
            Value::Undefined => Builtin::Undefined,
            Value::Bool(_) => Builtin::Boolean,
            Value::Number(_) => Builtin::Number,
            Value::String(_) => Builtin::String,
            Value::Date(_) => Builtin::Date,
            Value::RegExp(_) => Builtin::RegExp,
            Value::Array(_) => Builtin::Array,
            Value::Arguments(_) => Builtin::Arguments,
            Value::Error(_) => Builtin::Error,
            Value::Object(_) => Builtin::Object,
            Value::Function(_) | Value::TypeRep(_) => Builtin::Function,
            Value::Boxed(b) => b.primitive().builtin(),
        }
    }

    /// The runtime type name.
    ///
    /// Instances whose representative declares a nominal identifier report
    /// it; prototypes and all other values report their built-in tag.
    #[must_use]
    pub fn type_name(&self) -> String {
        if let Value::Object(o) = self {
            if !o.is_prototype() {
                if let Some(Value::String(ident)) = o.get(TYPE_IDENT_KEY) {
                    return ident.to_string();
                }
            }
        }
        self.builtin().name().to_string()
    }

    /// A human-readable name for error messages.
    ///
    /// Type representatives are described by their display name.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Value::TypeRep(rep) => rep.name().to_string(),
            _ => self.type_name(),
        }
    }

    /// The type representative of this value, if it has one.
    ///
    /// `null` and `undefined` have none; built-in kinds yield the shared
    /// built-in representative; typed objects yield their own.
    #[must_use]
    pub fn constructor(&self) -> Option<Value> {
        let rep = match self {
            Value::Null | Value::Undefined => return None,
            Value::Object(o) => o
                .rep()
                .unwrap_or_else(|| TypeRep::builtin(Builtin::Object)),
            Value::Arguments(_) => TypeRep::builtin(Builtin::Object),
            other => TypeRep::builtin(other.builtin()),
        };
        Some(Value::TypeRep(rep))
    }

    /// Looks up a named field on values that carry fields.
    ///
    /// Objects search their own fields and then their representative's
    /// prototype; arrays search their extra properties; type representatives
    /// search their static fields.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<Value> {
        match self {
            Value::Object(o) => o.get(key),
            Value::Array(xs) | Value::Arguments(xs) => xs.get_prop(key),
            Value::TypeRep(rep) => rep.get_static(key),
            _ => None,
        }
    }

    /// Strict identity: primitives by value (`NaN` is not identical to
    /// itself), reference kinds by pointer.
    #[must_use]
    pub fn is(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) | (Value::Date(a), Value::Date(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::RegExp(a), Value::RegExp(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) | (Value::Arguments(a), Value::Arguments(b)) => {
                a.ptr_eq(b)
            }
            (Value::Error(a), Value::Error(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Boxed(a), Value::Boxed(b)) => a.ptr_eq(b),
            (Value::TypeRep(a), Value::TypeRep(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Calls this value as a function with an `undefined` receiver.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeError`] if this is not a function, otherwise
    /// whatever the function returns.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        match self {
            Value::Function(f) => f.call(args),
            other => Err(Error::type_error("Function", other)),
        }
    }

    /// Truthiness as used by predicates.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null | Value::Undefined => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<Rc<str>> for Value {
    fn from(s: Rc<str>) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Array::from_vec(items))
    }
}

impl From<Array> for Value {
    fn from(xs: Array) -> Self {
        Value::Array(xs)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<TypeRep> for Value {
    fn from(rep: TypeRep) -> Self {
        Value::TypeRep(rep)
    }
}

impl From<RegExp> for Value {
    fn from(re: RegExp) -> Self {
        Value::RegExp(re)
    }
}

impl From<ErrorValue> for Value {
    fn from(e: ErrorValue) -> Self {
        Value::Error(e)
    }
}

impl From<Boxed> for Value {
    fn from(b: Boxed) -> Self {
        Value::Boxed(b)
    }
}
