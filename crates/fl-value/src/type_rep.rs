//! Type representatives.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::{Builtin, Object, Value};

/// The field under which a prototype advertises its nominal type identifier.
pub(crate) const TYPE_IDENT_KEY: &str = "@@type";

/// A type representative: the constructor-level handle of a type.
///
/// A representative has a display name, its own static fields (looked up for
/// constructor-position capabilities such as `of` or `empty`) and a prototype
/// object whose fields every instance inherits (looked up for instance-position
/// capabilities such as `map`). Representatives are invokable, so the resolver
/// may also fall back to the built-in method table keyed by their name.
///
/// ```ignore
/// let identity = TypeRep::new("Identity")
///     .with_type_ident("my-package/Identity@1")
///     .with_static("fantasy-land/of", of_fn)
///     .with_method("fantasy-land/map", map_fn);
/// ```
#[derive(Clone)]
pub struct TypeRep(Rc<TypeRepInner>);

pub(crate) struct TypeRepInner {
    name: Rc<str>,
    builtin: Option<Builtin>,
    statics: RefCell<IndexMap<String, Value>>,
    prototype: Object,
}

thread_local! {
    static BUILTIN_REPS: Vec<TypeRep> = Builtin::ALL
        .iter()
        .map(|&tag| TypeRep::build(tag.name().into(), Some(tag)))
        .collect();
}

impl TypeRep {
    /// Creates a representative for a user-defined type.
    #[must_use]
    pub fn new(name: impl Into<Rc<str>>) -> Self {
        Self::build(name.into(), None)
    }

    /// Returns the shared representative of a built-in type.
    ///
    /// Repeated calls on one thread return the same representative.
    #[must_use]
    pub fn builtin(tag: Builtin) -> Self {
        BUILTIN_REPS.with(|reps| reps[tag.index()].clone())
    }

    fn build(name: Rc<str>, builtin: Option<Builtin>) -> Self {
        Self(Rc::new_cyclic(|weak| TypeRepInner {
            name,
            builtin,
            statics: RefCell::new(IndexMap::new()),
            prototype: Object::prototype_of(weak.clone()),
        }))
    }

    pub(crate) fn from_inner(inner: Rc<TypeRepInner>) -> Self {
        Self(inner)
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The built-in tag, for built-in representatives.
    #[must_use]
    pub fn as_builtin(&self) -> Option<Builtin> {
        self.0.builtin
    }

    /// The prototype whose fields instances inherit.
    #[must_use]
    pub fn prototype(&self) -> &Object {
        &self.0.prototype
    }

    /// The nominal type identifier, if one was declared.
    #[must_use]
    pub fn type_ident(&self) -> Option<String> {
        self.0
            .prototype
            .get_own(TYPE_IDENT_KEY)
            .and_then(|v| v.as_str().map(String::from))
    }

    /// Looks up a static (constructor-level) field.
    #[must_use]
    pub fn get_static(&self, key: &str) -> Option<Value> {
        self.0.statics.borrow().get(key).cloned()
    }

    /// Sets a static (constructor-level) field.
    pub fn set_static(&self, key: impl Into<String>, value: Value) {
        self.0.statics.borrow_mut().insert(key.into(), value);
    }

    /// Builder form of [`TypeRep::set_static`].
    #[must_use]
    pub fn with_static(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_static(key, value.into());
        self
    }

    /// Adds a field to the prototype, inherited by every instance.
    #[must_use]
    pub fn with_method(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.prototype.set(key, value.into());
        self
    }

    /// Declares the nominal type identifier reported by instances.
    #[must_use]
    pub fn with_type_ident(self, ident: &str) -> Self {
        self.0.prototype.set(TYPE_IDENT_KEY, Value::from(ident));
        self
    }

    /// Creates an instance with the given own fields.
    pub fn construct<K, I>(&self, fields: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let object = Object::instance_of(self);
        for (key, value) in fields {
            object.set(key, value);
        }
        Value::Object(object)
    }

    /// Returns true if both handles refer to the same representative.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TypeRep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<type {}>", self.name())
    }
}
