//! Objects: ordered field maps with an optional type representative.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::type_rep::{TypeRep, TypeRepInner};
use crate::Value;

/// A shared, interior-mutable object.
///
/// Fields keep insertion order. An object optionally points at the type
/// representative that constructed it; field lookup through [`Object::get`]
/// falls back to that representative's prototype, which is how instances
/// inherit their methods. Prototype objects themselves are flagged so the
/// resolver can tell a type's method holder apart from its instances.
#[derive(Clone)]
pub struct Object(Rc<ObjectInner>);

struct ObjectInner {
    constructor: Option<RepLink>,
    is_prototype: bool,
    fields: RefCell<IndexMap<String, Value>>,
}

/// Instances own their representative; a prototype only refers back to it.
enum RepLink {
    Owned(TypeRep),
    Prototype(Weak<TypeRepInner>),
}

impl Object {
    /// Creates an empty plain object.
    #[must_use]
    pub fn new() -> Self {
        Self::with_link(None, false)
    }

    /// Creates a plain object from `(key, value)` pairs.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let object = Self::new();
        for (key, value) in entries {
            object.set(key, value);
        }
        object
    }

    /// Creates an empty instance of `rep`.
    #[must_use]
    pub fn instance_of(rep: &TypeRep) -> Self {
        Self::with_link(Some(RepLink::Owned(rep.clone())), false)
    }

    pub(crate) fn prototype_of(rep: Weak<TypeRepInner>) -> Self {
        Self::with_link(Some(RepLink::Prototype(rep)), true)
    }

    fn with_link(constructor: Option<RepLink>, is_prototype: bool) -> Self {
        Self(Rc::new(ObjectInner {
            constructor,
            is_prototype,
            fields: RefCell::new(IndexMap::new()),
        }))
    }

    /// Returns the type representative this object belongs to, if any.
    #[must_use]
    pub fn rep(&self) -> Option<TypeRep> {
        match self.0.constructor.as_ref()? {
            RepLink::Owned(rep) => Some(rep.clone()),
            RepLink::Prototype(weak) => weak.upgrade().map(TypeRep::from_inner),
        }
    }

    /// Returns true if this object is some type representative's prototype.
    #[must_use]
    pub fn is_prototype(&self) -> bool {
        self.0.is_prototype
    }

    /// Looks up an own field.
    #[must_use]
    pub fn get_own(&self, key: &str) -> Option<Value> {
        self.0.fields.borrow().get(key).cloned()
    }

    /// Looks up a field, falling back to the representative's prototype.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.get_own(key) {
            return Some(value);
        }
        match self.0.constructor.as_ref()? {
            RepLink::Owned(rep) => rep.prototype().get_own(key),
            RepLink::Prototype(_) => None,
        }
    }

    /// Sets an own field, keeping the position of an existing key.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.0.fields.borrow_mut().insert(key.into(), value);
    }

    /// Own keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.0.fields.borrow().keys().cloned().collect()
    }

    /// Own keys sorted by UTF-16 code units.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<String> {
        let mut keys = self.keys();
        keys.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
        keys
    }

    /// A snapshot of the own fields in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .fields
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Number of own fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.fields.borrow().len()
    }

    /// Returns true if there are no own fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if both handles refer to the same object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Fields may refer back to this object, so only the shape is printed.
        f.debug_struct("Object")
            .field("rep", &self.rep().map(|r| r.name().to_string()))
            .field("keys", &self.keys())
            .finish()
    }
}
