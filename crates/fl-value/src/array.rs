//! Arrays and argument lists.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::Value;

/// A shared, interior-mutable sequence.
///
/// Besides its elements an array may carry extra named properties, which
/// structural equality ignores but the string representation appends after the
/// elements. The same storage backs both [`Value::Array`] and
/// [`Value::Arguments`].
#[derive(Clone)]
pub struct Array(Rc<ArrayInner>);

struct ArrayInner {
    items: RefCell<Vec<Value>>,
    props: RefCell<IndexMap<String, Value>>,
}

impl Array {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Creates an array owning `items`.
    #[must_use]
    pub fn from_vec(items: Vec<Value>) -> Self {
        Self(Rc::new(ArrayInner {
            items: RefCell::new(items),
            props: RefCell::new(IndexMap::new()),
        }))
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.items.borrow().len()
    }

    /// Returns true if there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `idx`.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Value> {
        self.0.items.borrow().get(idx).cloned()
    }

    /// Appends an element.
    pub fn push(&self, value: Value) {
        self.0.items.borrow_mut().push(value);
    }

    /// Replaces the element at `idx`, padding with `undefined` if needed.
    pub fn set(&self, idx: usize, value: Value) {
        let mut items = self.0.items.borrow_mut();
        if idx >= items.len() {
            items.resize(idx + 1, Value::Undefined);
        }
        items[idx] = value;
    }

    /// A snapshot of the elements.
    ///
    /// Callers iterate the snapshot so that callbacks may freely touch the
    /// array while it is being traversed.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.items.borrow().clone()
    }

    /// Looks up an extra property.
    #[must_use]
    pub fn get_prop(&self, key: &str) -> Option<Value> {
        self.0.props.borrow().get(key).cloned()
    }

    /// Sets an extra property.
    pub fn set_prop(&self, key: impl Into<String>, value: Value) {
        self.0.props.borrow_mut().insert(key.into(), value);
    }

    /// A snapshot of the extra properties in insertion order.
    #[must_use]
    pub fn props(&self) -> Vec<(String, Value)> {
        self.0
            .props
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns true if both handles refer to the same array.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Array {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Elements may refer back to this array.
        write!(f, "Array(len={})", self.len())
    }
}
