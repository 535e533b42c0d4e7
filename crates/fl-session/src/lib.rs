//! Runtime options for the fantasy-land type-class runtime.
//!
//! The dispatch engine reads a small set of knobs: the namespace prefix under
//! which custom types expose their capabilities, the token substituted for
//! cycles when rendering values, and the nesting limit of the structural
//! algorithms.
//!
//! # Overview
//!
//! - [`Options`]: the knobs, serialisable with `serde`
//! - [`current`]: the options active on this thread
//! - [`with_options`]: run a closure under different options
//!
//! Options are thread-local because values are not shareable across threads
//! in the first place.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`Options::namespace`].
pub const ENV_NAMESPACE: &str = "FL_NAMESPACE";
/// Environment variable overriding [`Options::circular_marker`].
pub const ENV_CIRCULAR_MARKER: &str = "FL_CIRCULAR_MARKER";
/// Environment variable overriding [`Options::max_depth`].
pub const ENV_MAX_DEPTH: &str = "FL_MAX_DEPTH";

/// Runtime options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Prefix of the field keys searched for custom capabilities.
    pub namespace: String,
    /// Text rendered in place of a value that contains itself.
    pub circular_marker: String,
    /// Maximum nesting of in-progress structural comparisons or renderings.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            namespace: "fantasy-land/".to_string(),
            circular_marker: "<Circular>".to_string(),
            max_depth: 1_000,
        }
    }
}

impl Options {
    /// The defaults overlaid with `FL_NAMESPACE`, `FL_CIRCULAR_MARKER` and
    /// `FL_MAX_DEPTH` from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().overlay(|name| std::env::var(name).ok())
    }

    /// Overlays variables produced by `lookup` on `self`.
    ///
    /// Unparsable values are ignored with a warning.
    #[must_use]
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(namespace) = lookup(ENV_NAMESPACE) {
            self.namespace = namespace;
        }
        if let Some(marker) = lookup(ENV_CIRCULAR_MARKER) {
            self.circular_marker = marker;
        }
        if let Some(raw) = lookup(ENV_MAX_DEPTH) {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => self.max_depth = depth,
                _ => tracing::warn!(
                    variable = ENV_MAX_DEPTH,
                    value = %raw,
                    "ignoring invalid depth limit"
                ),
            }
        }
        self
    }

    /// Sets the capability namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the circular-reference marker.
    #[must_use]
    pub fn with_circular_marker(mut self, marker: impl Into<String>) -> Self {
        self.circular_marker = marker.into();
        self
    }

    /// Sets the nesting limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The field key under which `capability` is looked up, e.g.
    /// `fantasy-land/map`.
    #[must_use]
    pub fn key(&self, capability: &str) -> String {
        format!("{}{capability}", self.namespace)
    }
}

thread_local! {
    static ACTIVE: RefCell<Rc<Options>> = RefCell::new(Rc::new(Options::default()));
}

/// The options active on this thread.
#[must_use]
pub fn current() -> Rc<Options> {
    ACTIVE.with(|active| Rc::clone(&active.borrow()))
}

/// Runs `f` with `options` active on this thread.
///
/// The previous options are restored when `f` returns or unwinds.
pub fn with_options<R>(options: Options, f: impl FnOnce() -> R) -> R {
    let previous = ACTIVE.with(|active| active.replace(Rc::new(options)));
    let _restore = Restore(Some(previous));
    f()
}

struct Restore(Option<Rc<Options>>);

impl Drop for Restore {
    fn drop(&mut self) {
        if let Some(previous) = self.0.take() {
            ACTIVE.with(|active| *active.borrow_mut() = previous);
        }
    }
}
