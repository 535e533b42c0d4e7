//! Per-thread recursion guards for the structural algorithms.
//!
//! `equals` and `lte` track the pairs they are comparing, `to_string` the
//! values it is rendering. Meeting an entry already on the stack means the
//! input is cyclic. A [`Guard`] pops its entry when dropped, so the stacks
//! are balanced on every exit path.

use std::cell::RefCell;
use std::thread::LocalKey;

use fl_value::{Error, Result, Value};

type Stack<T> = RefCell<Vec<T>>;

/// Remaining stack below which a guarded section moves to a new segment.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each new stack segment.
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

thread_local! {
    static EQUALS: Stack<(Value, Value)> = const { RefCell::new(Vec::new()) };
    static LTE: Stack<(Value, Value)> = const { RefCell::new(Vec::new()) };
    static SHOW: Stack<Value> = const { RefCell::new(Vec::new()) };
}

/// Which pair stack an algorithm uses.
#[derive(Clone, Copy, Debug)]
pub(crate) enum PairStack {
    Equals,
    Lte,
}

impl PairStack {
    fn key(self) -> &'static LocalKey<Stack<(Value, Value)>> {
        match self {
            PairStack::Equals => &EQUALS,
            PairStack::Lte => &LTE,
        }
    }
}

/// The outcome of entering a guarded computation.
pub(crate) enum Entry<T: 'static> {
    /// The entry is already in progress.
    Cycle,
    /// The entry was pushed; it is popped when the guard drops.
    Entered(Guard<T>),
    /// Nothing to track: no operand can contain itself.
    Untracked,
}

/// Pops the most recent entry of its stack on drop.
pub(crate) struct Guard<T: 'static> {
    stack: &'static LocalKey<Stack<T>>,
}

impl<T: 'static> Drop for Guard<T> {
    fn drop(&mut self) {
        self.stack.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Runs one level of a recursive algorithm, growing the native stack when
/// it runs low. Nesting depth is then bounded by the input and the
/// configured `max_depth`, not by the thread's stack size.
pub(crate) fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, f)
}

fn push<T: 'static>(key: &'static LocalKey<Stack<T>>, entry: T) -> Result<Guard<T>> {
    let max_depth = fl_session::current().max_depth;
    key.with(|stack| {
        let mut stack = stack.borrow_mut();
        if stack.len() >= max_depth {
            return Err(Error::RecursionLimit(max_depth));
        }
        stack.push(entry);
        Ok(Guard { stack: key })
    })
}

/// Enters the comparison of `x` with `y`.
///
/// # Errors
///
/// Returns [`Error::RecursionLimit`] when the stack is already at the
/// configured maximum depth.
pub(crate) fn enter_pair(which: PairStack, x: &Value, y: &Value) -> Result<Entry<(Value, Value)>> {
    if !x.is_reference() && !y.is_reference() {
        return Ok(Entry::Untracked);
    }
    let key = which.key();
    let seen = key.with(|stack| {
        stack
            .borrow()
            .iter()
            .any(|(a, b)| a.is(x) && b.is(y))
    });
    if seen {
        return Ok(Entry::Cycle);
    }
    push(key, (x.clone(), y.clone())).map(Entry::Entered)
}

/// Enters the rendering of `x`.
///
/// # Errors
///
/// Returns [`Error::RecursionLimit`] when the stack is already at the
/// configured maximum depth.
pub(crate) fn enter_value(x: &Value) -> Result<Entry<Value>> {
    if !x.is_reference() {
        return Ok(Entry::Untracked);
    }
    let seen = SHOW.with(|stack| stack.borrow().iter().any(|v| v.is(x)));
    if seen {
        return Ok(Entry::Cycle);
    }
    push(&SHOW, x.clone()).map(Entry::Entered)
}

#[cfg(test)]
fn depth(which: PairStack) -> usize {
    which.key().with(|stack| stack.borrow().len())
}
