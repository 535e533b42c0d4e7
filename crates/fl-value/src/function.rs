//! Native function values.

use std::fmt;
use std::rc::Rc;

use crate::{Error, Result, Value};

type Body = dyn Fn(&Value, &[Value]) -> Result<Value>;

/// A callable value.
///
/// Every function receives a receiver (`this`) and a slice of arguments. Plain
/// calls pass [`Value::Undefined`] as the receiver; methods found by the
/// resolver are [bound](Function::bind) to their subject so callers need not
/// supply it again. Equality of functions is identity.
#[derive(Clone)]
pub struct Function(Rc<FunctionInner>);

struct FunctionInner {
    name: Rc<str>,
    body: Box<Body>,
}

impl Function {
    /// Creates a function from a closure over `(this, args)`.
    pub fn new<F>(name: impl Into<Rc<str>>, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
    {
        Self(Rc::new(FunctionInner {
            name: name.into(),
            body: Box::new(body),
        }))
    }

    /// Creates a function of one argument, ignoring the receiver.
    pub fn unary<F>(name: impl Into<Rc<str>>, f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + 'static,
    {
        let name: Rc<str> = name.into();
        let label = Rc::clone(&name);
        Self::new(name, move |_, args| {
            expect_arity(&label, args, 1)?;
            f(&args[0])
        })
    }

    /// Creates a function of two arguments, ignoring the receiver.
    pub fn binary<F>(name: impl Into<Rc<str>>, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Value> + 'static,
    {
        let name: Rc<str> = name.into();
        let label = Rc::clone(&name);
        Self::new(name, move |_, args| {
            expect_arity(&label, args, 2)?;
            f(&args[0], &args[1])
        })
    }

    /// Returns the function's name (empty for anonymous functions).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Calls the function with an `undefined` receiver.
    ///
    /// # Errors
    ///
    /// Propagates whatever the function body returns.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.0.body)(&Value::Undefined, args)
    }

    /// Calls the function with an explicit receiver.
    ///
    /// # Errors
    ///
    /// Propagates whatever the function body returns.
    pub fn call_with(&self, this: &Value, args: &[Value]) -> Result<Value> {
        (self.0.body)(this, args)
    }

    /// Returns a function that always calls `self` with `this` as receiver.
    #[must_use]
    pub fn bind(&self, this: Value) -> Function {
        let target = self.clone();
        Function::new(format!("bound {}", self.name()), move |_, args| {
            target.call_with(&this, args)
        })
    }

    /// Returns true if both handles refer to the same function.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name())
    }
}

/// Fails with [`Error::Arity`] unless at least `expected` arguments are present.
///
/// Surplus arguments are allowed and ignored by callers.
///
/// # Errors
///
/// Returns [`Error::Arity`] when `args` is too short.
pub fn expect_arity(function: &str, args: &[Value], expected: usize) -> Result<()> {
    if args.len() < expected {
        return Err(Error::Arity {
            function: function.to_string(),
            expected,
            got: args.len(),
        });
    }
    Ok(())
}
