//! Callable values.

use std::fmt;
use std::rc::Rc;

use crate::{JsResult, Value};

/// A function that can be called with arguments and returns a [`JsResult`].
///
/// Functions are shared: cloning a `Function` yields another handle to the
/// same callable, and two handles compare equal only if they point to the
/// same callable.
///
/// # Examples
///
/// ```
/// use core_types::{Function, Value};
///
/// let double = Function::new(|args| match args.first() {
///     Some(Value::Smi(n)) => Ok(Value::Smi(n * 2)),
///     _ => Ok(Value::Undefined),
/// });
/// assert_eq!(double.call1(Value::Smi(21)).unwrap(), Value::Smi(42));
/// ```
#[derive(Clone)]
pub struct Function {
    callback: Rc<dyn Fn(&[Value]) -> JsResult<Value>>,
}

impl Function {
    /// Creates a new Function from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> JsResult<Value> + 'static,
    {
        Self {
            callback: Rc::new(f),
        }
    }

    /// Creates a Function that ignores its arguments and returns `value`.
    pub fn constant(value: Value) -> Self {
        Self::new(move |_| Ok(value.clone()))
    }

    /// Creates a Function that ignores its arguments and throws `value`.
    pub fn thrower(value: Value) -> Self {
        Self::new(move |_| Err(value.clone()))
    }

    /// Calls the function with the given arguments.
    pub fn call(&self, args: &[Value]) -> JsResult<Value> {
        (self.callback)(args)
    }

    /// Calls the function with a single argument.
    pub fn call1(&self, arg: Value) -> JsResult<Value> {
        self.call(std::slice::from_ref(&arg))
    }

    /// Returns true if both handles refer to the same callable.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

/// Returns the argument at `index`, or `Undefined` when it was not passed.
pub fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Undefined)
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function {{ ... }}")
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}
