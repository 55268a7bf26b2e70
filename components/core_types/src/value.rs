//! Dynamic value representation.
//!
//! This module provides the `Value` enum that represents every value a
//! promise can carry: fulfillment results, rejection reasons, callables and
//! objects that may turn out to be thenables.

use std::fmt;
use std::rc::Rc;

use crate::object::same_object;
use crate::{ErrorKind, Function, JsError, JsObject};

/// Represents any value.
///
/// Primitive values are stored inline, while functions and objects are shared
/// references compared by identity.
///
/// # Examples
///
/// ```
/// use core_types::Value;
///
/// let number = Value::Smi(42);
/// let list = Value::Array(vec![Value::Smi(1), Value::Smi(2)]);
///
/// assert!(!number.is_callable());
/// assert_eq!(list.as_array().map(|items| items.len()), Some(2));
/// ```
#[derive(Clone)]
pub enum Value {
    /// The undefined value
    Undefined,
    /// The null value
    Null,
    /// A boolean (true or false)
    Boolean(bool),
    /// Small integer
    Smi(i32),
    /// IEEE 754 double-precision floating point
    Double(f64),
    /// A string value
    String(std::string::String),
    /// An ordered sequence of values
    Array(Vec<Value>),
    /// An error object
    Error(JsError),
    /// A callable
    Function(Function),
    /// A reference to an object
    Object(Rc<dyn JsObject>),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::Smi(n) => f.debug_tuple("Smi").field(n).finish(),
            Value::Double(n) => f.debug_tuple("Double").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::Error(e) => f.debug_tuple("Error").field(e).finish(),
            Value::Function(_) => write!(f, "Function(...)"),
            Value::Object(obj) => write!(f, "Object({})", obj.class_name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Smi(a), Value::Smi(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => same_object(a, b),
            _ => false,
        }
    }
}

impl Value {
    /// Returns true if the value can be called.
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Returns the callable, if this is a function.
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the elements, if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the object reference, if this is an object.
    pub fn as_object(&self) -> Option<&Rc<dyn JsObject>> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Returns true if this is an error of the given kind.
    pub fn is_error_of(&self, kind: ErrorKind) -> bool {
        matches!(self, Value::Error(e) if e.kind == kind)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Smi(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<JsError> for Value {
    fn from(e: JsError) -> Self {
        Value::Error(e)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}
