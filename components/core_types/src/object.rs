//! Object values.
//!
//! Objects are reference types: they are shared through `Rc<dyn JsObject>`
//! and compared by identity. Property access goes through [`JsObject::get`],
//! which may throw, so that accessor properties behave the way they do in
//! the language the value model mirrors.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::{Function, JsResult, Value};

/// An object whose properties can be read.
///
/// Functions are called without a receiver, so any method an object exposes
/// (such as a `then` member) must already be bound to the object it belongs to.
pub trait JsObject {
    /// Reads the property `key`. Missing properties read as `Undefined`.
    fn get(&self, key: &str) -> JsResult<Value>;

    /// Name used when the object is formatted for debugging.
    fn class_name(&self) -> &'static str {
        "Object"
    }
}

/// Returns true if both handles refer to the same object.
pub fn same_object(a: &Rc<dyn JsObject>, b: &Rc<dyn JsObject>) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}

/// A property slot of a [`PlainObject`].
#[derive(Debug, Clone)]
pub enum Property {
    /// A plain data property
    Data(Value),
    /// An accessor property; reading it calls the getter with no arguments
    Getter(Function),
}

/// A simple property bag.
///
/// # Examples
///
/// ```
/// use core_types::{PlainObject, Value};
///
/// let obj = PlainObject::new().with("answer", Value::Smi(42));
/// assert_eq!(obj.get_property("answer").unwrap(), Value::Smi(42));
/// assert_eq!(obj.get_property("missing").unwrap(), Value::Undefined);
/// ```
#[derive(Debug, Default)]
pub struct PlainObject {
    properties: RefCell<HashMap<String, Property>>,
}

impl PlainObject {
    /// Creates an object with no properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a data property, builder style.
    pub fn with(self, key: impl Into<String>, value: Value) -> Self {
        self.set(key, value);
        self
    }

    /// Adds an accessor property, builder style.
    pub fn with_getter(self, key: impl Into<String>, getter: Function) -> Self {
        self.properties
            .borrow_mut()
            .insert(key.into(), Property::Getter(getter));
        self
    }

    /// Sets (or replaces) a data property.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.properties
            .borrow_mut()
            .insert(key.into(), Property::Data(value));
    }

    /// Reads a property, running its getter if it is an accessor.
    pub fn get_property(&self, key: &str) -> JsResult<Value> {
        // Clone the slot first: a getter may touch this object again.
        let slot = self.properties.borrow().get(key).cloned();
        match slot {
            Some(Property::Data(value)) => Ok(value),
            Some(Property::Getter(getter)) => getter.call(&[]),
            None => Ok(Value::Undefined),
        }
    }

    /// Wraps the object into a shared [`Value::Object`].
    pub fn into_value(self) -> Value {
        Value::Object(Rc::new(self))
    }
}

impl JsObject for PlainObject {
    fn get(&self, key: &str) -> JsResult<Value> {
        self.get_property(key)
    }
}

impl fmt::Debug for dyn JsObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ ... }}", self.class_name())
    }
}
