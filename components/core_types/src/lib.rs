//! Core value types and error handling.
//!
//! This crate provides the dynamic value model the promise core operates on:
//! plain values, shared callables, objects with (possibly throwing) property
//! access, and the error type used for runtime-created rejection reasons.
//!
//! # Overview
//!
//! - [`Value`] - Any value a promise can carry
//! - [`Function`] - Shared callable returning a [`JsResult`]
//! - [`JsObject`] / [`PlainObject`] - Objects compared by identity
//! - [`JsError`] - Errors with a kind and a message
//! - [`ErrorKind`] - Types of errors
//!
//! # Examples
//!
//! ```
//! use core_types::{Function, JsError, PlainObject, Value};
//!
//! // An object exposing a callable `then` member
//! let thenable = PlainObject::new()
//!     .with("then", Value::Function(Function::constant(Value::Undefined)))
//!     .into_value();
//! assert!(thenable.as_object().is_some());
//!
//! let thrown: Value = JsError::type_error("not a function").into();
//! assert!(thrown.is_error_of(core_types::ErrorKind::TypeError));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod function;
mod object;
mod value;

pub use error::{ErrorKind, JsError, JsResult};
pub use function::{arg, Function};
pub use object::{same_object, JsObject, PlainObject, Property};
pub use value::Value;
