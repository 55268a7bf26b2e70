//! Promise core for a single-threaded runtime.
//!
//! This crate provides a write-once asynchronous container with chainable
//! continuations, following the Promise/A+ specification:
//! - Promises with executor-based construction and `then`/`catch`/`finally`
//! - Transparent adoption of any object exposing a callable `then`
//! - `resolve`, `reject`, `all` and `race` helpers
//! - The event loop (task and microtask queues) promises schedule their jobs on
//!
//! # Overview
//!
//! - [`Promise`] - The promise handle
//! - [`Deferred`] - A pending promise bundled with its capabilities
//! - [`SettlementGuard`] - The single-use lock behind a resolve/reject pair
//! - [`EventLoop`] - Cooperative scheduler; one microtask per turn
//! - [`EventLoopConfig`] - Event loop tunables
//! - [`RuntimeError`] - Errors of the scheduler itself
//!
//! # Examples
//!
//! ## Combining promises
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use core_types::Value;
//! use promise_core::{EventLoop, Promise};
//!
//! let event_loop = EventLoop::new();
//! let later = Promise::deferred(&event_loop);
//! let all = Promise::all(
//!     &event_loop,
//!     Value::Array(vec![later.promise.clone().into(), Value::Smi(2)]),
//! );
//!
//! let seen = Rc::new(RefCell::new(None));
//! let s = seen.clone();
//! all.on_settled(move |outcome| *s.borrow_mut() = Some(outcome));
//!
//! later.resolve.call1(Value::Smi(1)).unwrap();
//! event_loop.run_until_done().unwrap();
//! assert_eq!(
//!     *seen.borrow(),
//!     Some(Ok(Value::Array(vec![Value::Smi(1), Value::Smi(2)])))
//! );
//! ```
//!
//! ## Event Loop Usage
//!
//! ```
//! use promise_core::{EventLoop, Task};
//! use core_types::Value;
//!
//! let event_loop = EventLoop::new();
//! event_loop.enqueue_task(Task::new(|| Ok(Value::Undefined)));
//! event_loop.run_until_done().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod combinators;
pub mod config;
pub mod error;
pub mod event_loop;
pub mod promise;
pub mod settlement;
pub mod task_queue;

// Re-export main types at crate root
pub use config::EventLoopConfig;
pub use error::RuntimeError;
pub use event_loop::EventLoop;
pub use promise::{Deferred, Promise};
pub use settlement::SettlementGuard;
pub use task_queue::{MicroTask, MicrotaskQueue, Task, TaskQueue};
