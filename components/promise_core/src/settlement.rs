//! Settlement and adoption.
//!
//! A [`Capability`] is one `resolve`/`reject` pair bound to a promise. The
//! pair shares a [`SettlementGuard`], so whichever is called first decides
//! the outcome and every later call (from either side) is ignored.
//!
//! Resolving with a thenable does not settle anything yet. One microtask
//! later the thenable's `then` is called with a *fresh* capability for the
//! same promise, and whatever that capability receives drives the promise.
//! Each adoption step is a separate turn, so arbitrarily long chains of
//! thenables never grow the call stack.

use std::cell::Cell;
use std::rc::Rc;

use core_types::{arg, Function, JsError, Value};
use log::{debug, trace};

use crate::promise::{Promise, Settlement};
use crate::task_queue::MicroTask;

/// Single-use lock shared by one resolve/reject pair.
#[derive(Debug, Clone, Default)]
pub struct SettlementGuard {
    used: Rc<Cell<bool>>,
}

impl SettlementGuard {
    /// Creates an unused guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the guard used. Returns true only for the first call.
    pub fn try_claim(&self) -> bool {
        !self.used.replace(true)
    }

    /// Returns true once either capability of the pair has been called.
    pub fn is_used(&self) -> bool {
        self.used.get()
    }
}

/// A resolve/reject pair for one promise.
#[derive(Clone)]
pub(crate) struct Capability {
    promise: Promise,
    guard: SettlementGuard,
}

impl Capability {
    pub(crate) fn new(promise: Promise) -> Self {
        Self {
            promise,
            guard: SettlementGuard::new(),
        }
    }

    pub(crate) fn resolve(&self, value: Value) {
        if self.guard.try_claim() {
            resolve_promise(&self.promise, value);
        }
    }

    pub(crate) fn reject(&self, reason: Value) {
        if self.guard.try_claim() {
            self.promise.settle(Settlement::Rejected(reason));
        }
    }

    pub(crate) fn into_promise(self) -> Promise {
        self.promise
    }

    fn is_used(&self) -> bool {
        self.guard.is_used()
    }

    /// The pair as callable values, for executors and foreign `then` members.
    pub(crate) fn functions(&self) -> (Function, Function) {
        let resolve = {
            let capability = self.clone();
            Function::new(move |args| {
                capability.resolve(arg(args, 0));
                Ok(Value::Undefined)
            })
        };
        let reject = {
            let capability = self.clone();
            Function::new(move |args| {
                capability.reject(arg(args, 0));
                Ok(Value::Undefined)
            })
        };
        (resolve, reject)
    }
}

/// The resolve half of the algorithm, after the guard has been claimed.
fn resolve_promise(promise: &Promise, value: Value) {
    if let Value::Object(obj) = &value {
        if promise.is_same_object(obj) {
            let cycle = JsError::type_error("Chaining cycle detected for promise");
            promise.settle(Settlement::Rejected(cycle.into()));
            return;
        }

        match obj.get("then") {
            Err(thrown) => {
                trace!("promise #{}: reading `then` threw", promise.id());
                promise.settle(Settlement::Rejected(thrown));
                return;
            }
            Ok(Value::Function(then)) => {
                schedule_adoption(promise, then);
                return;
            }
            Ok(_) => {}
        }
    }

    promise.settle(Settlement::Fulfilled(value));
}

/// Queues one adoption step: call the thenable's `then` with a fresh capability.
fn schedule_adoption(promise: &Promise, then: Function) {
    debug!("promise #{} adopting a thenable", promise.id());
    let promise = promise.clone();
    let event_loop = promise.event_loop().clone();
    event_loop.enqueue_microtask(MicroTask::new(move || {
        let capability = Capability::new(promise);
        let (resolve, reject) = capability.functions();
        if let Err(thrown) = then.call(&[resolve.into(), reject.into()]) {
            if capability.is_used() {
                debug!(
                    "promise #{}: thenable threw after settling, ignored",
                    capability.promise.id()
                );
            } else {
                capability.reject(thrown);
            }
        }
    }));
}
